//! Value balancing by single-unit moves
//!
//! After allocation the quantities add up, but their priced value (fee
//! excluded) generally misses the value target because the tariff is
//! progressive: the same quantity costs more when concentrated in fewer
//! months. The balancer shifts single units between random month pairs,
//! keeping a move only when it brings the aggregate value strictly closer to
//! the target. Quantity totals are unchanged by every move.
//!
//! This is greedy hill-climbing with random proposals, bounded by a trial
//! budget. It does not promise to hit the target; the residual corrector
//! closes whatever gap remains.

use serde::{Deserialize, Serialize};

use crate::core::units::saturating_sum;
use crate::models::{Event, EventLog, Month};
use crate::pricing::Valuation;
use crate::rng::RngManager;

/// What a balancing pass achieved
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceOutcome {
    /// Proposals drawn
    pub trials: usize,
    /// Proposals kept
    pub accepted_moves: usize,
    /// `target - aggregate value` when the pass stopped (millis)
    pub remaining_gap_millis: i64,
}

impl BalanceOutcome {
    pub fn converged(&self) -> bool {
        self.remaining_gap_millis == 0
    }
}

/// Randomized pairwise value balancer
#[derive(Debug, Clone, Copy)]
pub struct ValueBalancer {
    pub max_trials: usize,
}

impl Default for ValueBalancer {
    fn default() -> Self {
        Self { max_trials: 3_000 }
    }
}

impl ValueBalancer {
    pub fn new(max_trials: usize) -> Self {
        Self { max_trials }
    }

    /// Nudge free months' quantities toward `target_millis`
    ///
    /// `months[i].value_millis` must already hold each month's valuation.
    /// Each trial draws a recipient and a donor uniformly; the move "one unit
    /// from donor to recipient" is evaluated and kept iff
    /// `|need - delta| < |need|`. Fixed months never take part. The running
    /// aggregate is updated incrementally on every accepted move.
    pub fn balance<V>(
        &self,
        months: &mut [Month],
        valuation: &V,
        target_millis: i64,
        rng: &mut RngManager,
        events: &mut EventLog,
    ) -> BalanceOutcome
    where
        V: Valuation + ?Sized,
    {
        let count = months.len();
        let mut running = saturating_sum(months.iter().map(|m| m.value_millis));
        let mut outcome = BalanceOutcome::default();

        if count < 2 {
            outcome.remaining_gap_millis = target_millis.saturating_sub(running);
            return outcome;
        }

        while outcome.trials < self.max_trials {
            let need = target_millis.saturating_sub(running);
            if need == 0 {
                break;
            }
            outcome.trials += 1;

            let recipient = rng.index(count);
            let donor = rng.index(count);
            if recipient == donor
                || !months[recipient].can_receive()
                || !months[donor].can_donate()
            {
                continue;
            }

            let recipient_value = valuation.value_millis(months[recipient].allocated_units + 1);
            let donor_value = valuation.value_millis(months[donor].allocated_units - 1);
            let delta = recipient_value
                .saturating_sub(months[recipient].value_millis)
                .saturating_add(donor_value.saturating_sub(months[donor].value_millis));

            if need.saturating_sub(delta).unsigned_abs() < need.unsigned_abs() {
                months[recipient].allocated_units += 1;
                months[recipient].value_millis = recipient_value;
                months[donor].allocated_units -= 1;
                months[donor].value_millis = donor_value;
                running = running.saturating_add(delta);
                outcome.accepted_moves += 1;

                events.log(Event::BalanceMove {
                    trial: outcome.trials,
                    recipient,
                    donor,
                    delta_millis: delta,
                });
            }
        }

        outcome.remaining_gap_millis = target_millis.saturating_sub(running);
        outcome
    }
}
