//! Quantity allocation across months
//!
//! Two-phase apportionment in the integer unit domain:
//!
//! 1. **Proportional phase**: every free month starts at its minimum; the
//!    unallocated remainder is shared in proportion to each month's headroom
//!    (weighted with a flat bonus), rounding each share down.
//! 2. **Remainder phase**: the units lost to rounding are handed out one at a
//!    time, round-robin in month order, skipping fixed and full months.
//!
//! Fixed months keep their pinned value throughout.

use serde::{Deserialize, Serialize};

use crate::core::units::{clamp_to_i64, saturating_sum};
use crate::models::Month;

/// Result of one allocation pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllocationOutcome {
    pub target_units: i64,
    pub allocated_units: i64,
    /// Month visits spent in the remainder phase
    pub remainder_steps: usize,
    /// `target - allocated`; negative when fixed months alone exceed the target
    pub shortfall_units: i64,
}

impl AllocationOutcome {
    pub fn is_exact(&self) -> bool {
        self.shortfall_units == 0
    }
}

/// Distributes a quantity target over months within their bounds
#[derive(Debug, Clone, Copy)]
pub struct QuantityAllocator {
    /// Percentage added to every headroom weight
    pub headroom_bonus_pct: i64,
    /// Upper limit on remainder-phase month visits
    pub max_remainder_steps: usize,
}

impl Default for QuantityAllocator {
    fn default() -> Self {
        Self {
            headroom_bonus_pct: 12,
            max_remainder_steps: 100_000,
        }
    }
}

impl QuantityAllocator {
    pub fn new(headroom_bonus_pct: i64, max_remainder_steps: usize) -> Self {
        Self {
            headroom_bonus_pct,
            max_remainder_steps,
        }
    }

    /// Allocate `target_units` across `months`
    ///
    /// Every free month ends within its bounds. The sum equals the target
    /// whenever the months' combined capacity allows it; otherwise the
    /// shortfall is reported in the outcome.
    ///
    /// # Example
    /// ```
    /// use chrono::NaiveDate;
    /// use consumption_allocator_core_rs::allocation::{BoundsCalculator, QuantityAllocator};
    ///
    /// let anchors: Vec<NaiveDate> = (1..=3)
    ///     .map(|m| NaiveDate::from_ymd_opt(2025, m, 1).unwrap())
    ///     .collect();
    /// let mut months = BoundsCalculator::default().derive(&anchors, 10.0, 8.0, 0);
    /// let outcome = QuantityAllocator::default().allocate(&mut months, 300);
    ///
    /// assert!(outcome.is_exact());
    /// assert_eq!(months[2].allocated_units, 100);
    /// ```
    pub fn allocate(&self, months: &mut [Month], target_units: i64) -> AllocationOutcome {
        for month in months.iter_mut().filter(|m| !m.fixed) {
            month.allocated_units = month.min_units;
        }

        let left = target_units.saturating_sub(allocated_sum(months));
        if left > 0 {
            self.apply_proportional_shares(months, left);
        }

        let remainder = target_units.saturating_sub(allocated_sum(months));
        let remainder_steps = if remainder > 0 {
            self.assign_remainder(months, remainder)
        } else {
            0
        };

        let allocated_units = allocated_sum(months);
        AllocationOutcome {
            target_units,
            allocated_units,
            remainder_steps,
            shortfall_units: target_units.saturating_sub(allocated_units),
        }
    }

    /// Phase 1: floor of each month's weighted share of `left`
    fn apply_proportional_shares(&self, months: &mut [Month], left: i64) {
        let weights: Vec<i128> = months
            .iter()
            .map(|m| {
                if m.fixed {
                    0
                } else {
                    m.headroom() as i128 * (100 + self.headroom_bonus_pct as i128)
                }
            })
            .collect();
        let total_weight = weights.iter().fold(0i128, |acc, w| acc.saturating_add(*w));
        if total_weight <= 0 {
            return;
        }

        for (month, weight) in months.iter_mut().zip(weights) {
            let share = clamp_to_i64(weighted_share(left, weight, total_weight));
            month.allocated_units = month
                .allocated_units
                .saturating_add(share)
                .min(month.max_units);
        }
    }

    /// Phase 2: one unit per visit, round-robin; returns visits spent
    fn assign_remainder(&self, months: &mut [Month], mut remainder: i64) -> usize {
        let count = months.len();
        if count == 0 {
            return 0;
        }
        let mut steps = 0;
        let mut progressed_this_pass = false;

        while remainder > 0 && steps < self.max_remainder_steps {
            let index = steps % count;
            let month = &mut months[index];
            if month.can_receive() {
                month.allocated_units += 1;
                remainder -= 1;
                progressed_this_pass = true;
            }
            steps += 1;

            if steps % count == 0 {
                if !progressed_this_pass {
                    break;
                }
                progressed_this_pass = false;
            }
        }
        steps
    }
}

/// `⌊left · weight / total⌋`, exact unless the product leaves i128
///
/// `weight <= total`, so the share never exceeds `left`. Only saturated
/// bounds produce products that large; those fall back to float division.
fn weighted_share(left: i64, weight: i128, total: i128) -> i128 {
    match (left as i128).checked_mul(weight) {
        Some(product) => product / total,
        None => (left as f64 * (weight as f64 / total as f64)).floor() as i128,
    }
}

fn allocated_sum(months: &[Month]) -> i64 {
    saturating_sum(months.iter().map(|m| m.allocated_units))
}
