//! Allocation Engine
//!
//! Runs the full allocation pipeline for one input record:
//!
//! ```text
//! 1. Resolve tier prices (table lookup or derived, then overrides)
//! 2. Derive quantity and value targets from the readings
//! 3. Enumerate the period's calendar months
//! 4. Derive per-month bounds, fixed months, zero tail
//! 5. Relax free minimums if they cannot fit the quantity target
//! 6. Allocate the quantity target in discretized units
//! 7. Value every month with the tariff
//! 8. Balance values toward the target (fee excluded) by single-unit moves
//! 9. Add the monthly fee
//! 10. Correct the residual so displayed values hit the target exactly
//! 11. Build rows, summary, fingerprint
//! ```
//!
//! # Determinism
//!
//! The only randomness is the balancer's pair sampling, drawn from an
//! [`RngManager`] seeded with `EngineConfig::rng_seed`. Same input + same
//! seed → identical result.
//!
//! # Example
//!
//! ```rust
//! use chrono::NaiveDate;
//! use consumption_allocator_core_rs::{AllocationEngine, EngineConfig, InputRecord, TotalizerReading};
//!
//! let input = InputRecord {
//!     start_date: NaiveDate::from_ymd_opt(2025, 1, 5).unwrap(),
//!     end_date: NaiveDate::from_ymd_opt(2025, 3, 20).unwrap(),
//!     start_reading: TotalizerReading { total: 500.0, previous_period: 9.0, current_period: 8.0, balance: 40.0 },
//!     end_reading: TotalizerReading { total: 530.0, previous_period: 10.0, current_period: 8.0, balance: 25.0 },
//!     topup1_net: 120.0,
//!     topup2_net: 0.0,
//!     first_tier_price: 2.50,
//!     second_tier_price: 0.0,
//!     third_tier_price: 0.0,
//!     stamp_rate: 0.036,
//!     monthly_fee: 6.20,
//!     zero_tail: 0,
//! };
//!
//! let engine = AllocationEngine::new(EngineConfig::default()).unwrap();
//! let result = engine.run(&input).unwrap();
//!
//! assert_eq!(result.rows.len(), 3);
//! assert_eq!(result.allocated_units(), 300);
//! assert_eq!(result.total_millis(), result.targets.value_millis);
//! ```

use tracing::{debug, warn};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::fingerprint::compute_input_fingerprint;
use crate::allocation::{BoundsCalculator, BoundsPolicy, QuantityAllocator};
use crate::balancing::{correct_residual, ValueBalancer};
use crate::core::calendar::months_between;
use crate::core::units::to_millis;
use crate::models::{
    AllocationResult, Event, EventLog, InputError, InputRecord, Month, MonthlyRow, Summary,
    Targets,
};
use crate::pricing::{TariffSchedule, TierPrices, Valuation};
use crate::rng::RngManager;

/// Errors that can occur while running an allocation
#[derive(Debug, Error, PartialEq)]
pub enum AllocationError {
    #[error("Invalid input: {0}")]
    InvalidInput(#[from] InputError),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("Quantity target {target_units} units unreachable: allocated {allocated_units} units")]
    QuantityInfeasible {
        target_units: i64,
        allocated_units: i64,
    },

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Engine tuning
///
/// # Fields
///
/// * `rng_seed` - Seed for the balancer's pair sampling
/// * `bounds` - Min/max factors around the reference consumption
/// * `headroom_bonus_pct` - Flat bonus on allocation headroom weights
/// * `max_remainder_steps` - Cap on remainder-phase month visits
/// * `max_balance_trials` - Cap on balancer proposals
/// * `strict_quantity` - Fail instead of reporting a quantity shortfall
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub rng_seed: u64,
    pub bounds: BoundsPolicy,
    pub headroom_bonus_pct: i64,
    pub max_remainder_steps: usize,
    pub max_balance_trials: usize,
    pub strict_quantity: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            rng_seed: 1,
            bounds: BoundsPolicy::default(),
            headroom_bonus_pct: 12,
            max_remainder_steps: 100_000,
            max_balance_trials: 3_000,
            strict_quantity: false,
        }
    }
}

impl EngineConfig {
    /// Default tuning with a specific seed
    pub fn with_seed(rng_seed: u64) -> Self {
        Self {
            rng_seed,
            ..Self::default()
        }
    }
}

/// Stateless allocation engine; every [`run`](Self::run) is independent
#[derive(Debug, Clone)]
pub struct AllocationEngine {
    config: EngineConfig,
    bounds: BoundsCalculator,
    allocator: QuantityAllocator,
    balancer: ValueBalancer,
}

impl AllocationEngine {
    /// Create an engine after validating its configuration
    ///
    /// # Errors
    ///
    /// Returns `AllocationError::InvalidConfig` if the bound factors are not
    /// finite with `0 <= min_factor <= max_factor`, or the headroom bonus is
    /// negative.
    pub fn new(config: EngineConfig) -> Result<Self, AllocationError> {
        Self::validate_config(&config)?;

        Ok(Self {
            bounds: BoundsCalculator::new(config.bounds),
            allocator: QuantityAllocator::new(config.headroom_bonus_pct, config.max_remainder_steps),
            balancer: ValueBalancer::new(config.max_balance_trials),
            config,
        })
    }

    fn validate_config(config: &EngineConfig) -> Result<(), AllocationError> {
        if !config.bounds.is_valid() {
            return Err(AllocationError::InvalidConfig(format!(
                "bound factors must satisfy 0 <= min_factor <= max_factor, got {} and {}",
                config.bounds.min_factor, config.bounds.max_factor
            )));
        }
        if config.headroom_bonus_pct < 0 {
            return Err(AllocationError::InvalidConfig(
                "headroom_bonus_pct must be non-negative".to_string(),
            ));
        }
        Ok(())
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Run the full pipeline for one input record
    ///
    /// # Errors
    ///
    /// - `InvalidInput` if a numeric field is non-finite or wrongly negative
    /// - `QuantityInfeasible` if `strict_quantity` is set and the months
    ///   cannot hold the quantity target
    pub fn run(&self, input: &InputRecord) -> Result<AllocationResult, AllocationError> {
        input.validate()?;

        let mut events = EventLog::new();

        let tiers = TierPrices::resolve(
            input.first_tier_price,
            input.second_tier_price,
            input.third_tier_price,
        );
        let tariff = TariffSchedule::new(tiers, input.stamp_rate);
        let targets = Targets::from_input(input, &tariff);

        let anchors = months_between(input.start_date, input.end_date);
        let mut months = self.bounds.derive(
            &anchors,
            input.end_reading.previous_period,
            input.start_reading.current_period,
            input.zero_tail,
        );
        for month in &months {
            events.log(Event::BoundsDerived {
                month: month.index,
                min_units: month.min_units,
                max_units: month.max_units,
                fixed: month.fixed,
            });
        }

        if let Some(relaxation) = self.bounds.relax_minimums(&mut months, targets.quantity_units) {
            debug!(
                original_sum = relaxation.original_sum,
                relaxed_sum = relaxation.relaxed_sum,
                "relaxed free minimums"
            );
            events.log(Event::MinimumsRelaxed {
                available_units: relaxation.available_units,
                original_sum: relaxation.original_sum,
                relaxed_sum: relaxation.relaxed_sum,
            });
        }

        let allocation = self.allocator.allocate(&mut months, targets.quantity_units);
        events.log(Event::QuantityAllocated {
            target_units: allocation.target_units,
            allocated_units: allocation.allocated_units,
            remainder_steps: allocation.remainder_steps,
        });
        if !allocation.is_exact() {
            warn!(
                target_units = allocation.target_units,
                allocated_units = allocation.allocated_units,
                "quantity target not reachable"
            );
            events.log(Event::QuantityShortfall {
                target_units: allocation.target_units,
                allocated_units: allocation.allocated_units,
            });
            if self.config.strict_quantity {
                return Err(AllocationError::QuantityInfeasible {
                    target_units: allocation.target_units,
                    allocated_units: allocation.allocated_units,
                });
            }
        }

        value_months(&mut months, &tariff);

        let fee_millis = to_millis(input.monthly_fee);
        let fee_total = fee_millis.saturating_mul(months.len() as i64);
        let target_excluding_fees = targets.value_millis.saturating_sub(fee_total).max(0);

        let mut rng = RngManager::new(self.config.rng_seed);
        let balance = self.balancer.balance(
            &mut months,
            &tariff,
            target_excluding_fees,
            &mut rng,
            &mut events,
        );
        events.log(Event::BalanceFinished {
            trials: balance.trials,
            accepted_moves: balance.accepted_moves,
            remaining_gap_millis: balance.remaining_gap_millis,
        });
        debug!(
            trials = balance.trials,
            accepted_moves = balance.accepted_moves,
            remaining_gap_millis = balance.remaining_gap_millis,
            "balancing finished"
        );

        apply_fee(&mut months, fee_millis);
        correct_residual(&mut months, targets.value_millis, &mut events);

        let rows: Vec<MonthlyRow> = months.iter().map(MonthlyRow::from).collect();
        let summary = Summary::from_months(&months, &targets);
        let input_fingerprint = compute_input_fingerprint(input, self.config.rng_seed)?;

        Ok(AllocationResult {
            months,
            rows,
            targets,
            tiers,
            summary,
            balance,
            rng_seed: self.config.rng_seed,
            input_fingerprint,
            events,
        })
    }
}

/// Run one allocation with default tuning and the given seed
pub fn distribute(input: &InputRecord, rng_seed: u64) -> Result<AllocationResult, AllocationError> {
    AllocationEngine::new(EngineConfig::with_seed(rng_seed))?.run(input)
}

fn value_months<V: Valuation + ?Sized>(months: &mut [Month], valuation: &V) {
    for month in months {
        month.value_millis = valuation.value_millis(month.allocated_units);
    }
}

fn apply_fee(months: &mut [Month], fee_millis: i64) {
    for month in months {
        month.fee_millis = fee_millis;
        month.total_millis = month.value_millis.saturating_add(fee_millis);
    }
}
