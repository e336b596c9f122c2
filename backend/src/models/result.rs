//! Allocation output: the monthly table and its summary
//!
//! Rows and sums are produced from the integer month state, so the printed
//! totals are exact at output precision (0.1 quantity, 0.001 money).

use serde::{Deserialize, Serialize};

use super::event::EventLog;
use super::month::Month;
use super::targets::Targets;
use crate::balancing::BalanceOutcome;
use crate::core::units::{from_millis, from_units, saturating_sum};
use crate::pricing::TierPrices;

/// One output row per month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyRow {
    /// 1-based ordinal
    pub ordinal: usize,
    /// `MM/YYYY`
    pub month: String,
    pub quantity: f64,
    pub value_excluding_fee: f64,
    pub fee: f64,
    pub value_including_fee: f64,
}

impl From<&Month> for MonthlyRow {
    fn from(month: &Month) -> Self {
        Self {
            ordinal: month.index + 1,
            month: month.label(),
            quantity: from_units(month.allocated_units),
            value_excluding_fee: from_millis(month.value_millis),
            fee: from_millis(month.fee_millis),
            value_including_fee: from_millis(month.total_millis),
        }
    }
}

/// Column totals and the targets they should match
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub quantity_sum: f64,
    pub value_excluding_fee_sum: f64,
    pub fee_sum: f64,
    pub value_including_fee_sum: f64,
    pub quantity_target: f64,
    pub value_target: f64,
    /// Target minus allocated quantity: 0 when exact, negative when the
    /// fixed months alone already exceed the target
    pub quantity_shortfall: f64,
}

impl Summary {
    pub fn from_months(months: &[Month], targets: &Targets) -> Self {
        let units = saturating_sum(months.iter().map(|m| m.allocated_units));
        let value = saturating_sum(months.iter().map(|m| m.value_millis));
        let fees = saturating_sum(months.iter().map(|m| m.fee_millis));
        let total = saturating_sum(months.iter().map(|m| m.total_millis));

        Self {
            quantity_sum: from_units(units),
            value_excluding_fee_sum: from_millis(value),
            fee_sum: from_millis(fees),
            value_including_fee_sum: from_millis(total),
            quantity_target: targets.quantity,
            value_target: targets.value,
            quantity_shortfall: from_units(targets.quantity_units.saturating_sub(units)),
        }
    }

    /// Allocated quantity beyond the target (0 unless fixed months overshoot)
    pub fn quantity_overshoot(&self) -> f64 {
        (-self.quantity_shortfall).max(0.0)
    }

    /// Quantity column adds up to the quantity target
    pub fn quantity_matches(&self) -> bool {
        self.quantity_shortfall == 0.0
    }

    /// Final value column adds up to the value target
    pub fn value_matches(&self) -> bool {
        (self.value_including_fee_sum - self.value_target).abs() < 0.0005
    }
}

/// Complete result of one allocation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllocationResult {
    /// Final month state (integer domain)
    pub months: Vec<Month>,
    /// Display rows, one per month
    pub rows: Vec<MonthlyRow>,
    pub targets: Targets,
    /// Band prices actually used
    pub tiers: TierPrices,
    pub summary: Summary,
    pub balance: BalanceOutcome,
    /// Seed the balancer drew its month pairs from
    pub rng_seed: u64,
    /// SHA-256 of the input record and seed
    pub input_fingerprint: String,
    pub events: EventLog,
}

impl AllocationResult {
    /// Allocated units across all months
    pub fn allocated_units(&self) -> i64 {
        saturating_sum(self.months.iter().map(|m| m.allocated_units))
    }

    /// Displayed value across all months, fee included (millis)
    pub fn total_millis(&self) -> i64 {
        saturating_sum(self.months.iter().map(|m| m.total_millis))
    }
}
