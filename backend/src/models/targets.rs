//! Quantity and value targets derived from the period's readings
//!
//! The quantity target is the totalizer movement over the period, corrected
//! for the current-period counters shown at each reading. The value target is
//! the money that left the account: opening funds plus the value of the
//! opening current-period consumption, minus the closing balance and the
//! value of the closing current-period consumption.

use serde::{Deserialize, Serialize};

use super::input::InputRecord;
use crate::core::units::{round_to, to_millis, to_units};
use crate::pricing::TariffSchedule;

/// Totals the monthly table must add up to
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Targets {
    /// Total quantity (0.1 resolution)
    pub quantity: f64,
    /// Total value including fees (0.001 resolution)
    pub value: f64,
    /// `quantity` in discretized units
    pub quantity_units: i64,
    /// `value` in millis
    pub value_millis: i64,
}

impl Targets {
    /// Derive both targets from the readings, priced with `tariff`
    pub fn from_input(input: &InputRecord, tariff: &TariffSchedule) -> Self {
        let start = &input.start_reading;
        let end = &input.end_reading;

        let quantity = round_to(
            end.total - end.current_period - start.total + start.current_period,
            1,
        )
        .max(0.0);

        let opening_funds = round_to(start.balance + input.topup1_net + input.topup2_net, 3);
        let opening_current_value = tariff.price(start.current_period);
        let closing_current_value = tariff.price(end.current_period);
        let value = round_to(
            (opening_funds + opening_current_value) - (end.balance + closing_current_value),
            3,
        )
        .max(0.0);

        Self {
            quantity,
            value,
            quantity_units: to_units(quantity),
            value_millis: to_millis(value),
        }
    }
}
