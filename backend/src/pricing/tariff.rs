//! Progressive three-band tariff
//!
//! Consumption is priced in bands of 30 quantity units: the first 30 at the
//! first-tier price, the next 30 at the second, everything above 60 at the
//! third. Every band also carries the flat stamp rate per unit.

use serde::{Deserialize, Serialize};

use super::tiers::TierPrices;
use crate::core::units::{from_units, to_millis};

/// Width of each of the first two price bands
pub const BAND_WIDTH: f64 = 30.0;

/// Consumption stamp charged per quantity unit on top of the band price
pub const DEFAULT_STAMP_RATE: f64 = 0.036;

/// Anything that can value a discretized quantity in millis
///
/// The value balancer only needs this one function; the tariff implements
/// it, and so does any `Fn(i64) -> i64`.
pub trait Valuation {
    /// Monetary value (millis, fee excluded) of `units` discretized units
    fn value_millis(&self, units: i64) -> i64;
}

impl<F> Valuation for F
where
    F: Fn(i64) -> i64,
{
    fn value_millis(&self, units: i64) -> i64 {
        self(units)
    }
}

/// Band prices plus stamp rate for one run
///
/// # Example
/// ```
/// use consumption_allocator_core_rs::pricing::{TariffSchedule, TierPrices};
///
/// let tariff = TariffSchedule::new(TierPrices::resolve(2.50, 0.0, 0.0), 0.0);
/// assert_eq!(tariff.price(0.0), 0.0);
/// assert_eq!(tariff.price(30.0), 75.0);
/// assert_eq!(tariff.price(40.0), 107.5);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TariffSchedule {
    pub tiers: TierPrices,
    pub stamp_rate: f64,
}

impl TariffSchedule {
    pub fn new(tiers: TierPrices, stamp_rate: f64) -> Self {
        Self { tiers, stamp_rate }
    }

    /// Price of `quantity` physical units, fee excluded
    ///
    /// Piecewise linear and continuous at 30 and 60. Negative quantities
    /// price as zero.
    pub fn price(&self, quantity: f64) -> f64 {
        let q = quantity.max(0.0);
        let rate1 = self.tiers.first + self.stamp_rate;
        let rate2 = self.tiers.second + self.stamp_rate;
        let rate3 = self.tiers.third + self.stamp_rate;

        if q <= BAND_WIDTH {
            q * rate1
        } else if q <= 2.0 * BAND_WIDTH {
            BAND_WIDTH * rate1 + (q - BAND_WIDTH) * rate2
        } else {
            BAND_WIDTH * rate1 + BAND_WIDTH * rate2 + (q - 2.0 * BAND_WIDTH) * rate3
        }
    }

    /// Price of a discretized quantity, rounded to millis
    pub fn price_millis(&self, units: i64) -> i64 {
        to_millis(self.price(from_units(units)))
    }
}

impl Valuation for TariffSchedule {
    fn value_millis(&self, units: i64) -> i64 {
        self.price_millis(units)
    }
}
