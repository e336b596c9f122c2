//! Input record for one allocation run
//!
//! Captures the meter readings at the start and end of the period, the
//! top-ups made in between, and the tariff in force. Built once by the
//! caller and never mutated by the engine.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::pricing::DEFAULT_STAMP_RATE;

/// Monthly fee values offered by the input form
pub const CANONICAL_MONTHLY_FEES: [f64; 7] = [6.20, 7.10, 12.0, 13.68, 17.5, 19.5, 0.0];

/// Errors raised when an input record is not numerically usable
#[derive(Debug, Error, PartialEq)]
pub enum InputError {
    #[error("Field '{field}' is not a finite number")]
    NonFinite { field: &'static str },

    #[error("Field '{field}' must be non-negative, got {value}")]
    Negative { field: &'static str, value: f64 },
}

/// Cumulative meter values captured at one reading
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TotalizerReading {
    /// Lifetime cumulative consumption
    pub total: f64,
    /// Previous period's consumption as shown at read time
    pub previous_period: f64,
    /// Current period's consumption so far as shown at read time
    pub current_period: f64,
    /// Prepaid account balance
    pub balance: f64,
}

/// Monthly fee choice: one of the published values, or a custom amount
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum MonthlyFee {
    Canonical(usize),
    Custom(f64),
}

impl MonthlyFee {
    /// The published fee at `index`, if there is one
    pub fn canonical(index: usize) -> Option<Self> {
        (index < CANONICAL_MONTHLY_FEES.len()).then_some(MonthlyFee::Canonical(index))
    }

    /// Fee amount; an out-of-range canonical index resolves to 0
    pub fn amount(&self) -> f64 {
        match self {
            MonthlyFee::Canonical(index) => {
                CANONICAL_MONTHLY_FEES.get(*index).copied().unwrap_or(0.0)
            }
            MonthlyFee::Custom(value) => *value,
        }
    }
}

fn default_stamp_rate() -> f64 {
    DEFAULT_STAMP_RATE
}

/// Everything the engine needs for one run
///
/// # Example
/// ```
/// use chrono::NaiveDate;
/// use consumption_allocator_core_rs::{InputRecord, TotalizerReading};
///
/// let input = InputRecord {
///     start_date: NaiveDate::from_ymd_opt(2025, 1, 10).unwrap(),
///     end_date: NaiveDate::from_ymd_opt(2025, 3, 10).unwrap(),
///     start_reading: TotalizerReading { total: 100.0, previous_period: 0.0, current_period: 4.0, balance: 50.0 },
///     end_reading: TotalizerReading { total: 140.0, previous_period: 10.0, current_period: 2.0, balance: 20.0 },
///     topup1_net: 100.0,
///     topup2_net: 0.0,
///     first_tier_price: 2.50,
///     second_tier_price: 0.0,
///     third_tier_price: 0.0,
///     stamp_rate: 0.036,
///     monthly_fee: 6.20,
///     zero_tail: 0,
/// };
/// assert!(input.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputRecord {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub start_reading: TotalizerReading,
    pub end_reading: TotalizerReading,
    /// Net first top-up (may be negative)
    #[serde(default)]
    pub topup1_net: f64,
    /// Net second top-up (may be negative)
    #[serde(default)]
    pub topup2_net: f64,
    pub first_tier_price: f64,
    /// Second band price override; 0 derives it from the first tier
    #[serde(default)]
    pub second_tier_price: f64,
    /// Third band price override; 0 derives it from the first tier
    #[serde(default)]
    pub third_tier_price: f64,
    #[serde(default = "default_stamp_rate")]
    pub stamp_rate: f64,
    #[serde(default)]
    pub monthly_fee: f64,
    /// Months before the final one forced to zero consumption
    #[serde(default)]
    pub zero_tail: u32,
}

impl InputRecord {
    /// Check every numeric field is finite, and non-negative where required
    ///
    /// Top-ups are the only fields allowed to go negative.
    pub fn validate(&self) -> Result<(), InputError> {
        let signed = [("topup1_net", self.topup1_net), ("topup2_net", self.topup2_net)];
        for (field, value) in signed {
            if !value.is_finite() {
                return Err(InputError::NonFinite { field });
            }
        }

        for (field, value) in self.unsigned_fields() {
            if !value.is_finite() {
                return Err(InputError::NonFinite { field });
            }
            if value < 0.0 {
                return Err(InputError::Negative { field, value });
            }
        }
        Ok(())
    }

    fn unsigned_fields(&self) -> [(&'static str, f64); 13] {
        [
            ("start_reading.total", self.start_reading.total),
            ("start_reading.previous_period", self.start_reading.previous_period),
            ("start_reading.current_period", self.start_reading.current_period),
            ("start_reading.balance", self.start_reading.balance),
            ("end_reading.total", self.end_reading.total),
            ("end_reading.previous_period", self.end_reading.previous_period),
            ("end_reading.current_period", self.end_reading.current_period),
            ("end_reading.balance", self.end_reading.balance),
            ("first_tier_price", self.first_tier_price),
            ("second_tier_price", self.second_tier_price),
            ("third_tier_price", self.third_tier_price),
            ("stamp_rate", self.stamp_rate),
            ("monthly_fee", self.monthly_fee),
        ]
    }
}

/// Coerce free-form numeric text the way the input form does
///
/// Surrounding whitespace is ignored, a comma is accepted as the decimal
/// separator, and empty or unparsable text reads as zero.
///
/// # Example
/// ```
/// use consumption_allocator_core_rs::models::input::parse_numeric_field;
///
/// assert_eq!(parse_numeric_field(" 12,5 "), 12.5);
/// assert_eq!(parse_numeric_field(""), 0.0);
/// assert_eq!(parse_numeric_field("abc"), 0.0);
/// ```
pub fn parse_numeric_field(raw: &str) -> f64 {
    let normalized = raw.trim().replace(',', ".");
    if normalized.is_empty() {
        return 0.0;
    }
    normalized
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .unwrap_or(0.0)
}
