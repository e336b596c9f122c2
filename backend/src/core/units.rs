//! Discretized quantity units and integer money
//!
//! Quantities are allocated as integer counts of 0.1-unit increments and
//! money is balanced as integer thousandths of the currency unit ("millis").
//! Floats only appear at the input and output edges of the engine.
//!
//! CRITICAL: All allocation and balancing arithmetic is i64.

/// Discretized units per whole physical quantity unit (0.1 resolution)
pub const UNITS_PER_QUANTITY: i64 = 10;

/// Millis per whole currency unit (0.001 resolution)
pub const MILLIS_PER_CURRENCY: i64 = 1000;

/// Convert a physical quantity to discretized units
///
/// # Example
/// ```
/// use consumption_allocator_core_rs::core::units::to_units;
///
/// assert_eq!(to_units(12.34), 123);
/// assert_eq!(to_units(0.0), 0);
/// ```
pub fn to_units(quantity: f64) -> i64 {
    (quantity * UNITS_PER_QUANTITY as f64).round() as i64
}

/// Convert discretized units back to a physical quantity
pub fn from_units(units: i64) -> f64 {
    units as f64 / UNITS_PER_QUANTITY as f64
}

/// Convert a monetary amount to millis
///
/// # Example
/// ```
/// use consumption_allocator_core_rs::core::units::to_millis;
///
/// assert_eq!(to_millis(6.2), 6_200);
/// assert_eq!(to_millis(-1.25), -1_250);
/// ```
pub fn to_millis(amount: f64) -> i64 {
    (amount * MILLIS_PER_CURRENCY as f64).round() as i64
}

/// Convert millis back to a monetary amount
pub fn from_millis(millis: i64) -> f64 {
    millis as f64 / MILLIS_PER_CURRENCY as f64
}

/// Round half away from zero to `places` decimal places
///
/// # Example
/// ```
/// use consumption_allocator_core_rs::core::units::round_to;
///
/// assert_eq!(round_to(2.346, 2), 2.35);
/// assert_eq!(round_to(10.04, 1), 10.0);
/// ```
pub fn round_to(value: f64, places: i32) -> f64 {
    let scale = 10f64.powi(places);
    (value * scale).round() / scale
}

/// Sum that clamps at the i64 range instead of overflowing
///
/// Inputs are only checked for being finite, so scaled values can sit at
/// the i64 limits; aggregates over them must not wrap.
pub fn saturating_sum<I>(values: I) -> i64
where
    I: IntoIterator<Item = i64>,
{
    values.into_iter().fold(0, i64::saturating_add)
}

/// Narrow an i128 to i64, clamping at the bounds
pub fn clamp_to_i64(value: i128) -> i64 {
    value.clamp(i64::MIN as i128, i64::MAX as i128) as i64
}
