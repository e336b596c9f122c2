//! Tariff pricing: tier resolution and progressive band valuation

pub mod tariff;
pub mod tiers;

pub use tariff::{TariffSchedule, Valuation, BAND_WIDTH, DEFAULT_STAMP_RATE};
pub use tiers::{resolve_tiers, TierPrices, CANONICAL_FIRST_TIER_PRICES, CANONICAL_TIERS};
