//! Tier price resolution
//!
//! The regulated tariff publishes a handful of first-tier prices together
//! with their second and third band prices. Those pairs are looked up, not
//! computed. Any other first-tier price gets the generic +0.75 / +0.50 steps.

use serde::{Deserialize, Serialize};

use crate::core::units::round_to;

/// Published first-tier prices and their (second, third) band prices
pub const CANONICAL_TIERS: [(f64, (f64, f64)); 5] = [
    (2.35, (3.10, 3.60)),
    (2.50, (3.25, 3.75)),
    (2.60, (3.35, 4.00)),
    (3.00, (4.00, 5.00)),
    (4.00, (5.00, 7.00)),
];

/// First-tier prices offered by the input form
pub const CANONICAL_FIRST_TIER_PRICES: [f64; 5] = [2.35, 2.50, 2.60, 3.00, 4.00];

/// Step from first to second band price for non-canonical tariffs
pub const SECOND_TIER_STEP: f64 = 0.75;

/// Step from second to third band price for non-canonical tariffs
pub const THIRD_TIER_STEP: f64 = 0.5;

/// Resolve `(p2, p3)` for a first-tier price
///
/// # Example
/// ```
/// use consumption_allocator_core_rs::pricing::resolve_tiers;
///
/// assert_eq!(resolve_tiers(2.50), (3.25, 3.75));
/// assert_eq!(resolve_tiers(5.0), (5.75, 6.25));
/// ```
pub fn resolve_tiers(first_tier: f64) -> (f64, f64) {
    let key = round_to(first_tier, 2);
    if let Some((_, pair)) = CANONICAL_TIERS.iter().find(|(price, _)| *price == key) {
        return *pair;
    }

    let second = first_tier + SECOND_TIER_STEP;
    (second, second + THIRD_TIER_STEP)
}

/// The three band prices in effect for one run
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TierPrices {
    pub first: f64,
    pub second: f64,
    pub third: f64,
}

impl TierPrices {
    /// Resolve band prices, honouring explicit overrides
    ///
    /// A zero override means "derive": the resolved value is used. Each
    /// override applies independently.
    pub fn resolve(first: f64, second_override: f64, third_override: f64) -> Self {
        let (second, third) = resolve_tiers(first);
        Self {
            first,
            second: if second_override > 0.0 { second_override } else { second },
            third: if third_override > 0.0 { third_override } else { third },
        }
    }
}
