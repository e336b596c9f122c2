//! Tests for tier resolution and the progressive tariff

use consumption_allocator_core_rs::pricing::{
    resolve_tiers, TariffSchedule, TierPrices, Valuation, CANONICAL_FIRST_TIER_PRICES,
    DEFAULT_STAMP_RATE,
};

fn tariff(first: f64) -> TariffSchedule {
    TariffSchedule::new(TierPrices::resolve(first, 0.0, 0.0), DEFAULT_STAMP_RATE)
}

// ============================================================================
// Tier resolution
// ============================================================================

#[test]
fn test_canonical_tier_lookup() {
    assert_eq!(resolve_tiers(2.50), (3.25, 3.75));
    assert_eq!(resolve_tiers(2.35), (3.10, 3.60));
    assert_eq!(resolve_tiers(2.60), (3.35, 4.00));
    assert_eq!(resolve_tiers(3.00), (4.00, 5.00));
    assert_eq!(resolve_tiers(4.00), (5.00, 7.00));
}

#[test]
fn test_non_canonical_tiers_are_derived() {
    assert_eq!(resolve_tiers(5.0), (5.75, 6.25));
}

#[test]
fn test_every_form_price_is_canonical() {
    for price in CANONICAL_FIRST_TIER_PRICES {
        let (second, third) = resolve_tiers(price);
        assert!(second > price && third > second);
    }
}

#[test]
fn test_overrides_replace_resolved_prices() {
    let tiers = TierPrices::resolve(2.50, 3.40, 4.10);
    assert_eq!(tiers.second, 3.40);
    assert_eq!(tiers.third, 4.10);

    let derived = TierPrices::resolve(2.50, 0.0, 0.0);
    assert_eq!((derived.second, derived.third), (3.25, 3.75));
}

// ============================================================================
// Pricing function
// ============================================================================

#[test]
fn test_price_of_zero_is_zero() {
    assert_eq!(tariff(2.50).price(0.0), 0.0);
    assert_eq!(tariff(2.50).price_millis(0), 0);
}

#[test]
fn test_band_rates_include_stamp() {
    let schedule = tariff(2.50);
    // 10 units in band 1 at 2.50 + 0.036
    assert_eq!(schedule.price_millis(100), 25_360);
}

#[test]
fn test_price_continuous_at_band_boundaries() {
    let schedule = tariff(2.60);
    for boundary in [30.0, 60.0] {
        let below = schedule.price(boundary - 1e-9);
        let at = schedule.price(boundary);
        let above = schedule.price(boundary + 1e-9);
        assert!((at - below).abs() < 1e-6, "jump below {}", boundary);
        assert!((above - at).abs() < 1e-6, "jump above {}", boundary);
    }
}

#[test]
fn test_price_monotone_over_unit_grid() {
    let schedule = tariff(4.00);
    let mut previous = 0;
    for units in 0..=1_000 {
        let value = schedule.value_millis(units);
        assert!(
            value >= previous,
            "price dropped at {} units: {} < {}",
            units,
            value,
            previous
        );
        previous = value;
    }
}

#[test]
fn test_marginal_rate_steps_up_per_band() {
    let schedule = TariffSchedule::new(TierPrices::resolve(2.50, 0.0, 0.0), 0.0);
    // One tenth of a unit in each band
    assert_eq!(schedule.price_millis(150) - schedule.price_millis(149), 250);
    assert_eq!(schedule.price_millis(450) - schedule.price_millis(449), 325);
    assert_eq!(schedule.price_millis(750) - schedule.price_millis(749), 375);
}
