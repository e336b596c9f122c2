//! Tests for quantity allocation
//!
//! CRITICAL: Allocation sums to the target unit-for-unit whenever capacity
//! allows, and never leaves a free month outside its bounds.

use chrono::NaiveDate;
use consumption_allocator_core_rs::allocation::{BoundsCalculator, QuantityAllocator};
use consumption_allocator_core_rs::Month;

fn anchors(count: u32) -> Vec<NaiveDate> {
    (0..count)
        .map(|i| NaiveDate::from_ymd_opt(2025 + (i / 12) as i32, i % 12 + 1, 1).unwrap())
        .collect()
}

fn allocated(months: &[Month]) -> Vec<i64> {
    months.iter().map(|m| m.allocated_units).collect()
}

fn assert_within_bounds(months: &[Month]) {
    for month in months.iter().filter(|m| !m.fixed) {
        assert!(
            month.min_units <= month.allocated_units && month.allocated_units <= month.max_units,
            "month {} allocated {} outside [{}, {}]",
            month.index,
            month.allocated_units,
            month.min_units,
            month.max_units
        );
    }
}

#[test]
fn test_three_month_reference_scenario() {
    // c3 = 10, d2 = 8, target 30 → last month fixed at 10, 20 split over two
    let mut months = BoundsCalculator::default().derive(&anchors(3), 10.0, 8.0, 0);
    let outcome = QuantityAllocator::default().allocate(&mut months, 300);

    assert!(outcome.is_exact());
    assert_eq!(allocated(&months), vec![110, 90, 100]);
    assert_within_bounds(&months);
}

#[test]
fn test_fixed_months_keep_their_value() {
    let mut months = BoundsCalculator::default().derive(&anchors(6), 12.0, 0.0, 2);
    let outcome = QuantityAllocator::default().allocate(&mut months, 480);

    assert!(outcome.is_exact());
    assert_eq!(months[3].allocated_units, 0);
    assert_eq!(months[4].allocated_units, 0);
    assert_eq!(months[5].allocated_units, 120);
    assert_within_bounds(&months);
}

#[test]
fn test_target_at_minimums_allocates_minimums() {
    let mut months = BoundsCalculator::default().derive(&anchors(4), 10.0, 8.0, 0);
    // 80 + 50 + 50 + 100
    let outcome = QuantityAllocator::default().allocate(&mut months, 280);

    assert!(outcome.is_exact());
    assert_eq!(allocated(&months), vec![80, 50, 50, 100]);
}

#[test]
fn test_target_at_capacity_fills_every_month() {
    let mut months = BoundsCalculator::default().derive(&anchors(4), 10.0, 8.0, 0);
    let outcome = QuantityAllocator::default().allocate(&mut months, 610);

    assert!(outcome.is_exact());
    assert_eq!(allocated(&months), vec![170, 170, 170, 100]);
}

#[test]
fn test_over_capacity_target_undershoots() {
    let mut months = BoundsCalculator::default().derive(&anchors(3), 10.0, 8.0, 0);
    let outcome = QuantityAllocator::default().allocate(&mut months, 1_000);

    assert_eq!(outcome.allocated_units, 440);
    assert_eq!(outcome.shortfall_units, 560);
    assert!(!outcome.is_exact());
    assert_within_bounds(&months);
}

#[test]
fn test_fixed_months_above_target_overshoot() {
    let calc = BoundsCalculator::default();
    let mut months = calc.derive(&anchors(2), 10.0, 0.0, 0);
    calc.relax_minimums(&mut months, 40);
    let outcome = QuantityAllocator::default().allocate(&mut months, 40);

    assert_eq!(allocated(&months), vec![0, 100]);
    assert_eq!(outcome.shortfall_units, -60);
}

#[test]
fn test_headroom_bonus_does_not_change_proportions() {
    let mut with_bonus = BoundsCalculator::default().derive(&anchors(5), 14.0, 3.0, 0);
    let mut without_bonus = with_bonus.clone();

    QuantityAllocator::new(12, 100_000).allocate(&mut with_bonus, 500);
    QuantityAllocator::new(0, 100_000).allocate(&mut without_bonus, 500);

    assert_eq!(allocated(&with_bonus), allocated(&without_bonus));
}

#[test]
fn test_allocation_is_deterministic() {
    let mut first = BoundsCalculator::default().derive(&anchors(12), 9.3, 4.1, 1);
    let mut second = first.clone();

    QuantityAllocator::default().allocate(&mut first, 1_037);
    QuantityAllocator::default().allocate(&mut second, 1_037);

    assert_eq!(first, second);
}
