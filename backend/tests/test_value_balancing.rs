//! Tests for the value balancer and residual corrector
//!
//! The balancer is best-effort: these tests check that it only ever moves
//! toward the target, keeps quantities and bounds intact, and is exactly
//! reproducible for a given seed. Exactness is the corrector's job.

use chrono::NaiveDate;
use consumption_allocator_core_rs::balancing::{correct_residual, ValueBalancer};
use consumption_allocator_core_rs::pricing::{TariffSchedule, TierPrices, Valuation};
use consumption_allocator_core_rs::{EventLog, Month, RngManager};

fn tariff() -> TariffSchedule {
    TariffSchedule::new(TierPrices::resolve(2.50, 0.0, 0.0), 0.036)
}

/// Five free months sitting exactly on the first band boundary, plus a
/// fixed final month
fn boundary_months(tariff: &TariffSchedule) -> Vec<Month> {
    let mut months: Vec<Month> = (0..5)
        .map(|i| {
            let anchor = NaiveDate::from_ymd_opt(2025, i as u32 + 1, 1).unwrap();
            let mut month = Month::free(i, anchor, 150, 510);
            month.allocated_units = 300;
            month
        })
        .collect();
    months.push(Month::pinned(
        5,
        NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
        300,
    ));
    for month in &mut months {
        month.value_millis = tariff.value_millis(month.allocated_units);
    }
    months
}

fn value_sum(months: &[Month]) -> i64 {
    months.iter().map(|m| m.value_millis).sum()
}

fn unit_sum(months: &[Month]) -> i64 {
    months.iter().map(|m| m.allocated_units).sum()
}

#[test]
fn test_balancer_moves_toward_higher_target() {
    let tariff = tariff();
    let mut months = boundary_months(&tariff);
    let start_value = value_sum(&months);
    let target = start_value + 5_000;
    let mut rng = RngManager::new(42);
    let mut events = EventLog::new();

    let outcome = ValueBalancer::default().balance(&mut months, &tariff, target, &mut rng, &mut events);

    assert!(outcome.accepted_moves > 0);
    assert!(outcome.remaining_gap_millis.abs() < 5_000);
    assert_eq!(outcome.remaining_gap_millis, target - value_sum(&months));
    assert_eq!(unit_sum(&months), 1_800, "moves preserve total quantity");
}

#[test]
fn test_balancer_respects_bounds_and_fixed_month() {
    let tariff = tariff();
    let mut months = boundary_months(&tariff);
    let mut rng = RngManager::new(7);
    let mut events = EventLog::new();

    // Far above anything reachable: pushes months to their limits
    ValueBalancer::default().balance(&mut months, &tariff, 10_000_000, &mut rng, &mut events);

    for month in &months[..5] {
        assert!(month.allocated_units >= 150 && month.allocated_units <= 510);
    }
    assert_eq!(months[5].allocated_units, 300);
    assert!(events.events_for_month(5).is_empty());
}

#[test]
fn test_balancer_values_stay_consistent_with_tariff() {
    let tariff = tariff();
    let mut months = boundary_months(&tariff);
    let target = value_sum(&months) + 2_500;
    let mut rng = RngManager::new(2024);
    let mut events = EventLog::new();

    ValueBalancer::default().balance(&mut months, &tariff, target, &mut rng, &mut events);

    for month in &months {
        assert_eq!(month.value_millis, tariff.value_millis(month.allocated_units));
    }
}

#[test]
fn test_balancer_never_accepts_worsening_move() {
    let tariff = tariff();
    let mut months = boundary_months(&tariff);
    let target = value_sum(&months) + 3_333;
    let mut rng = RngManager::new(99);
    let mut events = EventLog::new();

    ValueBalancer::default().balance(&mut months, &tariff, target, &mut rng, &mut events);

    let mut gap = target - value_sum(&boundary_months(&tariff));
    for event in events.events_of_type("BalanceMove") {
        if let consumption_allocator_core_rs::Event::BalanceMove { delta_millis, .. } = event {
            let next_gap = gap - delta_millis;
            assert!(next_gap.abs() < gap.abs(), "move widened the gap");
            gap = next_gap;
        }
    }
}

#[test]
fn test_balancer_same_seed_same_moves() {
    let tariff = tariff();
    let target = value_sum(&boundary_months(&tariff)) + 4_000;

    let run = |seed: u64| {
        let mut months = boundary_months(&tariff);
        let mut rng = RngManager::new(seed);
        let mut events = EventLog::new();
        let outcome =
            ValueBalancer::default().balance(&mut months, &tariff, target, &mut rng, &mut events);
        (months, outcome, events)
    };

    assert_eq!(run(11), run(11));
}

#[test]
fn test_trial_budget_is_honoured() {
    let tariff = tariff();
    let mut months = boundary_months(&tariff);
    let mut rng = RngManager::new(3);
    let mut events = EventLog::new();

    let outcome = ValueBalancer::new(25).balance(&mut months, &tariff, 10_000_000, &mut rng, &mut events);

    assert_eq!(outcome.trials, 25);
    assert!(outcome.accepted_moves <= 25);
}

// ============================================================================
// Residual correction
// ============================================================================

#[test]
fn test_residual_correction_is_exact() {
    let tariff = tariff();
    let mut months = boundary_months(&tariff);
    for month in &mut months {
        month.fee_millis = 6_200;
        month.total_millis = month.value_millis + month.fee_millis;
    }
    let mut events = EventLog::new();
    let target = 600_001;

    let applied = correct_residual(&mut months, target, &mut events);

    let total: i64 = months.iter().map(|m| m.total_millis).sum();
    assert_eq!(total, target);
    assert_eq!(applied, target - 6 * (76_080 + 6_200));
}

#[test]
fn test_residual_lands_on_later_months() {
    let tariff = tariff();
    let mut months = boundary_months(&tariff);
    for month in &mut months {
        month.total_millis = month.value_millis;
    }
    let before: Vec<i64> = months.iter().map(|m| m.total_millis).collect();
    let mut events = EventLog::new();

    correct_residual(&mut months, before.iter().sum::<i64>() - 2, &mut events);

    assert_eq!(months[5].total_millis, before[5] - 1);
    assert_eq!(months[4].total_millis, before[4] - 1);
    assert_eq!(months[0].total_millis, before[0]);
    assert_eq!(events.events_of_type("ResidualApplied").len(), 2);
}
