//! Exact residual correction of displayed values
//!
//! Whatever gap the balancer leaves (plus any fee rounding) is pushed onto
//! the displayed per-month values one millis at a time, visiting months from
//! last to first and wrapping around. The aggregate then equals the target
//! exactly; rounding artifacts land visibly on the later months.

use crate::core::units::clamp_to_i64;
use crate::models::{Event, EventLog, Month};

/// Make `Σ total_millis` equal `target_total_millis`
///
/// Visiting months in reverse order and adding one increment per visit
/// gives every month `⌊|r| / m⌋` increments, plus one more for the last
/// `|r| mod m` months. Returns the residual `r` that was applied.
///
/// The residual is computed in i128, so totals sitting at the i64 limits
/// still land exactly on the target whenever the target is reachable.
///
/// # Example
/// ```
/// use chrono::NaiveDate;
/// use consumption_allocator_core_rs::balancing::correct_residual;
/// use consumption_allocator_core_rs::models::{EventLog, Month};
///
/// let anchor = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
/// let mut months: Vec<Month> = (0..3).map(|i| Month::pinned(i, anchor, 0)).collect();
/// let mut events = EventLog::new();
///
/// let applied = correct_residual(&mut months, 5, &mut events);
///
/// assert_eq!(applied, 5);
/// let totals: Vec<i64> = months.iter().map(|m| m.total_millis).collect();
/// assert_eq!(totals, vec![1, 2, 2]);
/// ```
pub fn correct_residual(
    months: &mut [Month],
    target_total_millis: i64,
    events: &mut EventLog,
) -> i64 {
    let current: i128 = months.iter().map(|m| m.total_millis as i128).sum();
    let residual = target_total_millis as i128 - current;
    if residual == 0 || months.is_empty() {
        return clamp_to_i64(residual);
    }

    let count = months.len() as i128;
    let magnitude = residual.abs();
    let full_rounds = magnitude / count;
    let extra_visits = magnitude % count;

    for (visit, month) in months.iter_mut().rev().enumerate() {
        let visits = full_rounds + i128::from((visit as i128) < extra_visits);
        if visits == 0 {
            continue;
        }
        let adjustment = clamp_to_i64(residual.signum() * visits);
        month.total_millis = clamp_to_i64(month.total_millis as i128 + adjustment as i128);
        events.log(Event::ResidualApplied {
            month: month.index,
            adjustment_millis: adjustment,
        });
    }

    clamp_to_i64(residual)
}
