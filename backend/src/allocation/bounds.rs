//! Per-month quantity bounds
//!
//! Plausible monthly consumption is bracketed around the previous-period
//! consumption shown at the end reading (the reference):
//!
//! - **First month**: at least the current-period consumption already shown
//!   at the start reading, and at least `reference × min_factor`
//! - **Interior months**: `reference × min_factor ..= reference × max_factor`
//! - **Final month**: fixed at exactly the reference
//! - **Zero tail**: the configured number of months right before the final
//!   one are fixed at zero
//!
//! The final-month rule wins when the period is a single month.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::core::units::{saturating_sum, to_units};
use crate::models::Month;

/// Scaling factors applied to the reference consumption
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundsPolicy {
    pub min_factor: f64,
    pub max_factor: f64,
}

impl Default for BoundsPolicy {
    fn default() -> Self {
        Self {
            min_factor: 0.5,
            max_factor: 1.7,
        }
    }
}

impl BoundsPolicy {
    /// Factors are finite and `0 <= min_factor <= max_factor`
    pub fn is_valid(&self) -> bool {
        self.min_factor.is_finite()
            && self.max_factor.is_finite()
            && self.min_factor >= 0.0
            && self.min_factor <= self.max_factor
    }
}

/// What [`BoundsCalculator::relax_minimums`] changed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Relaxation {
    /// Units left for free months once fixed months are served
    pub available_units: i64,
    pub original_sum: i64,
    pub relaxed_sum: i64,
}

/// Derives bounds and fixed flags for every month of a period
#[derive(Debug, Clone, Copy, Default)]
pub struct BoundsCalculator {
    policy: BoundsPolicy,
}

impl BoundsCalculator {
    pub fn new(policy: BoundsPolicy) -> Self {
        Self { policy }
    }

    /// Build the month list with bounds for a period
    ///
    /// # Arguments
    /// * `anchors` - First-of-month anchors, ascending (at least one)
    /// * `reference` - Previous-period consumption at the end reading
    /// * `opening_current` - Current-period consumption at the start reading
    /// * `zero_tail` - Months before the final one forced to zero (clamped to `m - 1`)
    ///
    /// # Example
    /// ```
    /// use chrono::NaiveDate;
    /// use consumption_allocator_core_rs::allocation::BoundsCalculator;
    ///
    /// let anchors: Vec<NaiveDate> = (1..=3)
    ///     .map(|m| NaiveDate::from_ymd_opt(2025, m, 1).unwrap())
    ///     .collect();
    /// let months = BoundsCalculator::default().derive(&anchors, 10.0, 8.0, 0);
    ///
    /// assert_eq!((months[0].min_units, months[0].max_units), (80, 170));
    /// assert_eq!((months[1].min_units, months[1].max_units), (50, 170));
    /// assert!(months[2].fixed);
    /// assert_eq!(months[2].allocated_units, 100);
    /// ```
    pub fn derive(
        &self,
        anchors: &[NaiveDate],
        reference: f64,
        opening_current: f64,
        zero_tail: u32,
    ) -> Vec<Month> {
        let count = anchors.len();
        let floor = (reference * self.policy.min_factor).max(0.0);
        let ceiling = reference * self.policy.max_factor;

        let mut months: Vec<Month> = anchors
            .iter()
            .enumerate()
            .map(|(index, &anchor)| {
                if index + 1 == count {
                    return Month::pinned(index, anchor, to_units(reference.max(0.0)));
                }
                let min = if index == 0 {
                    opening_current.max(floor)
                } else {
                    floor
                };
                let max = min.max(ceiling);
                Month::free(index, anchor, to_units(min), to_units(max))
            })
            .collect();

        let tail = (zero_tail as usize).min(count.saturating_sub(1));
        if tail > 0 {
            for month in &mut months[count - 1 - tail..count - 1] {
                month.pin(0);
            }
        }

        months
    }

    /// Scale free minimums down when they cannot fit the target
    ///
    /// The units available to free months are the target minus everything
    /// fixed months already hold. If the free minimums exceed that, each one
    /// is scaled by `available / sum` (rounded down) and clamped to its own
    /// maximum. Returns `None` when no relaxation was needed.
    pub fn relax_minimums(&self, months: &mut [Month], target_units: i64) -> Option<Relaxation> {
        let fixed_units = saturating_sum(
            months
                .iter()
                .filter(|m| m.fixed)
                .map(|m| m.allocated_units),
        );
        let available_units = target_units.saturating_sub(fixed_units).max(0);
        let original_sum = free_minimum_sum(months);

        if original_sum <= available_units || original_sum <= 0 {
            return None;
        }

        for month in months.iter_mut().filter(|m| !m.fixed) {
            let scaled = month.min_units as i128 * available_units as i128 / original_sum as i128;
            month.min_units = (scaled as i64).min(month.max_units);
        }

        let relaxed_sum = free_minimum_sum(months);

        Some(Relaxation {
            available_units,
            original_sum,
            relaxed_sum,
        })
    }
}

fn free_minimum_sum(months: &[Month]) -> i64 {
    saturating_sum(months.iter().filter(|m| !m.fixed).map(|m| m.min_units))
}
