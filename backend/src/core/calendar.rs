//! Calendar month enumeration
//!
//! A period is split into whole calendar months. Each month is identified by
//! its first-of-month anchor; there is no day-level proration.

use chrono::{Datelike, Months, NaiveDate};

/// Expand a reading period into its calendar months
///
/// Returns first-of-month anchors from the start date's month through the
/// end date's month inclusive, in ascending order. Always yields at least
/// one month: an end date in the same month as (or before) the start date
/// produces just the start month.
///
/// # Example
/// ```
/// use chrono::NaiveDate;
/// use consumption_allocator_core_rs::core::calendar::months_between;
///
/// let start = NaiveDate::from_ymd_opt(2024, 11, 17).unwrap();
/// let end = NaiveDate::from_ymd_opt(2025, 2, 3).unwrap();
/// let months = months_between(start, end);
///
/// assert_eq!(months.len(), 4);
/// assert_eq!(months[0], NaiveDate::from_ymd_opt(2024, 11, 1).unwrap());
/// assert_eq!(months[3], NaiveDate::from_ymd_opt(2025, 2, 1).unwrap());
/// ```
pub fn months_between(start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
    let first = first_of_month(start);
    let count = month_span(start, end);

    std::iter::successors(Some(first), |anchor| {
        anchor.checked_add_months(Months::new(1))
    })
    .take(count)
    .collect()
}

/// Number of calendar months covered by `start..=end` (at least 1)
pub fn month_span(start: NaiveDate, end: NaiveDate) -> usize {
    let span = (end.year() as i64 - start.year() as i64) * 12 + end.month() as i64
        - start.month() as i64
        + 1;
    span.max(1) as usize
}

/// First day of the month containing `date`
pub fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

/// Display label for a month anchor (`MM/YYYY`)
pub fn month_label(anchor: NaiveDate) -> String {
    anchor.format("%m/%Y").to_string()
}
