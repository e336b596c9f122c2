//! Month model
//!
//! One row of the allocation: a calendar month with its quantity bounds,
//! the quantity allocated to it, and its monetary values.
//!
//! CRITICAL: Quantities are i64 discretized units, money is i64 millis.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::core::calendar::month_label;
use crate::core::units::from_units;

/// A calendar month within the reading period
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Month {
    /// Zero-based position in the period
    pub index: usize,
    /// First day of the month
    pub anchor: NaiveDate,
    /// Lowest allowed quantity (units)
    pub min_units: i64,
    /// Highest allowed quantity (units)
    pub max_units: i64,
    /// Quantity is externally known; allocator and balancer skip this month
    pub fixed: bool,
    /// Allocated quantity (units)
    pub allocated_units: i64,
    /// Value of the allocated quantity, fee excluded (millis)
    pub value_millis: i64,
    /// Flat monthly fee (millis)
    pub fee_millis: i64,
    /// Displayed value including fee (millis)
    pub total_millis: i64,
}

impl Month {
    /// A free month with the given bounds and nothing allocated yet
    pub fn free(index: usize, anchor: NaiveDate, min_units: i64, max_units: i64) -> Self {
        Self {
            index,
            anchor,
            min_units,
            max_units,
            fixed: false,
            allocated_units: 0,
            value_millis: 0,
            fee_millis: 0,
            total_millis: 0,
        }
    }

    /// A fixed month pinned to `units`
    pub fn pinned(index: usize, anchor: NaiveDate, units: i64) -> Self {
        Self {
            fixed: true,
            allocated_units: units,
            ..Self::free(index, anchor, units, units)
        }
    }

    /// Pin this month to `units`, making it fixed
    pub fn pin(&mut self, units: i64) {
        self.min_units = units;
        self.max_units = units;
        self.allocated_units = units;
        self.fixed = true;
    }

    /// `MM/YYYY` label
    pub fn label(&self) -> String {
        month_label(self.anchor)
    }

    /// Allocated quantity in physical units
    pub fn quantity(&self) -> f64 {
        from_units(self.allocated_units)
    }

    /// Units that can still be added before hitting the maximum
    pub fn headroom(&self) -> i64 {
        self.max_units.saturating_sub(self.allocated_units).max(0)
    }

    /// Can take one more unit
    pub fn can_receive(&self) -> bool {
        !self.fixed && self.allocated_units < self.max_units
    }

    /// Can give up one unit
    pub fn can_donate(&self) -> bool {
        !self.fixed && self.allocated_units > self.min_units
    }
}
