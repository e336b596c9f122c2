//! Event logging for allocation auditing
//!
//! Every decision the engine takes is recorded as an [`Event`], in the order
//! it happened. The log makes a run explainable after the fact: which bounds
//! each month got, whether minimums had to be relaxed, which balancing moves
//! were accepted, and where the final rounding residual landed.
//!
//! # Event Types
//!
//! - **Bounds**: per-month bounds and fixed flags, minimum relaxation
//! - **Allocation**: quantity allocation result, shortfall
//! - **Balancing**: accepted unit moves, balancing summary
//! - **Residual**: per-month rounding adjustments
//!
//! # Example
//!
//! ```rust
//! use consumption_allocator_core_rs::models::{Event, EventLog};
//!
//! let mut log = EventLog::new();
//! log.log(Event::BalanceMove {
//!     trial: 17,
//!     recipient: 0,
//!     donor: 1,
//!     delta_millis: 325,
//! });
//!
//! assert_eq!(log.events_of_type("BalanceMove").len(), 1);
//! assert_eq!(log.events_for_month(1).len(), 1);
//! ```

use serde::{Deserialize, Serialize};

/// Allocation event capturing one engine decision
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    /// Bounds assigned to a month
    BoundsDerived {
        month: usize,
        min_units: i64,
        max_units: i64,
        fixed: bool,
    },

    /// Non-fixed minimums scaled down to fit the quantity target
    MinimumsRelaxed {
        available_units: i64,
        original_sum: i64,
        relaxed_sum: i64,
    },

    /// Quantity allocation finished
    QuantityAllocated {
        target_units: i64,
        allocated_units: i64,
        remainder_steps: usize,
    },

    /// Allocation could not reach the quantity target
    QuantityShortfall {
        target_units: i64,
        allocated_units: i64,
    },

    /// Balancer moved one unit from `donor` to `recipient`
    BalanceMove {
        trial: usize,
        recipient: usize,
        donor: usize,
        delta_millis: i64,
    },

    /// Balancer stopped
    BalanceFinished {
        trials: usize,
        accepted_moves: usize,
        remaining_gap_millis: i64,
    },

    /// Residual correction applied to a month's displayed value
    ResidualApplied { month: usize, adjustment_millis: i64 },
}

impl Event {
    /// Get the event type as a string
    pub fn event_type(&self) -> &'static str {
        match self {
            Event::BoundsDerived { .. } => "BoundsDerived",
            Event::MinimumsRelaxed { .. } => "MinimumsRelaxed",
            Event::QuantityAllocated { .. } => "QuantityAllocated",
            Event::QuantityShortfall { .. } => "QuantityShortfall",
            Event::BalanceMove { .. } => "BalanceMove",
            Event::BalanceFinished { .. } => "BalanceFinished",
            Event::ResidualApplied { .. } => "ResidualApplied",
        }
    }

    /// Whether the event concerns the month at `index`
    pub fn involves_month(&self, index: usize) -> bool {
        match self {
            Event::BoundsDerived { month, .. } | Event::ResidualApplied { month, .. } => {
                *month == index
            }
            Event::BalanceMove {
                recipient, donor, ..
            } => *recipient == index || *donor == index,
            _ => false,
        }
    }
}

/// Ordered log of allocation events
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EventLog {
    events: Vec<Event>,
}

impl EventLog {
    /// Create a new empty event log
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    /// Add an event to the log
    pub fn log(&mut self, event: Event) {
        self.events.push(event);
    }

    /// Get the number of events logged
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Check if the log is empty
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Get all events
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Get events of a specific type
    pub fn events_of_type(&self, event_type: &str) -> Vec<&Event> {
        self.events
            .iter()
            .filter(|e| e.event_type() == event_type)
            .collect()
    }

    /// Get events touching a specific month
    pub fn events_for_month(&self, index: usize) -> Vec<&Event> {
        self.events
            .iter()
            .filter(|e| e.involves_month(index))
            .collect()
    }
}
