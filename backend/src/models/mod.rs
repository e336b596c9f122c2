//! Domain models for the consumption allocator

pub mod event;
pub mod input;
pub mod month;
pub mod result;
pub mod targets;

// Re-exports
pub use event::{Event, EventLog};
pub use input::{InputError, InputRecord, MonthlyFee, TotalizerReading};
pub use month::Month;
pub use result::{AllocationResult, MonthlyRow, Summary};
pub use targets::Targets;
