//! Quantity side of the engine: bounds derivation and unit allocation

pub mod bounds;
pub mod quantity;

pub use bounds::{BoundsCalculator, BoundsPolicy, Relaxation};
pub use quantity::{AllocationOutcome, QuantityAllocator};
