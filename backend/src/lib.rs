//! Consumption Allocator Core - Rust Engine
//!
//! Reconstructs a plausible month-by-month consumption table for a prepaid
//! meter when only the readings at the start and end of a period are known.
//!
//! # Architecture
//!
//! - **core**: Calendar months and integer unit scaling
//! - **pricing**: Tier resolution and progressive band tariff
//! - **models**: Domain types (InputRecord, Month, Targets, results, events)
//! - **allocation**: Per-month bounds and quantity allocation
//! - **balancing**: Value balancing and exact residual correction
//! - **orchestrator**: The end-to-end allocation pipeline
//! - **rng**: Deterministic random number generation
//!
//! # Critical Invariants
//!
//! 1. Quantities are i64 tenths, money is i64 millis, during allocation
//! 2. All randomness is deterministic (seeded RNG)
//! 3. The final value column always sums exactly to the value target
//! 4. FFI boundary is minimal and safe

// Module declarations
pub mod allocation;
pub mod balancing;
pub mod core;
pub mod models;
pub mod orchestrator;
pub mod pricing;
pub mod rng;

// Re-exports for convenience
pub use allocation::{AllocationOutcome, BoundsCalculator, BoundsPolicy, QuantityAllocator};
pub use balancing::{correct_residual, BalanceOutcome, ValueBalancer};
pub use crate::core::calendar::months_between;
pub use models::{
    event::{Event, EventLog},
    input::{InputError, InputRecord, MonthlyFee, TotalizerReading},
    month::Month,
    result::{AllocationResult, MonthlyRow, Summary},
    targets::Targets,
};
pub use orchestrator::{distribute, AllocationEngine, AllocationError, EngineConfig};
pub use pricing::{resolve_tiers, TariffSchedule, TierPrices, Valuation};
pub use rng::RngManager;

// FFI module (when feature enabled)
#[cfg(feature = "pyo3")]
pub mod ffi;

// PyO3 exports (when feature enabled)
#[cfg(feature = "pyo3")]
use pyo3::prelude::*;

#[cfg(feature = "pyo3")]
#[pymodule]
fn consumption_allocator_core_rs(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<ffi::orchestrator::PyAllocationEngine>()?;
    m.add_function(wrap_pyfunction!(ffi::orchestrator::distribute, m)?)?;
    m.add_function(wrap_pyfunction!(ffi::orchestrator::tiers_for_first_price, m)?)?;
    Ok(())
}
