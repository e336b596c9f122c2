//! Orchestrator - the allocation pipeline
//!
//! See `engine.rs` for the full pipeline.

pub mod engine;
pub mod fingerprint;

// Re-export main types for convenience
pub use engine::{distribute, AllocationEngine, AllocationError, EngineConfig};
pub use fingerprint::compute_input_fingerprint;
