//! Deterministic random number generation
//!
//! CRITICAL: The value balancer draws all of its randomness through this
//! module, seeded from `EngineConfig::rng_seed`.

mod xorshift;

pub use xorshift::RngManager;
