//! Python bindings (feature `pyo3`)

pub mod orchestrator;
pub mod types;
