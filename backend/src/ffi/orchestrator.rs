//! PyO3 wrapper for the allocation engine
//!
//! This module provides the Python interface used by the form front end.

use pyo3::exceptions::{PyRuntimeError, PyValueError};
use pyo3::prelude::*;
use pyo3::types::{PyDict, PyList};

use super::types::{allocation_result_to_py, parse_engine_config, parse_input_record};
use crate::orchestrator::{AllocationEngine as RustAllocationEngine, AllocationError, EngineConfig};
use crate::pricing::resolve_tiers;

fn to_py_err(error: AllocationError) -> PyErr {
    match error {
        AllocationError::InvalidInput(_) | AllocationError::InvalidConfig(_) => {
            PyValueError::new_err(error.to_string())
        }
        _ => PyRuntimeError::new_err(error.to_string()),
    }
}

/// Python wrapper for the Rust allocation engine
///
/// # Example (from Python)
///
/// ```python
/// from consumption_allocator_core_rs import AllocationEngine
///
/// engine = AllocationEngine({"rng_seed": 7})
/// result = engine.run({
///     "start_date": "2025-01-05",
///     "end_date": "2025-03-20",
///     "start_reading": {"total": "500", "current_period": "8", "balance": "40"},
///     "end_reading": {"total": "530", "previous_period": "10", "current_period": "8", "balance": "25"},
///     "topup1_net": "120",
///     "first_tier_price": 2.50,
///     "monthly_fee": 6.20,
/// })
/// print(result["summary"]["value_including_fee_sum"], result["value_target"])
/// ```
#[pyclass(name = "AllocationEngine")]
pub struct PyAllocationEngine {
    inner: RustAllocationEngine,
}

#[pymethods]
impl PyAllocationEngine {
    /// Create an engine; `config` keys override the defaults
    ///
    /// # Errors
    ///
    /// Raises ValueError if the configuration is invalid
    #[new]
    #[pyo3(signature = (config = None))]
    fn new(config: Option<&Bound<'_, PyDict>>) -> PyResult<Self> {
        let rust_config = match config {
            Some(dict) => parse_engine_config(dict)?,
            None => EngineConfig::default(),
        };
        let inner = RustAllocationEngine::new(rust_config).map_err(to_py_err)?;
        Ok(PyAllocationEngine { inner })
    }

    /// Run one allocation
    ///
    /// Returns a dict with `rows`, `summary`, `quantity_target`,
    /// `value_target`, `tiers`, `balance`, `rng_seed`, `input_fingerprint`.
    fn run(&self, py: Python, input: &Bound<'_, PyDict>) -> PyResult<Py<PyDict>> {
        let record = parse_input_record(input)?;
        let result = self.inner.run(&record).map_err(to_py_err)?;
        allocation_result_to_py(py, &result)
    }

    /// Seed used for balancer sampling
    fn rng_seed(&self) -> u64 {
        self.inner.config().rng_seed
    }
}

/// One-shot allocation with default tuning
#[pyfunction]
#[pyo3(signature = (input, rng_seed = 1))]
pub fn distribute(py: Python, input: &Bound<'_, PyDict>, rng_seed: u64) -> PyResult<Py<PyDict>> {
    let record = parse_input_record(input)?;
    let result = crate::orchestrator::distribute(&record, rng_seed).map_err(to_py_err)?;
    allocation_result_to_py(py, &result)
}

/// Second and third band prices for a first-tier price, for form captions
#[pyfunction]
pub fn tiers_for_first_price(py: Python, first_tier_price: f64) -> PyResult<Py<PyList>> {
    let (second, third) = resolve_tiers(first_tier_price);
    let list = PyList::new(py, [second, third])?;
    Ok(list.into())
}
