//! Type conversion utilities for FFI boundary
//!
//! Converts between Python dicts and the engine's input, config and result
//! types. Numeric input fields accept numbers or form text; text goes
//! through the same coercion as the input form (comma decimals, empty = 0).

use chrono::NaiveDate;
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use pyo3::types::{PyDict, PyList};

use crate::allocation::BoundsPolicy;
use crate::models::input::{parse_numeric_field, MonthlyFee, CANONICAL_MONTHLY_FEES};
use crate::models::{AllocationResult, InputRecord, MonthlyRow, Summary, TotalizerReading};
use crate::orchestrator::EngineConfig;
use crate::pricing::DEFAULT_STAMP_RATE;

// ========================================================================
// PyDict Extraction Helpers
// ========================================================================

/// Extract a required field from a Python dict with clear error messages.
fn extract_required<'py>(dict: &Bound<'py, PyDict>, key: &str) -> PyResult<Bound<'py, PyAny>> {
    dict.get_item(key)?
        .ok_or_else(|| PyValueError::new_err(format!("Missing required field '{}'", key)))
}

/// Extract a field with a default value if missing.
fn extract_with_default<T>(dict: &Bound<'_, PyDict>, key: &str, default: T) -> PyResult<T>
where
    T: for<'py> FromPyObject<'py>,
{
    match dict.get_item(key)? {
        Some(value) => value.extract(),
        None => Ok(default),
    }
}

/// Extract a numeric field given as a number or as form text.
///
/// Missing fields and `None` read as `default`.
fn extract_number(dict: &Bound<'_, PyDict>, key: &str, default: f64) -> PyResult<f64> {
    match dict.get_item(key)? {
        None => Ok(default),
        Some(value) if value.is_none() => Ok(default),
        Some(value) => match value.extract::<String>() {
            Ok(text) => Ok(parse_numeric_field(&text)),
            Err(_) => value.extract::<f64>(),
        },
    }
}

fn extract_date(dict: &Bound<'_, PyDict>, key: &str) -> PyResult<NaiveDate> {
    let raw: String = extract_required(dict, key)?.extract()?;
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").map_err(|e| {
        PyValueError::new_err(format!("Field '{}' is not a YYYY-MM-DD date: {}", key, e))
    })
}

// ========================================================================
// Input Parsers
// ========================================================================

/// Monthly fee from `monthly_fee_choice` (published fee index) if given,
/// otherwise from `monthly_fee`
fn parse_monthly_fee(dict: &Bound<'_, PyDict>) -> PyResult<f64> {
    match dict.get_item("monthly_fee_choice")? {
        Some(choice) if !choice.is_none() => {
            let index: usize = choice.extract()?;
            MonthlyFee::canonical(index)
                .map(|fee| fee.amount())
                .ok_or_else(|| {
                    PyValueError::new_err(format!(
                        "monthly_fee_choice {} is out of range (0..{})",
                        index,
                        CANONICAL_MONTHLY_FEES.len()
                    ))
                })
        }
        _ => extract_number(dict, "monthly_fee", 0.0),
    }
}

fn parse_reading(dict: &Bound<'_, PyDict>, key: &str) -> PyResult<TotalizerReading> {
    let reading: Bound<'_, PyDict> = extract_required(dict, key)?.downcast_into()?;
    Ok(TotalizerReading {
        total: extract_number(&reading, "total", 0.0)?,
        previous_period: extract_number(&reading, "previous_period", 0.0)?,
        current_period: extract_number(&reading, "current_period", 0.0)?,
        balance: extract_number(&reading, "balance", 0.0)?,
    })
}

/// Convert Python dict to InputRecord
///
/// # Errors
///
/// Returns PyErr if:
/// - Dates or readings are missing
/// - Dates are not `YYYY-MM-DD`
/// - Type conversions fail
pub fn parse_input_record(py_input: &Bound<'_, PyDict>) -> PyResult<InputRecord> {
    let zero_tail = extract_number(py_input, "zero_tail", 0.0)?.max(0.0) as u32;

    Ok(InputRecord {
        start_date: extract_date(py_input, "start_date")?,
        end_date: extract_date(py_input, "end_date")?,
        start_reading: parse_reading(py_input, "start_reading")?,
        end_reading: parse_reading(py_input, "end_reading")?,
        topup1_net: extract_number(py_input, "topup1_net", 0.0)?,
        topup2_net: extract_number(py_input, "topup2_net", 0.0)?,
        first_tier_price: extract_number(py_input, "first_tier_price", 0.0)?,
        second_tier_price: extract_number(py_input, "second_tier_price", 0.0)?,
        third_tier_price: extract_number(py_input, "third_tier_price", 0.0)?,
        stamp_rate: extract_number(py_input, "stamp_rate", DEFAULT_STAMP_RATE)?,
        monthly_fee: parse_monthly_fee(py_input)?,
        zero_tail,
    })
}

/// Convert Python dict to EngineConfig; missing keys keep their defaults
pub fn parse_engine_config(py_config: &Bound<'_, PyDict>) -> PyResult<EngineConfig> {
    let defaults = EngineConfig::default();
    Ok(EngineConfig {
        rng_seed: extract_with_default(py_config, "rng_seed", defaults.rng_seed)?,
        bounds: BoundsPolicy {
            min_factor: extract_with_default(py_config, "min_factor", defaults.bounds.min_factor)?,
            max_factor: extract_with_default(py_config, "max_factor", defaults.bounds.max_factor)?,
        },
        headroom_bonus_pct: extract_with_default(
            py_config,
            "headroom_bonus_pct",
            defaults.headroom_bonus_pct,
        )?,
        max_remainder_steps: extract_with_default(
            py_config,
            "max_remainder_steps",
            defaults.max_remainder_steps,
        )?,
        max_balance_trials: extract_with_default(
            py_config,
            "max_balance_trials",
            defaults.max_balance_trials,
        )?,
        strict_quantity: extract_with_default(py_config, "strict_quantity", defaults.strict_quantity)?,
    })
}

// ========================================================================
// Result Converters
// ========================================================================

fn row_to_py<'py>(py: Python<'py>, row: &MonthlyRow) -> PyResult<Bound<'py, PyDict>> {
    let dict = PyDict::new(py);
    dict.set_item("ordinal", row.ordinal)?;
    dict.set_item("month", &row.month)?;
    dict.set_item("quantity", row.quantity)?;
    dict.set_item("value_excluding_fee", row.value_excluding_fee)?;
    dict.set_item("fee", row.fee)?;
    dict.set_item("value_including_fee", row.value_including_fee)?;
    Ok(dict)
}

fn summary_to_py<'py>(py: Python<'py>, summary: &Summary) -> PyResult<Bound<'py, PyDict>> {
    let dict = PyDict::new(py);
    dict.set_item("quantity_sum", summary.quantity_sum)?;
    dict.set_item("value_excluding_fee_sum", summary.value_excluding_fee_sum)?;
    dict.set_item("fee_sum", summary.fee_sum)?;
    dict.set_item("value_including_fee_sum", summary.value_including_fee_sum)?;
    dict.set_item("quantity_target", summary.quantity_target)?;
    dict.set_item("value_target", summary.value_target)?;
    dict.set_item("quantity_shortfall", summary.quantity_shortfall)?;
    Ok(dict)
}

/// Convert AllocationResult to Python dict
///
/// Keys: `rows`, `summary`, `quantity_target`, `value_target`, `tiers`,
/// `balance`, `rng_seed`, `input_fingerprint`.
pub fn allocation_result_to_py(py: Python, result: &AllocationResult) -> PyResult<Py<PyDict>> {
    let dict = PyDict::new(py);

    let rows = PyList::empty(py);
    for row in &result.rows {
        rows.append(row_to_py(py, row)?)?;
    }
    dict.set_item("rows", rows)?;
    dict.set_item("summary", summary_to_py(py, &result.summary)?)?;
    dict.set_item("quantity_target", result.targets.quantity)?;
    dict.set_item("value_target", result.targets.value)?;

    let tiers = PyDict::new(py);
    tiers.set_item("first", result.tiers.first)?;
    tiers.set_item("second", result.tiers.second)?;
    tiers.set_item("third", result.tiers.third)?;
    dict.set_item("tiers", tiers)?;

    let balance = PyDict::new(py);
    balance.set_item("trials", result.balance.trials)?;
    balance.set_item("accepted_moves", result.balance.accepted_moves)?;
    balance.set_item("remaining_gap_millis", result.balance.remaining_gap_millis)?;
    dict.set_item("balance", balance)?;

    dict.set_item("rng_seed", result.rng_seed)?;
    dict.set_item("input_fingerprint", &result.input_fingerprint)?;

    Ok(dict.into())
}
