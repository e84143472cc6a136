//! Python bindings for secdisclosure using PyO3

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use pyo3::types::PyBytes;

/// Parse submission bytes and return the parsed submission as JSON bytes
///
/// Args:
///     data: Raw submission bytes
///     latin1_fallback: Decode non-UTF-8 input as Latin-1 instead of failing
///
/// Returns:
///     JSON bytes with `header` and `documents`
#[pyfunction]
#[pyo3(signature = (data, latin1_fallback=false))]
fn parse_submission_json(py: Python<'_>, data: &[u8], latin1_fallback: bool) -> PyResult<PyObject> {
    let mut options = crate::ParseOptions::new();
    options.latin1_fallback = latin1_fallback;

    let json = crate::parse_submission_to_json(data, &options)
        .map_err(|e| PyValueError::new_err(format!("Parse error: {}", e)))?;

    Ok(PyBytes::new_bound(py, &json).into())
}

/// Compute disclosure metrics for a document's text, as JSON bytes
#[pyfunction]
fn compute_metrics_json(py: Python<'_>, text: &str) -> PyResult<PyObject> {
    let json = crate::compute_metrics_to_json(text)
        .map_err(|e| PyValueError::new_err(format!("Metrics error: {}", e)))?;

    Ok(PyBytes::new_bound(py, &json).into())
}

/// Python module definition
#[pymodule]
fn secdisclosure(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(parse_submission_json, m)?)?;
    m.add_function(wrap_pyfunction!(compute_metrics_json, m)?)?;
    Ok(())
}
