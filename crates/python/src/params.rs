//! Policy name parsing for Python keyword arguments.

use geothin_core::{PrecisionMode, RestartPolicy};
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

/// Parse a restart policy name.
pub fn parse_restart(value: &str) -> PyResult<RestartPolicy> {
    match value {
        "from_best" => Ok(RestartPolicy::FromBest),
        "from_full" => Ok(RestartPolicy::FromFull),
        _ => Err(PyValueError::new_err(format!(
            "Invalid restart policy: {}",
            value
        ))),
    }
}

/// Parse a precision mode name.
pub fn parse_precision(value: &str) -> PyResult<PrecisionMode> {
    match value {
        "degrees" => Ok(PrecisionMode::Degrees),
        "native" => Ok(PrecisionMode::MetricNative),
        _ => Err(PyValueError::new_err(format!(
            "Invalid precision mode: {}",
            value
        ))),
    }
}
