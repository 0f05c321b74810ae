//! Python bindings for the geothin thinning engine
//!
//! Marshals Python coordinate sequences into the core engine and returns
//! retention masks as lists of booleans.

mod params;

use geothin_core::error::ThinError;
use geothin_core::{Coordinates, DistanceMetric, EARTH_RADIUS_KM, MetricKind, ThinParams, thin};
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

use params::{parse_precision, parse_restart};

pub(crate) fn thin_err(e: ThinError) -> PyErr {
    PyValueError::new_err(e.to_string())
}

/// Convert any iterable of 2-item rows into coordinates.
fn coords_from_py(obj: &Bound<'_, PyAny>) -> PyResult<Coordinates> {
    let mut points = Vec::new();
    for row in obj.try_iter()? {
        let row: Vec<f64> = row?.extract()?;
        if row.len() != 2 {
            return Err(thin_err(ThinError::DimensionMismatch {
                expected: 2,
                got: row.len(),
            }));
        }
        points.push([row[0], row[1]]);
    }
    Ok(Coordinates::from_pairs(points))
}

/// Thin a set of coordinates.
///
/// Returns a list holding the best mask, or one mask per trial when
/// `all_trials` is true. Negative seeds are accepted.
#[pyfunction]
#[pyo3(signature = (
    coordinates,
    thin_dist,
    trials = 10,
    all_trials = false,
    distance = "haversine",
    r = EARTH_RADIUS_KM,
    seed = 42,
    strict = false,
    restart = "from_best",
    precision = "degrees"
))]
#[allow(clippy::too_many_arguments)]
fn thin_points(
    py: Python<'_>,
    coordinates: &Bound<'_, PyAny>,
    thin_dist: f64,
    trials: usize,
    all_trials: bool,
    distance: &str,
    r: f64,
    seed: i64,
    strict: bool,
    restart: &str,
    precision: &str,
) -> PyResult<Vec<Vec<bool>>> {
    let points = coords_from_py(coordinates)?;
    let kind = if strict {
        distance.parse::<MetricKind>().map_err(thin_err)?
    } else {
        MetricKind::parse_lenient(distance)
    };
    let params = ThinParams::builder(thin_dist)
        .trials(trials)
        .collect_all(all_trials)
        .metric(DistanceMetric::resolve(kind, r))
        .restart(parse_restart(restart)?)
        .precision(parse_precision(precision)?)
        .seed(seed as u64)
        .build()
        .map_err(thin_err)?;

    let selection = py
        .detach(|| thin(&points, &params))
        .map_err(thin_err)?;
    Ok(selection
        .into_masks()
        .into_iter()
        .map(|m| m.into_vec())
        .collect())
}

/// Great-circle distance between two lon/lat points in degrees.
#[pyfunction]
#[pyo3(signature = (lon1, lat1, lon2, lat2, r = EARTH_RADIUS_KM))]
fn haversine(lon1: f64, lat1: f64, lon2: f64, lat2: f64, r: f64) -> f64 {
    geothin_core::haversine(lon1, lat1, lon2, lat2, r)
}

/// Straight-line distance between two points.
#[pyfunction]
fn euclidean(x1: f64, y1: f64, x2: f64, y2: f64) -> f64 {
    geothin_core::euclidean(x1, y1, x2, y2)
}

#[pymodule]
fn _geothin(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(thin_points, m)?)?;
    m.add_function(wrap_pyfunction!(haversine, m)?)?;
    m.add_function(wrap_pyfunction!(euclidean, m)?)?;
    m.add("__version__", env!("CARGO_PKG_VERSION"))?;
    Ok(())
}
