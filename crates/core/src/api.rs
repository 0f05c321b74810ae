//! High-level entry points.
//!
//! # Example
//!
//! ```
//! use geothin_core::{Coordinates, DistanceMetric, ThinParams, thin};
//!
//! let points = Coordinates::from_pairs(vec![[0.0, 0.0], [0.0, 0.0005], [1.0, 1.0]]);
//! let params = ThinParams::builder(0.1)
//!     .metric(DistanceMetric::Planar)
//!     .trials(5)
//!     .build()?;
//! let best = thin(&points, &params)?.into_masks().remove(0);
//! assert_eq!(best.retained_count(), 2);
//! # Ok::<(), geothin_core::ThinError>(())
//! ```

use crate::error::Result;
use crate::metric::{DistanceMetric, MetricKind};
use crate::params::ThinParams;
use crate::points::Coordinates;
use crate::selector::{Selection, TrialSelector};

/// Thin `points` so that no two retained points lie within
/// `params.thin_distance` of each other inside a grid neighborhood.
///
/// All arguments are validated before the grid is built.
pub fn thin(points: &Coordinates, params: &ThinParams) -> Result<Selection> {
    params.validate()?;
    points.validate_finite()?;
    Ok(TrialSelector::new(points, params).run())
}

/// Host-shaped entry point.
///
/// `coordinates` is an `n x 2` matrix in column-major order (all x values,
/// then all y values). Any `metric` other than exactly `"haversine"` selects
/// the planar metric. Any integer seed is accepted; negative seeds map to
/// their two's-complement bit pattern. Returns one mask when `all_trials` is
/// false, otherwise one mask per trial.
#[allow(clippy::too_many_arguments)]
pub fn thin_points(
    coordinates: &[f64],
    nrow: usize,
    thin_distance: f64,
    trials: usize,
    all_trials: bool,
    metric: &str,
    radius: f64,
    seed: i64,
) -> Result<Vec<Vec<bool>>> {
    let points = Coordinates::from_column_major(coordinates, nrow)?;
    let params = ThinParams::builder(thin_distance)
        .trials(trials)
        .collect_all(all_trials)
        .metric(DistanceMetric::resolve(
            MetricKind::parse_lenient(metric),
            radius,
        ))
        .seed(seed as u64)
        .build()?;

    Ok(thin(&points, &params)?
        .into_masks()
        .into_iter()
        .map(|m| m.into_vec())
        .collect())
}
