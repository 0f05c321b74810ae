//! geothin - Grid-hashed greedy thinning of geographic and planar point sets.
//!
//! Reduces a point set to a subset in which retained points are at least a
//! given distance apart, trying several randomized cell orders and keeping
//! the largest result.

pub mod api;
pub mod error;
pub mod grid;
pub mod mask;
pub mod metric;
pub mod params;
pub mod points;
pub mod selector;
pub mod trial;

pub use api::{thin, thin_points};
pub use error::{Result, ThinError};
pub use grid::{CellKey, GridIndex, PrecisionMode};
pub use mask::RetentionMask;
pub use metric::{DistanceMetric, EARTH_RADIUS_KM, MetricKind, euclidean, haversine};
pub use params::{RestartPolicy, ThinParams, ThinParamsBuilder};
pub use points::{Coordinates, read_delimited};
pub use selector::{Selection, TrialSelector};
pub use trial::TrialRunner;
