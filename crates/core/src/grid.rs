//! Spatial hash grid over point indices.
//!
//! Points are bucketed into square cells keyed by their rounded coordinates
//! divided by the cell size. Cells keep insertion order so that a visitation
//! order can be drawn by permuting cell slots, independent of hashing.

use indexmap::IndexMap;
use rustc_hash::FxBuildHasher;

use crate::metric::DistanceMetric;
use crate::points::Coordinates;

/// Kilometers per degree used to turn a distance into a cell size.
pub const KM_PER_DEGREE: f64 = 111.32;

/// Integer cell coordinates `(round(x / precision), round(y / precision))`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellKey(pub i64, pub i64);

impl CellKey {
    #[inline]
    pub fn of(point: [f64; 2], precision: f64) -> Self {
        Self(
            (point[0] / precision).round() as i64,
            (point[1] / precision).round() as i64,
        )
    }

    #[inline]
    fn offset(self, dx: i64, dy: i64) -> Option<Self> {
        Some(Self(self.0.checked_add(dx)?, self.1.checked_add(dy)?))
    }
}

/// How the cell size is derived from the thinning distance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PrecisionMode {
    /// `thin_distance / 111.32` for every metric (legacy behavior).
    #[default]
    Degrees,
    /// Degrees conversion for great-circle distances, identity for planar.
    MetricNative,
}

impl PrecisionMode {
    pub fn cell_size(self, thin_distance: f64, metric: &DistanceMetric) -> f64 {
        match (self, metric) {
            (Self::MetricNative, DistanceMetric::Planar) => thin_distance,
            _ => thin_distance / KM_PER_DEGREE,
        }
    }
}

/// Mapping from occupied cells to the indices of the points they hold.
#[derive(Debug, Clone)]
pub struct GridIndex {
    precision: f64,
    cells: IndexMap<CellKey, Vec<usize>, FxBuildHasher>,
}

impl GridIndex {
    /// Bucket every point. Indices within a cell stay in ascending order.
    pub fn build(points: &Coordinates, precision: f64) -> Self {
        let mut cells: IndexMap<CellKey, Vec<usize>, FxBuildHasher> = IndexMap::default();
        for (idx, point) in points.iter().enumerate() {
            cells
                .entry(CellKey::of(point, precision))
                .or_default()
                .push(idx);
        }
        Self { precision, cells }
    }

    pub fn precision(&self) -> f64 {
        self.precision
    }

    /// Number of occupied cells.
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Cell key for an arbitrary point under this grid's precision.
    #[inline]
    pub fn key_of(&self, point: [f64; 2]) -> CellKey {
        CellKey::of(point, self.precision)
    }

    /// Occupied cells in first-occurrence order.
    pub fn keys(&self) -> impl Iterator<Item = CellKey> + '_ {
        self.cells.keys().copied()
    }

    /// Points of the cell at `slot` (position in first-occurrence order).
    #[inline]
    pub fn cell_at(&self, slot: usize) -> &[usize] {
        self.cells
            .get_index(slot)
            .map(|(_, pts)| pts.as_slice())
            .unwrap_or(&[])
    }

    pub fn get(&self, key: CellKey) -> Option<&[usize]> {
        self.cells.get(&key).map(Vec::as_slice)
    }

    /// Existing cells in the 3x3 window around `key`, rows (y) outer and
    /// columns (x) inner.
    pub fn neighbors(&self, key: CellKey) -> impl Iterator<Item = &[usize]> + '_ {
        (-1..=1i64)
            .flat_map(move |dy| (-1..=1i64).map(move |dx| (dx, dy)))
            .filter_map(move |(dx, dy)| key.offset(dx, dy))
            .filter_map(move |k| self.get(k))
    }
}
