//! Single greedy suppression pass over the grid.
//!
//! Cells are visited in a caller-supplied order and the points inside a cell
//! in ascending index order. Every point that is still retained when visited
//! suppresses all other retained points within the thinning distance that
//! sit in its 3x3 cell neighborhood. Suppressed points never suppress
//! others, so the outcome depends on the visitation order.

use crate::error::Result;
use crate::grid::GridIndex;
use crate::mask::RetentionMask;
use crate::metric::DistanceMetric;
use crate::points::Coordinates;

/// Inputs shared by every trial of one thinning call.
#[derive(Debug, Clone, Copy)]
pub struct TrialRunner<'a> {
    grid: &'a GridIndex,
    points: &'a Coordinates,
    metric: DistanceMetric,
    thin_distance: f64,
}

impl<'a> TrialRunner<'a> {
    pub fn new(
        grid: &'a GridIndex,
        points: &'a Coordinates,
        metric: DistanceMetric,
        thin_distance: f64,
    ) -> Self {
        Self {
            grid,
            points,
            metric,
            thin_distance,
        }
    }

    /// Run one pass starting from a copy of `starting`.
    ///
    /// `cell_order` holds cell slots (see [`GridIndex::cell_at`]); it is
    /// normally a permutation of `0..grid.cell_count()`. Unknown slots are
    /// skipped. Fails if `starting` does not hold one entry per point.
    pub fn run(&self, starting: &RetentionMask, cell_order: &[usize]) -> Result<RetentionMask> {
        starting.check_len(self.points.len())?;
        Ok(self.run_unchecked(starting, cell_order))
    }

    /// Pass body; `starting` must already match the point count.
    pub(crate) fn run_unchecked(
        &self,
        starting: &RetentionMask,
        cell_order: &[usize],
    ) -> RetentionMask {
        let mut mask = starting.clone();

        for &slot in cell_order {
            for &p1 in self.grid.cell_at(slot) {
                if !mask.is_retained(p1) {
                    continue;
                }
                self.suppress_around(p1, &mut mask);
            }
        }

        mask
    }

    fn suppress_around(&self, p1: usize, mask: &mut RetentionMask) {
        let a = self.points.get(p1);
        let key = self.grid.key_of(a);

        for bucket in self.grid.neighbors(key) {
            for &p2 in bucket {
                if p2 == p1 || !mask.is_retained(p2) {
                    continue;
                }
                if self.metric.distance(a, self.points.get(p2)) <= self.thin_distance {
                    mask.suppress(p2);
                }
            }
        }
    }
}
