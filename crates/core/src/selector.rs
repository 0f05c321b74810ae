//! Multi-trial search for a larger retained subset.
//!
//! Each trial draws a fresh permutation of the grid's cells from a generator
//! seeded once per call, runs a [`TrialRunner`] pass, and replaces the best
//! mask only when the retained count strictly increases.

use rand::SeedableRng;
use rand::seq::SliceRandom;
use rand_chacha::ChaCha8Rng;
use tracing::debug;

use crate::grid::GridIndex;
use crate::mask::RetentionMask;
use crate::params::{RestartPolicy, ThinParams};
use crate::points::Coordinates;
use crate::trial::TrialRunner;

/// Result of a thinning call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    /// The best mask across all trials.
    Best(RetentionMask),
    /// Every trial's mask, in trial order.
    AllTrials(Vec<RetentionMask>),
}

impl Selection {
    /// Flatten into a list of masks; `Best` becomes a one-element list.
    pub fn into_masks(self) -> Vec<RetentionMask> {
        match self {
            Self::Best(mask) => vec![mask],
            Self::AllTrials(masks) => masks,
        }
    }

    /// The winning mask: the best one, or the first trial with the highest
    /// retained count.
    pub fn best(&self) -> Option<&RetentionMask> {
        match self {
            Self::Best(mask) => Some(mask),
            Self::AllTrials(masks) => masks.iter().reduce(|best, m| {
                if m.retained_count() > best.retained_count() {
                    m
                } else {
                    best
                }
            }),
        }
    }

    /// Number of masks held.
    pub fn len(&self) -> usize {
        match self {
            Self::Best(_) => 1,
            Self::AllTrials(masks) => masks.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Drives repeated trials over one grid.
pub struct TrialSelector<'a> {
    points: &'a Coordinates,
    params: &'a ThinParams,
    grid: GridIndex,
    rng: ChaCha8Rng,
    trial_counts: Vec<usize>,
}

impl<'a> TrialSelector<'a> {
    /// Build the grid for `points`. Parameters are assumed validated.
    pub fn new(points: &'a Coordinates, params: &'a ThinParams) -> Self {
        let grid = GridIndex::build(points, params.cell_size());
        debug!(
            points = points.len(),
            cells = grid.cell_count(),
            precision = grid.precision(),
            metric = %params.metric.kind(),
            restart = ?params.restart,
            "built thinning grid"
        );
        Self {
            points,
            params,
            grid,
            rng: ChaCha8Rng::seed_from_u64(params.seed),
            trial_counts: Vec::with_capacity(params.trials),
        }
    }

    pub fn grid(&self) -> &GridIndex {
        &self.grid
    }

    /// Retained count of every trial run so far.
    pub fn trial_counts(&self) -> &[usize] {
        &self.trial_counts
    }

    /// Run all trials and return the selection.
    pub fn run(&mut self) -> Selection {
        let n = self.points.len();
        let runner = TrialRunner::new(
            &self.grid,
            self.points,
            self.params.metric,
            self.params.thin_distance,
        );
        let full = RetentionMask::all_retained(n);

        let mut best = full.clone();
        let mut best_count = 0usize;
        let mut all = Vec::new();

        for t in 0..self.params.trials {
            let mut order: Vec<usize> = (0..self.grid.cell_count()).collect();
            order.shuffle(&mut self.rng);

            let start = match self.params.restart {
                RestartPolicy::FromBest => &best,
                RestartPolicy::FromFull => &full,
            };
            let mask = runner.run_unchecked(start, &order);
            let count = mask.retained_count();
            let improved = count > best_count;
            debug!(trial = t, retained = count, improved, "trial finished");
            self.trial_counts.push(count);

            if self.params.collect_all {
                all.push(mask.clone());
            }
            if improved {
                best = mask;
                best_count = count;
            }
        }

        if self.params.collect_all {
            Selection::AllTrials(all)
        } else {
            Selection::Best(best)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metric::DistanceMetric;

    fn planar(thin_distance: f64, trials: usize) -> ThinParams {
        ThinParams::builder(thin_distance)
            .metric(DistanceMetric::Planar)
            .trials(trials)
            .build()
            .unwrap()
    }

    #[test]
    fn records_one_count_per_trial() {
        let points = Coordinates::from_pairs(vec![[0.0, 0.0], [0.0, 0.0005], [1.0, 1.0]]);
        let params = planar(0.1, 4);
        let mut selector = TrialSelector::new(&points, &params);
        let selection = selector.run();

        assert_eq!(selector.trial_counts(), &[2, 2, 2, 2]);
        assert_eq!(selection.len(), 1);
        assert_eq!(selection.best().unwrap().retained_count(), 2);
    }

    #[test]
    fn collect_all_returns_every_trial() {
        let points = Coordinates::from_pairs(vec![[0.0, 0.0], [0.0, 0.0005]]);
        let params = ThinParams {
            collect_all: true,
            ..planar(0.1, 3)
        };
        let selection = TrialSelector::new(&points, &params).run();
        let masks = selection.into_masks();
        assert_eq!(masks.len(), 3);
        assert!(masks.iter().all(|m| m.len() == 2 && m.retained_count() == 1));
    }

    #[test]
    fn best_of_all_trials_picks_first_maximum() {
        let selection = Selection::AllTrials(vec![
            RetentionMask::from(vec![true, false, false]),
            RetentionMask::from(vec![true, true, false]),
            RetentionMask::from(vec![false, true, true]),
        ]);
        assert_eq!(
            selection.best().unwrap().as_slice(),
            &[true, true, false]
        );
        assert!(Selection::AllTrials(Vec::new()).best().is_none());
    }

    #[test]
    fn empty_point_set_yields_empty_mask() {
        let points = Coordinates::default();
        let params = planar(1.0, 2);
        let mut selector = TrialSelector::new(&points, &params);
        let masks = selector.run().into_masks();
        assert_eq!(masks, vec![RetentionMask::default()]);
        assert_eq!(selector.trial_counts(), &[0, 0]);
    }
}
