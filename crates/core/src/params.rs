//! Thinning parameters.
//!
//! Contains ThinParams and the builder used to assemble and validate them.

use crate::error::{Result, ThinError};
use crate::grid::PrecisionMode;
use crate::metric::DistanceMetric;

/// Where each trial starts from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RestartPolicy {
    /// Start every trial from the best mask found so far (legacy behavior).
    /// After the first trial no later trial can exceed the best count.
    #[default]
    FromBest,
    /// Start every trial from the full, all-retained point set.
    FromFull,
}

/// Parameters for a thinning call.
#[derive(Debug, Clone, PartialEq)]
pub struct ThinParams {
    /// Minimum distance between retained points, in the metric's unit.
    pub thin_distance: f64,

    /// Number of randomized passes.
    pub trials: usize,

    /// Distance model used for every comparison.
    pub metric: DistanceMetric,

    /// How the grid cell size is derived from `thin_distance`.
    pub precision: PrecisionMode,

    /// Starting mask for each trial.
    pub restart: RestartPolicy,

    /// Return every trial's mask instead of only the best one.
    pub collect_all: bool,

    /// Seed for the cell-visitation shuffles.
    pub seed: u64,
}

impl Default for ThinParams {
    fn default() -> Self {
        Self {
            thin_distance: 10.0,
            trials: 10,
            metric: DistanceMetric::default(),
            precision: PrecisionMode::default(),
            restart: RestartPolicy::default(),
            collect_all: false,
            seed: 42,
        }
    }
}

impl ThinParams {
    /// Default parameters with the given thinning distance.
    pub fn new(thin_distance: f64) -> Self {
        Self {
            thin_distance,
            ..Default::default()
        }
    }

    pub fn builder(thin_distance: f64) -> ThinParamsBuilder {
        ThinParamsBuilder {
            params: Self::new(thin_distance),
        }
    }

    /// Check every scalar argument.
    pub fn validate(&self) -> Result<()> {
        if !(self.thin_distance.is_finite() && self.thin_distance > 0.0) {
            return Err(ThinError::invalid(format!(
                "thin distance must be positive and finite, got {}",
                self.thin_distance
            )));
        }
        if self.trials == 0 {
            return Err(ThinError::invalid("trial count must be at least 1"));
        }
        self.metric.validate()
    }

    /// Grid cell size for these parameters.
    pub fn cell_size(&self) -> f64 {
        self.precision.cell_size(self.thin_distance, &self.metric)
    }
}

/// Fluent builder for [`ThinParams`].
#[derive(Debug, Clone)]
pub struct ThinParamsBuilder {
    params: ThinParams,
}

impl ThinParamsBuilder {
    pub fn trials(mut self, trials: usize) -> Self {
        self.params.trials = trials;
        self
    }

    pub fn metric(mut self, metric: DistanceMetric) -> Self {
        self.params.metric = metric;
        self
    }

    pub fn precision(mut self, precision: PrecisionMode) -> Self {
        self.params.precision = precision;
        self
    }

    pub fn restart(mut self, restart: RestartPolicy) -> Self {
        self.params.restart = restart;
        self
    }

    pub fn collect_all(mut self, collect_all: bool) -> Self {
        self.params.collect_all = collect_all;
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.params.seed = seed;
        self
    }

    /// Validate and return the parameters.
    pub fn build(self) -> Result<ThinParams> {
        self.params.validate()?;
        Ok(self.params)
    }
}
