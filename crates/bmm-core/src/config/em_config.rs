//! EM configuration.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants;

/// How the log-likelihood change is compared against the tolerance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConvergenceCriterion {
    /// `|ll_t - ll_{t-1}| < tolerance`.
    #[default]
    Absolute,
    /// `|ll_t - ll_{t-1}| < tolerance * |ll_{t-1}|`.
    Relative,
}

impl ConvergenceCriterion {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Absolute => "absolute",
            Self::Relative => "relative",
        }
    }
}

impl fmt::Display for ConvergenceCriterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Initialization scheme for the mixture parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InitStrategy {
    /// Seeded farthest-first choice of centre rows.
    #[default]
    FarthestFirst,
    /// Independent uniform draws for every parameter.
    Random,
    /// Random hard assignment of rows followed by one M-step.
    RandomAssignment,
}

impl InitStrategy {
    pub fn name(&self) -> &'static str {
        match self {
            Self::FarthestFirst => "farthest_first",
            Self::Random => "random",
            Self::RandomAssignment => "random_assignment",
        }
    }
}

impl fmt::Display for InitStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Configuration for an EM fit. Unset fields fall back to compiled defaults.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct EmConfig {
    /// Number of mixture components (K). No default; must be supplied.
    pub components: Option<usize>,
    /// Iteration cap. Default: 100.
    pub max_iter: Option<usize>,
    /// Convergence tolerance. Default: 1e-6.
    pub tolerance: Option<f64>,
    /// Absolute or relative tolerance check. Default: absolute.
    pub convergence: Option<ConvergenceCriterion>,
    /// Floor for weights and parameters. Default: 1e-10.
    pub epsilon: Option<f64>,
    /// Seed for random initialization. Default: 42.
    pub seed: Option<u64>,
    /// Initialization scheme. Default: farthest_first.
    pub init: Option<InitStrategy>,
    /// Randomly perturb the initial weights (random init only). Default: false.
    pub perturb_weights: Option<bool>,
    /// Log every iteration at info level. Default: false.
    pub verbose: Option<bool>,
    /// Run E- and M-steps on rayon. Default: true.
    pub parallel: Option<bool>,
    /// Dedicated thread count, 0 = rayon global pool. Default: 0.
    pub threads: Option<usize>,
}

impl EmConfig {
    /// Config for `components` clusters, everything else defaulted.
    pub fn with_components(components: usize) -> Self {
        Self {
            components: Some(components),
            ..Self::default()
        }
    }

    /// Returns the effective iteration cap, defaulting to 100.
    pub fn effective_max_iter(&self) -> usize {
        self.max_iter.unwrap_or(constants::DEFAULT_MAX_ITER)
    }

    /// Returns the effective tolerance, defaulting to 1e-6.
    pub fn effective_tolerance(&self) -> f64 {
        self.tolerance.unwrap_or(constants::DEFAULT_TOLERANCE)
    }

    pub fn effective_convergence(&self) -> ConvergenceCriterion {
        self.convergence.unwrap_or_default()
    }

    /// Returns the effective epsilon floor, defaulting to 1e-10.
    pub fn effective_epsilon(&self) -> f64 {
        self.epsilon.unwrap_or(constants::DEFAULT_EPSILON)
    }

    pub fn effective_seed(&self) -> u64 {
        self.seed.unwrap_or(constants::DEFAULT_SEED)
    }

    pub fn effective_init(&self) -> InitStrategy {
        self.init.unwrap_or_default()
    }

    pub fn effective_perturb_weights(&self) -> bool {
        self.perturb_weights.unwrap_or(false)
    }

    pub fn effective_verbose(&self) -> bool {
        self.verbose.unwrap_or(false)
    }

    pub fn effective_parallel(&self) -> bool {
        self.parallel.unwrap_or(true)
    }

    pub fn effective_threads(&self) -> usize {
        self.threads.unwrap_or(constants::DEFAULT_THREADS)
    }
}
