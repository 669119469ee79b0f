//! Resolved EM settings.

use bmm_core::config::{ConvergenceCriterion, EmConfig, InitStrategy};
use bmm_core::errors::ConfigError;
use bmm_core::{constants, EmError};

/// Fully resolved parameters for one EM fit.
///
/// `EmConfig` carries optional, layered values; `EmSettings` is what the
/// engine runs with.
#[derive(Debug, Clone, PartialEq)]
pub struct EmSettings {
    pub components: usize,
    pub max_iter: usize,
    pub tolerance: f64,
    pub convergence: ConvergenceCriterion,
    pub epsilon: f64,
    pub seed: u64,
    pub init: InitStrategy,
    pub perturb_weights: bool,
    pub verbose: bool,
    pub parallel: bool,
    pub threads: usize,
}

impl EmSettings {
    /// Settings for `components` clusters and `max_iter` iterations, the rest defaulted.
    pub fn new(components: usize, max_iter: usize) -> Self {
        Self {
            components,
            max_iter,
            tolerance: constants::DEFAULT_TOLERANCE,
            convergence: ConvergenceCriterion::default(),
            epsilon: constants::DEFAULT_EPSILON,
            seed: constants::DEFAULT_SEED,
            init: InitStrategy::default(),
            perturb_weights: false,
            verbose: false,
            parallel: true,
            threads: constants::DEFAULT_THREADS,
        }
    }

    /// Resolve a layered config. `components` has no default and must be set.
    pub fn from_config(config: &EmConfig) -> Result<Self, EmError> {
        let components = config.components.ok_or_else(|| ConfigError::ValidationFailed {
            field: "em.components".to_string(),
            message: "must be set".to_string(),
        })?;
        let settings = Self {
            components,
            max_iter: config.effective_max_iter(),
            tolerance: config.effective_tolerance(),
            convergence: config.effective_convergence(),
            epsilon: config.effective_epsilon(),
            seed: config.effective_seed(),
            init: config.effective_init(),
            perturb_weights: config.effective_perturb_weights(),
            verbose: config.effective_verbose(),
            parallel: config.effective_parallel(),
            threads: config.effective_threads(),
        };
        settings.validate()?;
        Ok(settings)
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_init(mut self, init: InitStrategy) -> Self {
        self.init = init;
        self
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Check the scalar parameters. Matrix shape is checked by the engine.
    pub fn validate(&self) -> Result<(), EmError> {
        if self.components == 0 {
            return Err(EmError::InvalidComponents(self.components));
        }
        if self.max_iter == 0 {
            return Err(EmError::InvalidMaxIter(self.max_iter));
        }
        if !(self.tolerance.is_finite() && self.tolerance > 0.0) {
            return Err(EmError::InvalidTolerance(self.tolerance));
        }
        if !(self.epsilon > 0.0 && self.epsilon < 0.5) {
            return Err(EmError::InvalidEpsilon(self.epsilon));
        }
        Ok(())
    }
}
