//! Top-level configuration with layered resolution.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{ConvergenceCriterion, EmConfig, InitStrategy};
use crate::constants;
use crate::errors::ConfigError;

/// Top-level configuration.
///
/// Resolution order (highest priority first):
/// 1. Explicit overrides (applied via `apply_overrides`)
/// 2. Environment variables (`BMM_EM_*`)
/// 3. Project config (`bmm.toml` in the given root)
/// 4. Compiled defaults
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct BmmConfig {
    pub em: EmConfig,
}

/// Explicit overrides supplied by the caller.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub components: Option<usize>,
    pub max_iter: Option<usize>,
    pub verbose: Option<bool>,
    pub seed: Option<u64>,
    pub threads: Option<usize>,
}

/// Environment variables consulted by `BmmConfig::load`.
pub const ENV_VARS: [&str; 10] = [
    "BMM_EM_COMPONENTS",
    "BMM_EM_MAX_ITER",
    "BMM_EM_TOLERANCE",
    "BMM_EM_CONVERGENCE",
    "BMM_EM_EPSILON",
    "BMM_EM_SEED",
    "BMM_EM_INIT",
    "BMM_EM_VERBOSE",
    "BMM_EM_PARALLEL",
    "BMM_EM_THREADS",
];

impl BmmConfig {
    /// Load configuration with layered resolution rooted at `root`.
    pub fn load(root: &Path, overrides: Option<&ConfigOverrides>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        // Layer 3: project config
        let project_config_path = root.join(constants::CONFIG_FILE_NAME);
        if project_config_path.exists() {
            Self::merge_toml_file(&mut config, &project_config_path)?;
            tracing::debug!(path = %project_config_path.display(), "merged project config");
        }

        // Layer 2: environment variables
        Self::apply_env_overrides(&mut config)?;

        // Layer 1 (highest priority): explicit overrides
        if let Some(overrides) = overrides {
            Self::apply_overrides(&mut config, overrides);
        }

        Self::validate(&config)?;

        Ok(config)
    }

    /// Load configuration from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })?;
        Self::validate(&config)?;
        Ok(config)
    }

    /// Validate the configuration values that are set.
    pub fn validate(config: &BmmConfig) -> Result<(), ConfigError> {
        let em = &config.em;
        if let Some(components) = em.components {
            if components == 0 {
                return Err(ConfigError::ValidationFailed {
                    field: "em.components".to_string(),
                    message: "must be at least 1".to_string(),
                });
            }
        }
        if let Some(max_iter) = em.max_iter {
            if max_iter == 0 {
                return Err(ConfigError::ValidationFailed {
                    field: "em.max_iter".to_string(),
                    message: "must be at least 1".to_string(),
                });
            }
        }
        if let Some(tolerance) = em.tolerance {
            if !(tolerance.is_finite() && tolerance > 0.0) {
                return Err(ConfigError::ValidationFailed {
                    field: "em.tolerance".to_string(),
                    message: "must be positive and finite".to_string(),
                });
            }
        }
        if let Some(epsilon) = em.epsilon {
            if !(epsilon > 0.0 && epsilon < 0.5) {
                return Err(ConfigError::ValidationFailed {
                    field: "em.epsilon".to_string(),
                    message: "must be between 0.0 and 0.5 (exclusive)".to_string(),
                });
            }
        }
        Ok(())
    }

    /// Merge a TOML file into the existing config.
    fn merge_toml_file(config: &mut BmmConfig, path: &Path) -> Result<(), ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;

        let file_config: BmmConfig =
            toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        Self::merge(config, &file_config);
        Ok(())
    }

    /// Merge `other` into `base`; `other` wins wherever it has a value.
    fn merge(base: &mut BmmConfig, other: &BmmConfig) {
        let (b, o) = (&mut base.em, &other.em);
        if o.components.is_some() {
            b.components = o.components;
        }
        if o.max_iter.is_some() {
            b.max_iter = o.max_iter;
        }
        if o.tolerance.is_some() {
            b.tolerance = o.tolerance;
        }
        if o.convergence.is_some() {
            b.convergence = o.convergence;
        }
        if o.epsilon.is_some() {
            b.epsilon = o.epsilon;
        }
        if o.seed.is_some() {
            b.seed = o.seed;
        }
        if o.init.is_some() {
            b.init = o.init;
        }
        if o.perturb_weights.is_some() {
            b.perturb_weights = o.perturb_weights;
        }
        if o.verbose.is_some() {
            b.verbose = o.verbose;
        }
        if o.parallel.is_some() {
            b.parallel = o.parallel;
        }
        if o.threads.is_some() {
            b.threads = o.threads;
        }
    }

    /// Apply environment variable overrides.
    /// Pattern: `BMM_EM_MAX_ITER`, `BMM_EM_TOLERANCE`, etc.
    fn apply_env_overrides(config: &mut BmmConfig) -> Result<(), ConfigError> {
        let em = &mut config.em;
        if let Some(v) = env_parse::<usize>("BMM_EM_COMPONENTS")? {
            em.components = Some(v);
        }
        if let Some(v) = env_parse::<usize>("BMM_EM_MAX_ITER")? {
            em.max_iter = Some(v);
        }
        if let Some(v) = env_parse::<f64>("BMM_EM_TOLERANCE")? {
            em.tolerance = Some(v);
        }
        if let Ok(val) = std::env::var("BMM_EM_CONVERGENCE") {
            em.convergence = Some(match val.as_str() {
                "absolute" => ConvergenceCriterion::Absolute,
                "relative" => ConvergenceCriterion::Relative,
                other => {
                    return Err(ConfigError::InvalidValue {
                        field: "BMM_EM_CONVERGENCE".to_string(),
                        message: format!("unknown criterion '{other}'"),
                    })
                }
            });
        }
        if let Some(v) = env_parse::<f64>("BMM_EM_EPSILON")? {
            em.epsilon = Some(v);
        }
        if let Some(v) = env_parse::<u64>("BMM_EM_SEED")? {
            em.seed = Some(v);
        }
        if let Ok(val) = std::env::var("BMM_EM_INIT") {
            em.init = Some(match val.as_str() {
                "farthest_first" => InitStrategy::FarthestFirst,
                "random" => InitStrategy::Random,
                "random_assignment" => InitStrategy::RandomAssignment,
                other => {
                    return Err(ConfigError::InvalidValue {
                        field: "BMM_EM_INIT".to_string(),
                        message: format!("unknown strategy '{other}'"),
                    })
                }
            });
        }
        if let Some(v) = env_parse::<bool>("BMM_EM_VERBOSE")? {
            em.verbose = Some(v);
        }
        if let Some(v) = env_parse::<bool>("BMM_EM_PARALLEL")? {
            em.parallel = Some(v);
        }
        if let Some(v) = env_parse::<usize>("BMM_EM_THREADS")? {
            em.threads = Some(v);
        }
        Ok(())
    }

    /// Apply explicit overrides (highest priority).
    fn apply_overrides(config: &mut BmmConfig, overrides: &ConfigOverrides) {
        if let Some(v) = overrides.components {
            config.em.components = Some(v);
        }
        if let Some(v) = overrides.max_iter {
            config.em.max_iter = Some(v);
        }
        if let Some(v) = overrides.verbose {
            config.em.verbose = Some(v);
        }
        if let Some(v) = overrides.seed {
            config.em.seed = Some(v);
        }
        if let Some(v) = overrides.threads {
            config.em.threads = Some(v);
        }
    }

    /// Serialize the config back to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError {
            path: "<serialization>".to_string(),
            message: e.to_string(),
        })
    }
}

/// Parse an environment variable, treating an unset variable as `None`.
fn env_parse<T: std::str::FromStr>(key: &str) -> Result<Option<T>, ConfigError>
where
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(val) => val
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|e| ConfigError::InvalidValue {
                field: key.to_string(),
                message: e.to_string(),
            }),
        Err(_) => Ok(None),
    }
}
