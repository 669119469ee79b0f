//! Configuration system for the Bernoulli mixture engine.
//! TOML-based, layered resolution: overrides > env > project file > defaults.

pub mod bmm_config;
pub mod em_config;

pub use bmm_config::{BmmConfig, ConfigOverrides};
pub use em_config::{ConvergenceCriterion, EmConfig, InitStrategy};
