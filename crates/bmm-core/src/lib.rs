//! # bmm-core
//!
//! Foundation crate for the Bernoulli mixture engine.
//! Defines errors, config, tracing setup, and constants shared by
//! `bmm-matrix` and `bmm-em`.

pub mod config;
pub mod constants;
pub mod errors;
pub mod tracing;

pub use config::{BmmConfig, EmConfig};
pub use errors::{BmmErrorCode, ConfigError, EmError, MatrixError};
