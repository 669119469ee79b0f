//! EM engine errors.

use super::error_code::{self, BmmErrorCode};
use super::{ConfigError, MatrixError};

/// Errors that stop an EM fit before it produces a result.
///
/// Reaching `max_iter` without meeting the tolerance is not an error;
/// it is reported through `EmResult::converged`.
#[derive(Debug, thiserror::Error)]
pub enum EmError {
    #[error("Number of components must be at least 1, got {0}")]
    InvalidComponents(usize),

    #[error("max_iter must be at least 1, got {0}")]
    InvalidMaxIter(usize),

    #[error("Tolerance must be positive and finite, got {0}")]
    InvalidTolerance(f64),

    #[error("Epsilon must lie in (0, 0.5), got {0}")]
    InvalidEpsilon(f64),

    #[error("Input matrix is empty ({rows}x{cols})")]
    EmptyInput { rows: usize, cols: usize },

    #[error("Initial model has {components} components over {features} features, expected {expected_components}x{expected_features}")]
    ModelShape {
        components: usize,
        features: usize,
        expected_components: usize,
        expected_features: usize,
    },

    #[error("Invalid mixture model: {message}")]
    InvalidModel { message: String },

    #[error("Thread pool error: {0}")]
    ThreadPool(String),

    #[error("Matrix error: {0}")]
    Matrix(#[from] MatrixError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl BmmErrorCode for EmError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidComponents(_)
            | Self::InvalidMaxIter(_)
            | Self::InvalidTolerance(_)
            | Self::InvalidEpsilon(_)
            | Self::EmptyInput { .. }
            | Self::ModelShape { .. }
            | Self::InvalidModel { .. } => error_code::INVALID_ARGUMENT,
            Self::ThreadPool(_) => error_code::THREAD_POOL_ERROR,
            Self::Matrix(e) => e.error_code(),
            Self::Config(e) => e.error_code(),
        }
    }
}
