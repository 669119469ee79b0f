//! Error handling for the Bernoulli mixture engine.
//! One error enum per subsystem, `thiserror` only, zero `anyhow`.

pub mod config_error;
pub mod em_error;
pub mod error_code;
pub mod matrix_error;

pub use config_error::ConfigError;
pub use em_error::EmError;
pub use error_code::BmmErrorCode;
pub use matrix_error::MatrixError;
