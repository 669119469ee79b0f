//! BmmErrorCode trait for the host boundary.

/// Every error enum implements this to give the boundary layer a stable
/// error code string alongside the human-readable message.
pub trait BmmErrorCode {
    /// Returns the error code string (e.g., "MATRIX_ERROR").
    fn error_code(&self) -> &'static str;

    /// Returns the formatted boundary string: `[ERROR_CODE] message`.
    fn boundary_string(&self) -> String
    where
        Self: std::fmt::Display,
    {
        format!("[{}] {}", self.error_code(), self)
    }
}

// Error code constants for the host boundary.
pub const MATRIX_ERROR: &str = "MATRIX_ERROR";
pub const SPARSE_STRUCTURE: &str = "SPARSE_STRUCTURE";
pub const INVALID_ARGUMENT: &str = "INVALID_ARGUMENT";
pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
pub const THREAD_POOL_ERROR: &str = "THREAD_POOL_ERROR";
