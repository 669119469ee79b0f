//! Shared constants for the Bernoulli mixture engine.

/// Default iteration cap for EM.
pub const DEFAULT_MAX_ITER: usize = 100;

/// Default convergence tolerance on the log-likelihood change.
pub const DEFAULT_TOLERANCE: f64 = 1e-6;

/// Floor applied to weights, responsibility mass, and Bernoulli parameters.
pub const DEFAULT_EPSILON: f64 = 1e-10;

/// Default seed for random initialization.
pub const DEFAULT_SEED: u64 = 42;

/// Default number of rayon threads (0 = rayon's global pool).
pub const DEFAULT_THREADS: usize = 0;

/// Parameter value for features set in a farthest-first centre row.
pub const CENTRE_HIGH: f64 = 0.75;

/// Parameter value for features clear in a farthest-first centre row.
pub const CENTRE_LOW: f64 = 0.25;

/// Range of random Bernoulli parameters drawn at initialization.
pub const RANDOM_THETA_RANGE: (f64, f64) = (0.25, 0.75);

/// Minimum rows per block in the M-step reduction.
pub const M_STEP_MIN_BLOCK_ROWS: usize = 256;

/// Upper bound on M-step blocks. Block boundaries depend only on the row
/// count, so the summation order does not depend on the number of threads.
pub const M_STEP_MAX_BLOCKS: usize = 64;

/// Rows per parallel work unit in the E-step.
pub const E_STEP_CHUNK_ROWS: usize = 64;

/// Project configuration file name.
pub const CONFIG_FILE_NAME: &str = "bmm.toml";

/// Environment variable read by `init_tracing`.
pub const LOG_ENV_VAR: &str = "BMM_LOG";
