//! Tracing initialization and configuration.

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::constants::LOG_ENV_VAR;

static INIT: Once = Once::new();

/// Initialize the tracing/logging system.
///
/// Reads the `BMM_LOG` environment variable for per-target log levels.
/// Format: `BMM_LOG=bmm_em=debug,bmm_matrix=warn`
///
/// Falls back to `bmm=info` if `BMM_LOG` is not set or is invalid.
/// Idempotent; later calls are no-ops. If another subscriber is already
/// installed globally, that subscriber is kept.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter =
            EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new("bmm=info"));

        let _ = tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_thread_ids(true)
                    .with_file(true)
                    .with_line_number(true),
            )
            .with(filter)
            .try_init();
    });
}
