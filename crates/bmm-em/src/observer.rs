//! Per-iteration progress reporting.
//!
//! The engine calls an [`IterationObserver`] once per completed iteration
//! and once at the end of the fit. [`TracingObserver`] is the default and
//! reports through `tracing` with `iteration`, `log_likelihood` and
//! `improvement` fields; callers can plug in their own.

/// Receives progress from the EM loop.
pub trait IterationObserver: Send + Sync {
    /// Called after iteration `iteration` (1-based). `improvement` is
    /// `None` on the first iteration.
    fn on_iteration(&self, iteration: usize, log_likelihood: f64, improvement: Option<f64>);

    /// Called once when the loop stops.
    fn on_finish(&self, _iterations: usize, _converged: bool) {}
}

/// Reports each iteration as a tracing event.
///
/// With `verbose` the events are emitted at `info`, otherwise at `trace`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver {
    verbose: bool,
}

impl TracingObserver {
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }

    pub fn verbose(&self) -> bool {
        self.verbose
    }
}

impl IterationObserver for TracingObserver {
    fn on_iteration(&self, iteration: usize, log_likelihood: f64, improvement: Option<f64>) {
        if self.verbose {
            tracing::info!(
                iteration,
                log_likelihood,
                improvement = ?improvement,
                "EM iteration"
            );
        } else {
            tracing::trace!(
                iteration,
                log_likelihood,
                improvement = ?improvement,
                "EM iteration"
            );
        }
    }

    fn on_finish(&self, iterations: usize, converged: bool) {
        if self.verbose {
            tracing::info!(iterations, converged, "EM finished");
        } else {
            tracing::debug!(iterations, converged, "EM finished");
        }
    }
}

/// Discards all progress.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl IterationObserver for NoopObserver {
    fn on_iteration(&self, _iteration: usize, _log_likelihood: f64, _improvement: Option<f64>) {}
}
