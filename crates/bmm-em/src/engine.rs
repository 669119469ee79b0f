//! The EM driver.

use std::time::Instant;

use bmm_core::tracing::metrics;
use bmm_core::EmError;
use bmm_matrix::BinaryMatrix;

use crate::convergence::has_converged;
use crate::init::{self, Initializer};
use crate::observer::{IterationObserver, TracingObserver};
use crate::responsibilities::Responsibilities;
use crate::result::EmResult;
use crate::settings::EmSettings;
use crate::{estep, mstep};

/// Fits a Bernoulli mixture to a binary matrix.
///
/// One engine can fit any number of matrices; each `fit` starts from a
/// fresh initial model and shares no state with earlier fits.
pub struct EmEngine {
    settings: EmSettings,
    initializer: Box<dyn Initializer>,
    observer: Box<dyn IterationObserver>,
}

impl EmEngine {
    /// Create an engine. Fails on invalid settings before any data is seen.
    ///
    /// The initializer follows `settings.init` and progress goes to a
    /// [`TracingObserver`] honouring `settings.verbose`.
    pub fn new(settings: EmSettings) -> Result<Self, EmError> {
        settings.validate()?;
        let initializer = init::from_settings(&settings);
        let observer = Box::new(TracingObserver::new(settings.verbose));
        Ok(Self {
            settings,
            initializer,
            observer,
        })
    }

    /// Replace the initializer chosen from the settings.
    pub fn with_initializer(mut self, initializer: impl Initializer + 'static) -> Self {
        self.initializer = Box::new(initializer);
        self
    }

    /// Replace the progress observer.
    pub fn with_observer(mut self, observer: impl IterationObserver + 'static) -> Self {
        self.observer = Box::new(observer);
        self
    }

    pub fn settings(&self) -> &EmSettings {
        &self.settings
    }

    /// Run EM on `matrix` until convergence or `max_iter` iterations.
    ///
    /// Not converging within `max_iter` is reported through
    /// [`EmResult::converged`], not as an error.
    pub fn fit(&self, matrix: &dyn BinaryMatrix) -> Result<EmResult, EmError> {
        if matrix.rows() == 0 || matrix.cols() == 0 {
            return Err(EmError::EmptyInput {
                rows: matrix.rows(),
                cols: matrix.cols(),
            });
        }
        if self.settings.threads > 0 {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(self.settings.threads)
                .build()
                .map_err(|e| EmError::ThreadPool(e.to_string()))?;
            pool.install(|| self.run(matrix))
        } else {
            self.run(matrix)
        }
    }

    fn run(&self, matrix: &dyn BinaryMatrix) -> Result<EmResult, EmError> {
        let settings = &self.settings;
        let rows = matrix.rows();
        let components = settings.components;
        let span = tracing::info_span!(
            metrics::SPAN_FIT,
            rows,
            cols = matrix.cols(),
            components,
            kind = %matrix.kind()
        );
        let _guard = span.enter();
        let start = Instant::now();

        let mut model = self.initializer.initialize(matrix, components)?;
        tracing::debug!(init = self.initializer.name(), "initial model ready");

        let mut resp = Responsibilities::zeros(rows, components);
        let mut log_likelihoods = Vec::with_capacity(settings.max_iter);
        let mut previous: Option<f64> = None;
        let mut converged = false;

        for iteration in 1..=settings.max_iter {
            let ll = estep::run(matrix, &model, &mut resp, settings.parallel);
            let improvement = previous.map(|p| ll - p);
            log_likelihoods.push(ll);
            mstep::run(matrix, &resp, &mut model, settings.epsilon, settings.parallel);
            self.observer.on_iteration(iteration, ll, improvement);

            if let Some(p) = previous {
                if has_converged(settings.convergence, p, ll, settings.tolerance) {
                    converged = true;
                    break;
                }
            }
            previous = Some(ll);
        }

        // Responsibilities must be the posterior under the returned model.
        let final_log_likelihood = estep::run(matrix, &model, &mut resp, settings.parallel);
        let iterations = log_likelihoods.len();
        self.observer.on_finish(iterations, converged);

        let fit_time_ms = start.elapsed().as_millis() as u64;
        if converged {
            if settings.verbose {
                tracing::info!(iterations, final_log_likelihood, fit_time_ms, "EM converged");
            } else {
                tracing::debug!(iterations, final_log_likelihood, fit_time_ms, "EM converged");
            }
        } else {
            tracing::warn!(
                iterations,
                final_log_likelihood,
                fit_time_ms,
                "EM stopped at max_iter without converging"
            );
        }

        Ok(EmResult {
            model,
            responsibilities: resp,
            log_likelihoods,
            iterations,
            converged,
            final_log_likelihood,
        })
    }
}

impl std::fmt::Debug for EmEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EmEngine")
            .field("settings", &self.settings)
            .field("initializer", &self.initializer.name())
            .finish()
    }
}
