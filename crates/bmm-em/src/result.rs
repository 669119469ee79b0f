//! The outcome of one EM fit.

use bmm_matrix::Layout;
use serde::{Deserialize, Serialize};

use crate::export::EmExport;
use crate::model::MixtureModel;
use crate::responsibilities::Responsibilities;

/// Fitted model, posteriors and convergence trace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawEmResult")]
pub struct EmResult {
    pub model: MixtureModel,
    /// Posterior under `model`.
    pub responsibilities: Responsibilities,
    /// Log-likelihood at the E-step of each iteration, in order.
    pub log_likelihoods: Vec<f64>,
    /// Iterations performed; always `log_likelihoods.len()`.
    pub iterations: usize,
    pub converged: bool,
    /// Log-likelihood of the data under the returned `model`.
    pub final_log_likelihood: f64,
}

#[derive(Deserialize)]
struct RawEmResult {
    model: MixtureModel,
    responsibilities: Responsibilities,
    log_likelihoods: Vec<f64>,
    iterations: usize,
    converged: bool,
    final_log_likelihood: f64,
}

impl TryFrom<RawEmResult> for EmResult {
    type Error = String;

    fn try_from(raw: RawEmResult) -> Result<Self, Self::Error> {
        if raw.model.components() != raw.responsibilities.components() {
            return Err(format!(
                "model has {} components but responsibilities have {}",
                raw.model.components(),
                raw.responsibilities.components()
            ));
        }
        if raw.iterations != raw.log_likelihoods.len() {
            return Err(format!(
                "{} iterations but {} log-likelihoods",
                raw.iterations,
                raw.log_likelihoods.len()
            ));
        }
        Ok(Self {
            model: raw.model,
            responsibilities: raw.responsibilities,
            log_likelihoods: raw.log_likelihoods,
            iterations: raw.iterations,
            converged: raw.converged,
            final_log_likelihood: raw.final_log_likelihood,
        })
    }
}

impl EmResult {
    /// Most probable component per row.
    pub fn assignments(&self) -> Vec<usize> {
        self.responsibilities.assignments()
    }

    /// Number of rows assigned to each component by [`assignments`](Self::assignments).
    pub fn cluster_sizes(&self) -> Vec<usize> {
        let mut sizes = vec![0; self.model.components()];
        for k in self.assignments() {
            sizes[k] += 1;
        }
        sizes
    }

    /// Free parameters: `K * d` success probabilities and `K - 1` weights.
    pub fn num_parameters(&self) -> usize {
        self.model.components() * self.model.features() + self.model.components() - 1
    }

    /// Bayesian information criterion. Lower is better.
    pub fn bic(&self) -> f64 {
        let n = self.responsibilities.rows() as f64;
        -2.0 * self.final_log_likelihood + self.num_parameters() as f64 * n.ln()
    }

    /// Akaike information criterion. Lower is better.
    pub fn aic(&self) -> f64 {
        -2.0 * self.final_log_likelihood + 2.0 * self.num_parameters() as f64
    }

    /// Package for the host, column-major.
    pub fn into_export(self) -> EmExport {
        self.into_export_with_layout(Layout::ColumnMajor)
    }

    /// Package for the host with matrices flattened in `layout`.
    pub fn into_export_with_layout(self, layout: Layout) -> EmExport {
        EmExport::from_result(self, layout)
    }
}
