//! Flat, host-facing form of an [`EmResult`].

use bmm_matrix::Layout;
use serde::{Deserialize, Serialize};

use crate::result::EmResult;

/// Fit result with every matrix flattened in one `layout`.
///
/// `parameters` is `components x cols`, `responsibilities` is
/// `rows x components`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmExport {
    pub rows: usize,
    pub cols: usize,
    pub components: usize,
    pub layout: Layout,
    pub weights: Vec<f64>,
    pub parameters: Vec<f64>,
    pub responsibilities: Vec<f64>,
    pub log_likelihoods: Vec<f64>,
    pub iterations: usize,
    pub converged: bool,
    pub final_log_likelihood: f64,
}

impl EmExport {
    pub(crate) fn from_result(result: EmResult, layout: Layout) -> Self {
        let components = result.model.components();
        let cols = result.model.features();
        let rows = result.responsibilities.rows();

        let mut parameters = vec![0.0; components * cols];
        for k in 0..components {
            for (c, &t) in result.model.theta(k).iter().enumerate() {
                parameters[layout.flat_index(k, c, components, cols)] = t;
            }
        }
        let mut responsibilities = vec![0.0; rows * components];
        for r in 0..rows {
            for (k, &p) in result.responsibilities.row(r).iter().enumerate() {
                responsibilities[layout.flat_index(r, k, rows, components)] = p;
            }
        }

        Self {
            rows,
            cols,
            components,
            layout,
            weights: result.model.weights().to_vec(),
            parameters,
            responsibilities,
            log_likelihoods: result.log_likelihoods,
            iterations: result.iterations,
            converged: result.converged,
            final_log_likelihood: result.final_log_likelihood,
        }
    }

    /// Success probability of feature `col` under component `k`.
    pub fn parameter(&self, k: usize, col: usize) -> f64 {
        self.parameters[self.layout.flat_index(k, col, self.components, self.cols)]
    }

    /// Posterior of component `k` for `row`.
    pub fn responsibility(&self, row: usize, k: usize) -> f64 {
        self.responsibilities[self.layout.flat_index(row, k, self.rows, self.components)]
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
