//! E-step: posterior responsibilities and the data log-likelihood.
//!
//! Per component the row log-joint is
//! `ln w_k + sum_c ln(1 - t_kc) + sum_{c: x_c = 1} (ln t_kc - ln(1 - t_kc))`,
//! so each row only touches its set columns. Rows are normalized with
//! log-sum-exp.

use bmm_core::constants::E_STEP_CHUNK_ROWS;
use bmm_matrix::BinaryMatrix;
use rayon::prelude::*;

use crate::model::MixtureModel;
use crate::responsibilities::Responsibilities;

/// Log tables derived from the model once per E-step.
struct LogTables {
    components: usize,
    /// `ln w_k + sum_c ln(1 - t_kc)`, per component.
    base: Vec<f64>,
    /// `ln t_kc - ln(1 - t_kc)`, feature-major: feature `c` owns `[c * K..(c + 1) * K]`.
    delta: Vec<f64>,
}

impl LogTables {
    fn new(model: &MixtureModel) -> Self {
        let k_count = model.components();
        let d = model.features();
        let mut base = Vec::with_capacity(k_count);
        let mut delta = vec![0.0; k_count * d];
        for k in 0..k_count {
            let mut acc = model.weight(k).ln();
            for (c, &t) in model.theta(k).iter().enumerate() {
                let log_off = (1.0 - t).ln();
                acc += log_off;
                delta[c * k_count + k] = t.ln() - log_off;
            }
            base.push(acc);
        }
        Self {
            components: k_count,
            base,
            delta,
        }
    }

    /// Fill `out` with the posterior of `ones`' row and return its log-marginal.
    fn fill_row(&self, ones: &[usize], out: &mut [f64]) -> f64 {
        out.copy_from_slice(&self.base);
        for &c in ones {
            let delta = &self.delta[c * self.components..(c + 1) * self.components];
            for (o, &x) in out.iter_mut().zip(delta) {
                *o += x;
            }
        }
        let max = out.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let mut sum = 0.0;
        for o in out.iter_mut() {
            *o = (*o - max).exp();
            sum += *o;
        }
        for o in out.iter_mut() {
            *o /= sum;
        }
        max + sum.ln()
    }
}

/// Recompute `resp` from `model` and return the total log-likelihood.
///
/// Per-row contributions are summed in row order after the pass, so the
/// result does not depend on `parallel`.
pub(crate) fn run(
    matrix: &dyn BinaryMatrix,
    model: &MixtureModel,
    resp: &mut Responsibilities,
    parallel: bool,
) -> f64 {
    let tables = LogTables::new(model);
    let k_count = model.components();
    let mut row_ll = vec![0.0; matrix.rows()];

    let fill_chunk = |(chunk, (resp_chunk, ll_chunk)): (usize, (&mut [f64], &mut [f64]))| {
        let first = chunk * E_STEP_CHUNK_ROWS;
        let mut ones = Vec::new();
        for (offset, (out, ll)) in resp_chunk
            .chunks_mut(k_count)
            .zip(ll_chunk.iter_mut())
            .enumerate()
        {
            matrix.row_ones(first + offset, &mut ones);
            *ll = tables.fill_row(&ones, out);
        }
    };

    if parallel {
        resp.as_mut_slice()
            .par_chunks_mut(E_STEP_CHUNK_ROWS * k_count)
            .zip(row_ll.par_chunks_mut(E_STEP_CHUNK_ROWS))
            .enumerate()
            .for_each(fill_chunk);
    } else {
        resp.as_mut_slice()
            .chunks_mut(E_STEP_CHUNK_ROWS * k_count)
            .zip(row_ll.chunks_mut(E_STEP_CHUNK_ROWS))
            .enumerate()
            .for_each(fill_chunk);
    }

    row_ll.iter().sum()
}
