//! M-step: weights and parameters from responsibilities.
//!
//! Rows are cut into blocks whose boundaries depend only on the row count.
//! Each block accumulates its own partial sums and the partials are combined
//! in block order, so the sequential and parallel paths add the same numbers
//! in the same order.

use bmm_core::constants::{M_STEP_MAX_BLOCKS, M_STEP_MIN_BLOCK_ROWS};
use bmm_matrix::BinaryMatrix;
use rayon::prelude::*;

use crate::model::MixtureModel;
use crate::responsibilities::Responsibilities;

/// Per-block accumulators.
struct Partial {
    /// Responsibility mass per component.
    mass: Vec<f64>,
    /// Responsibility-weighted ones, component-major `K x d`.
    counts: Vec<f64>,
}

fn block_rows(rows: usize) -> usize {
    M_STEP_MIN_BLOCK_ROWS.max(rows.div_ceil(M_STEP_MAX_BLOCKS))
}

fn accumulate(
    matrix: &dyn BinaryMatrix,
    resp: &Responsibilities,
    start: usize,
    end: usize,
) -> Partial {
    let k_count = resp.components();
    let d = matrix.cols();
    let mut mass = vec![0.0; k_count];
    let mut counts = vec![0.0; k_count * d];
    let mut ones = Vec::new();
    for row in start..end {
        matrix.row_ones(row, &mut ones);
        for (k, &r) in resp.row(row).iter().enumerate() {
            mass[k] += r;
            let component = &mut counts[k * d..(k + 1) * d];
            for &c in &ones {
                component[c] += r;
            }
        }
    }
    Partial { mass, counts }
}

/// Maximum-likelihood weights and parameters for `resp`, returned as
/// `(weights, theta)` with `theta` component-major.
///
/// Weights are floored at `epsilon` and renormalized. Parameters are clamped
/// to `[epsilon, 1 - epsilon]`; a component with no mass keeps finite values.
pub(crate) fn estimate(
    matrix: &dyn BinaryMatrix,
    resp: &Responsibilities,
    epsilon: f64,
    parallel: bool,
) -> (Vec<f64>, Vec<f64>) {
    let rows = matrix.rows();
    let d = matrix.cols();
    let k_count = resp.components();
    let block = block_rows(rows);
    let blocks = rows.div_ceil(block);
    let run_block = |b: usize| accumulate(matrix, resp, b * block, ((b + 1) * block).min(rows));

    let partials: Vec<Partial> = if parallel {
        (0..blocks).into_par_iter().map(run_block).collect()
    } else {
        (0..blocks).map(run_block).collect()
    };

    let mut mass = vec![0.0; k_count];
    let mut counts = vec![0.0; k_count * d];
    for partial in &partials {
        for (m, &p) in mass.iter_mut().zip(&partial.mass) {
            *m += p;
        }
        for (c, &p) in counts.iter_mut().zip(&partial.counts) {
            *c += p;
        }
    }

    let n = rows as f64;
    let mut weights: Vec<f64> = mass.iter().map(|&m| (m / n).max(epsilon)).collect();
    let total: f64 = weights.iter().sum();
    for w in &mut weights {
        *w /= total;
    }

    let theta = counts
        .chunks(d)
        .zip(&mass)
        .flat_map(|(row, &m)| {
            let denom = m.max(epsilon);
            row.iter().map(move |&c| (c / denom).clamp(epsilon, 1.0 - epsilon))
        })
        .collect();

    (weights, theta)
}

/// Run the M-step and write the result into `model`.
pub(crate) fn run(
    matrix: &dyn BinaryMatrix,
    resp: &Responsibilities,
    model: &mut MixtureModel,
    epsilon: f64,
    parallel: bool,
) {
    let (weights, theta) = estimate(matrix, resp, epsilon, parallel);
    model.set_parts(weights, theta);
}
