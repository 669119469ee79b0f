//! Entry points for hosts that hand over raw integer buffers.
//!
//! Each function validates its arguments and builds the matrix before any
//! EM work, so an invalid call returns an error and never a partial result.
//! Logging is initialized on first use (`BMM_LOG`).

use bmm_core::tracing::init_tracing;
use bmm_core::EmError;
use bmm_matrix::{BinaryMatrix, DenseMatrix, Layout, MatrixInput, SparseMatrix};

use crate::engine::EmEngine;
use crate::export::EmExport;
use crate::settings::EmSettings;

/// Fit a column-major `n x d` 0/1 matrix.
pub fn fit_dense(
    values: &[i32],
    n: usize,
    d: usize,
    components: usize,
    max_iter: usize,
    verbose: bool,
) -> Result<EmExport, EmError> {
    let engine = EmEngine::new(EmSettings::new(components, max_iter).with_verbose(verbose))?;
    let matrix = DenseMatrix::from_i32(values, n, d, Layout::ColumnMajor)?;
    run(&engine, &matrix)
}

/// Fit an `n x d` matrix given as compressed columns.
pub fn fit_sparse(
    col_offsets: &[i32],
    row_indices: &[i32],
    n: usize,
    d: usize,
    components: usize,
    max_iter: usize,
    verbose: bool,
) -> Result<EmExport, EmError> {
    let engine = EmEngine::new(EmSettings::new(components, max_iter).with_verbose(verbose))?;
    let matrix = SparseMatrix::from_i32(col_offsets, row_indices, n, d)?;
    tracing::debug!(nnz = matrix.nnz(), "sparse input");
    run(&engine, &matrix)
}

/// Fit any matrix descriptor with fully specified settings.
pub fn fit_input(input: &MatrixInput, settings: &EmSettings) -> Result<EmExport, EmError> {
    let engine = EmEngine::new(settings.clone())?;
    let matrix = input.build()?;
    run(&engine, &*matrix)
}

fn run(engine: &EmEngine, matrix: &dyn BinaryMatrix) -> Result<EmExport, EmError> {
    init_tracing();
    tracing::debug!(
        kind = %matrix.kind(),
        rows = matrix.rows(),
        cols = matrix.cols(),
        corner = ?matrix.preview(2, 2),
        "matrix ready"
    );
    Ok(engine.fit(matrix)?.into_export())
}

#[cfg(test)]
mod tests {
    use super::*;
    use bmm_core::{BmmErrorCode, MatrixError};

    #[test]
    fn test_invalid_settings_reported_before_matrix() {
        // Bad cell value and bad K: the settings error wins.
        let err = fit_dense(&[2], 1, 1, 0, 10, false).unwrap_err();
        assert!(matches!(err, EmError::InvalidComponents(0)));
    }

    #[test]
    fn test_bad_cell_value() {
        let err = fit_dense(&[0, 1, 3, 0], 2, 2, 1, 10, false).unwrap_err();
        assert!(matches!(
            err,
            EmError::Matrix(MatrixError::InvalidCellValue { index: 2, value: 3 })
        ));
        assert_eq!(err.error_code(), "MATRIX_ERROR");
    }

    #[test]
    fn test_sparse_structure_error_code() {
        let err = fit_sparse(&[0, 2], &[1, 0], 2, 1, 1, 10, false).unwrap_err();
        assert_eq!(err.error_code(), "SPARSE_STRUCTURE");
    }
}
