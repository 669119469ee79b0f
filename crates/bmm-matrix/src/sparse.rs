//! Compressed-column sparse binary matrix.
//!
//! Column `c` owns `row_indices[col_offsets[c]..col_offsets[c + 1]]`, the
//! strictly increasing rows whose cell is 1. Every other cell is 0 and is
//! never stored.

use bmm_core::MatrixError;

use crate::bitstore::BitStore;
use crate::traits::{BinaryMatrix, MatrixKind};

/// Sparse `rows x cols` binary matrix in compressed-column layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SparseMatrix {
    rows: usize,
    cols: usize,
    col_offsets: Vec<usize>,
    row_indices: Vec<usize>,
    /// Rows holding at least one set cell; lets `at` skip the search for empty rows.
    occupied_rows: BitStore,
}

impl SparseMatrix {
    /// Build from column offsets (length `cols + 1`) and row indices.
    ///
    /// Rejects, never repairs, malformed structure: bad offsets, row
    /// indices outside `[0, rows)`, and unsorted or duplicate row indices
    /// within a column.
    pub fn new(
        col_offsets: Vec<usize>,
        row_indices: Vec<usize>,
        rows: usize,
        cols: usize,
    ) -> Result<Self, MatrixError> {
        crate::check_shape(rows, cols)?;
        validate_offsets(&col_offsets, row_indices.len(), cols)?;

        let mut occupied_rows = BitStore::new(rows);
        for col in 0..cols {
            let column = &row_indices[col_offsets[col]..col_offsets[col + 1]];
            for (position, &row) in column.iter().enumerate() {
                if row >= rows {
                    return Err(MatrixError::RowIndexOutOfRange { col, row, rows });
                }
                if position > 0 && column[position - 1] >= row {
                    return Err(MatrixError::UnsortedRowIndices {
                        col,
                        position: col_offsets[col] + position,
                    });
                }
                occupied_rows.set(row, true);
            }
        }

        tracing::debug!(rows, cols, nnz = row_indices.len(), "sparse matrix built");

        Ok(Self {
            rows,
            cols,
            col_offsets,
            row_indices,
            occupied_rows,
        })
    }

    /// Build from host signed integer vectors, rejecting negative entries.
    pub fn from_i32(
        col_offsets: &[i32],
        row_indices: &[i32],
        rows: usize,
        cols: usize,
    ) -> Result<Self, MatrixError> {
        Self::new(
            to_indices("col_offsets", col_offsets)?,
            to_indices("row_indices", row_indices)?,
            rows,
            cols,
        )
    }

    /// Compress any binary matrix into column layout.
    pub fn from_matrix(matrix: &dyn BinaryMatrix) -> Self {
        let (rows, cols) = (matrix.rows(), matrix.cols());
        let mut col_offsets = Vec::with_capacity(cols + 1);
        let mut row_indices = Vec::new();
        let mut occupied_rows = BitStore::new(rows);
        col_offsets.push(0);
        for col in 0..cols {
            for row in 0..rows {
                if matrix.at(row, col) {
                    row_indices.push(row);
                    occupied_rows.set(row, true);
                }
            }
            col_offsets.push(row_indices.len());
        }
        Self {
            rows,
            cols,
            col_offsets,
            row_indices,
            occupied_rows,
        }
    }

    /// Number of set cells.
    pub fn nnz(&self) -> usize {
        self.row_indices.len()
    }

    /// Sorted rows set in column `col`.
    pub fn column(&self, col: usize) -> &[usize] {
        &self.row_indices[self.col_offsets[col]..self.col_offsets[col + 1]]
    }

    pub fn col_offsets(&self) -> &[usize] {
        &self.col_offsets
    }

    pub fn row_indices(&self) -> &[usize] {
        &self.row_indices
    }
}

impl BinaryMatrix for SparseMatrix {
    fn rows(&self) -> usize {
        self.rows
    }

    fn cols(&self) -> usize {
        self.cols
    }

    /// O(log(column occupancy)) binary search.
    #[inline]
    fn at(&self, row: usize, col: usize) -> bool {
        assert!(
            row < self.rows && col < self.cols,
            "cell ({row}, {col}) out of range for {}x{} matrix",
            self.rows,
            self.cols
        );
        if !self.occupied_rows.get(row) {
            return false;
        }
        self.column(col).binary_search(&row).is_ok()
    }

    fn kind(&self) -> MatrixKind {
        MatrixKind::Sparse
    }

    fn count_ones(&self) -> usize {
        self.nnz()
    }

    fn column_means(&self) -> Vec<f64> {
        let rows = self.rows as f64;
        self.col_offsets
            .windows(2)
            .map(|w| (w[1] - w[0]) as f64 / rows)
            .collect()
    }
}

fn validate_offsets(offsets: &[usize], indices: usize, cols: usize) -> Result<(), MatrixError> {
    if offsets.len() != cols + 1 {
        return Err(MatrixError::OffsetsLength {
            expected: cols + 1,
            actual: offsets.len(),
        });
    }
    if offsets[0] != 0 {
        return Err(MatrixError::OffsetsStart { first: offsets[0] });
    }
    if let Some(col) = offsets.windows(2).position(|w| w[1] < w[0]) {
        return Err(MatrixError::OffsetsDecreasing { col });
    }
    let last = offsets[cols];
    if last != indices {
        return Err(MatrixError::OffsetsTotal { last, indices });
    }
    Ok(())
}

fn to_indices(field: &'static str, values: &[i32]) -> Result<Vec<usize>, MatrixError> {
    values
        .iter()
        .enumerate()
        .map(|(position, &value)| {
            usize::try_from(value).map_err(|_| MatrixError::NegativeIndex {
                field,
                position,
                value: i64::from(value),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dense::DenseMatrix;

    /// Columns of [[1,0,0],[1,0,1],[0,1,0],[0,1,1]].
    fn four_by_three() -> SparseMatrix {
        SparseMatrix::new(vec![0, 2, 4, 6], vec![0, 1, 2, 3, 1, 3], 4, 3).unwrap()
    }

    #[test]
    fn test_at_matches_layout() {
        let m = four_by_three();
        let expected = [[1, 0, 0], [1, 0, 1], [0, 1, 0], [0, 1, 1]];
        for (r, row) in expected.iter().enumerate() {
            for (c, &v) in row.iter().enumerate() {
                assert_eq!(m.at(r, c), v == 1, "cell ({r}, {c})");
            }
        }
        assert_eq!(m.nnz(), 6);
        assert_eq!(m.column(2), &[1, 3]);
        assert_eq!(m.kind(), MatrixKind::Sparse);
    }

    #[test]
    fn test_empty_rows_and_columns() {
        // 3x2, only (2, 1) set.
        let m = SparseMatrix::new(vec![0, 0, 1], vec![2], 3, 2).unwrap();
        assert!(!m.at(0, 0));
        assert!(!m.at(0, 1));
        assert!(m.at(2, 1));
        assert_eq!(m.column_means(), vec![0.0, 1.0 / 3.0]);
    }

    #[test]
    fn test_rejects_unsorted_rows() {
        let err = SparseMatrix::new(vec![0, 2], vec![3, 1], 4, 1).unwrap_err();
        assert_eq!(err, MatrixError::UnsortedRowIndices { col: 0, position: 1 });
    }

    #[test]
    fn test_rejects_duplicate_rows() {
        let err = SparseMatrix::new(vec![0, 1, 3], vec![0, 2, 2], 4, 2).unwrap_err();
        assert_eq!(err, MatrixError::UnsortedRowIndices { col: 1, position: 2 });
    }

    #[test]
    fn test_rows_may_restart_at_column_boundary() {
        // Column 0 ends at row 3, column 1 starts at row 0: valid.
        assert!(SparseMatrix::new(vec![0, 2, 3], vec![1, 3, 0], 4, 2).is_ok());
    }

    #[test]
    fn test_rejects_out_of_range_row() {
        let err = SparseMatrix::new(vec![0, 1], vec![4], 4, 1).unwrap_err();
        assert_eq!(err, MatrixError::RowIndexOutOfRange { col: 0, row: 4, rows: 4 });
    }

    #[test]
    fn test_rejects_bad_offsets() {
        assert_eq!(
            SparseMatrix::new(vec![0, 1], vec![0], 2, 2).unwrap_err(),
            MatrixError::OffsetsLength { expected: 3, actual: 2 }
        );
        assert_eq!(
            SparseMatrix::new(vec![1, 1], vec![0], 2, 1).unwrap_err(),
            MatrixError::OffsetsStart { first: 1 }
        );
        assert_eq!(
            SparseMatrix::new(vec![0, 2, 1], vec![0, 1], 2, 2).unwrap_err(),
            MatrixError::OffsetsDecreasing { col: 1 }
        );
        assert_eq!(
            SparseMatrix::new(vec![0, 1, 2], vec![0, 1, 1], 2, 2).unwrap_err(),
            MatrixError::OffsetsTotal { last: 2, indices: 3 }
        );
    }

    #[test]
    fn test_from_i32_rejects_negative() {
        let err = SparseMatrix::from_i32(&[0, 1], &[-1], 2, 1).unwrap_err();
        assert_eq!(
            err,
            MatrixError::NegativeIndex { field: "row_indices", position: 0, value: -1 }
        );
    }

    #[test]
    fn test_from_matrix_round_trips_dense() {
        let dense = DenseMatrix::from_rows(&[
            vec![1, 0, 0],
            vec![1, 0, 1],
            vec![0, 1, 0],
            vec![0, 1, 1],
        ])
        .unwrap();
        let sparse = SparseMatrix::from_matrix(&dense);
        assert_eq!(sparse, four_by_three());
    }
}
