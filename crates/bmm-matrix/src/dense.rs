//! Dense binary matrix over a packed `BitStore`.

use bmm_core::MatrixError;

use crate::bitstore::BitStore;
use crate::layout::Layout;
use crate::traits::{BinaryMatrix, MatrixKind};

/// Dense `rows x cols` binary matrix, one bit per cell.
///
/// Bits are packed in the same `Layout` as the input buffer, so
/// construction is a single linear pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DenseMatrix {
    rows: usize,
    cols: usize,
    layout: Layout,
    bits: BitStore,
}

impl DenseMatrix {
    /// Pack a flat buffer of 0/1 bytes laid out as `layout`.
    pub fn from_values(
        values: &[u8],
        rows: usize,
        cols: usize,
        layout: Layout,
    ) -> Result<Self, MatrixError> {
        Self::pack(values, rows, cols, layout)
    }

    /// Pack a flat buffer of host integers (0/1) laid out as `layout`.
    pub fn from_i32(
        values: &[i32],
        rows: usize,
        cols: usize,
        layout: Layout,
    ) -> Result<Self, MatrixError> {
        Self::pack(values, rows, cols, layout)
    }

    /// Build from a slice of equally long 0/1 rows.
    pub fn from_rows(data: &[Vec<u8>]) -> Result<Self, MatrixError> {
        let rows = data.len();
        let cols = data.first().map_or(0, Vec::len);
        crate::check_shape(rows, cols)?;
        let mut flat = Vec::with_capacity(rows * cols);
        for (row, values) in data.iter().enumerate() {
            if values.len() != cols {
                return Err(MatrixError::RaggedRows {
                    row,
                    expected: cols,
                    actual: values.len(),
                });
            }
            flat.extend_from_slice(values);
        }
        Self::pack(&flat, rows, cols, Layout::RowMajor)
    }

    /// Build a row-major matrix where cell `(r, c)` is `f(r, c)`.
    pub fn from_fn(
        rows: usize,
        cols: usize,
        mut f: impl FnMut(usize, usize) -> bool,
    ) -> Result<Self, MatrixError> {
        let cells = crate::check_shape(rows, cols)?;
        let bits = BitStore::from_fn(cells, |i| f(i / cols, i % cols));
        Ok(Self {
            rows,
            cols,
            layout: Layout::RowMajor,
            bits,
        })
    }

    fn pack<T: Copy + Into<i64>>(
        values: &[T],
        rows: usize,
        cols: usize,
        layout: Layout,
    ) -> Result<Self, MatrixError> {
        let cells = crate::check_shape(rows, cols)?;
        if values.len() != cells {
            return Err(MatrixError::LengthMismatch {
                expected: cells,
                actual: values.len(),
            });
        }

        let mut bits = BitStore::new(cells);
        for (index, &value) in values.iter().enumerate() {
            let value: i64 = value.into();
            match value {
                0 => {}
                1 => bits.set(index, true),
                other => {
                    return Err(MatrixError::InvalidCellValue {
                        index,
                        value: other,
                    })
                }
            }
        }

        tracing::debug!(rows, cols, ?layout, ones = bits.count_ones(), "dense matrix packed");

        Ok(Self {
            rows,
            cols,
            layout,
            bits,
        })
    }

    /// Storage order of the packed bits.
    pub fn layout(&self) -> Layout {
        self.layout
    }

    /// The packed backing store.
    pub fn bits(&self) -> &BitStore {
        &self.bits
    }
}

impl BinaryMatrix for DenseMatrix {
    fn rows(&self) -> usize {
        self.rows
    }

    fn cols(&self) -> usize {
        self.cols
    }

    #[inline]
    fn at(&self, row: usize, col: usize) -> bool {
        assert!(
            row < self.rows && col < self.cols,
            "cell ({row}, {col}) out of range for {}x{} matrix",
            self.rows,
            self.cols
        );
        self.bits
            .get(self.layout.flat_index(row, col, self.rows, self.cols))
    }

    fn kind(&self) -> MatrixKind {
        MatrixKind::Dense
    }

    fn count_ones(&self) -> usize {
        self.bits.count_ones()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_major_access() {
        // [[1,0,0],[1,0,1]]
        let m = DenseMatrix::from_values(&[1, 0, 0, 1, 0, 1], 2, 3, Layout::RowMajor).unwrap();
        assert!(m.at(0, 0));
        assert!(!m.at(0, 1));
        assert!(m.at(1, 0));
        assert!(m.at(1, 2));
        assert_eq!(m.count_ones(), 3);
        assert_eq!(m.kind(), MatrixKind::Dense);
    }

    #[test]
    fn test_column_major_matches_row_major() {
        // Same 2x3 matrix, column-major buffer.
        let row = DenseMatrix::from_values(&[1, 0, 0, 1, 0, 1], 2, 3, Layout::RowMajor).unwrap();
        let col = DenseMatrix::from_values(&[1, 1, 0, 0, 0, 1], 2, 3, Layout::ColumnMajor).unwrap();
        for r in 0..2 {
            for c in 0..3 {
                assert_eq!(row.at(r, c), col.at(r, c), "cell ({r}, {c})");
            }
        }
    }

    #[test]
    fn test_from_rows() {
        let m = DenseMatrix::from_rows(&[vec![0, 1], vec![1, 1], vec![0, 0]]).unwrap();
        assert_eq!((m.rows(), m.cols()), (3, 2));
        assert_eq!(m.preview(2, 2), vec![vec![0, 1], vec![1, 1]]);
    }

    #[test]
    fn test_rejects_non_binary_values() {
        let err = DenseMatrix::from_i32(&[0, 1, 2, 0], 2, 2, Layout::RowMajor).unwrap_err();
        assert_eq!(err, MatrixError::InvalidCellValue { index: 2, value: 2 });
        let err = DenseMatrix::from_i32(&[0, -1, 1, 0], 2, 2, Layout::RowMajor).unwrap_err();
        assert_eq!(err, MatrixError::InvalidCellValue { index: 1, value: -1 });
    }

    #[test]
    fn test_rejects_length_mismatch() {
        let err = DenseMatrix::from_values(&[0, 1, 1], 2, 2, Layout::RowMajor).unwrap_err();
        assert_eq!(err, MatrixError::LengthMismatch { expected: 4, actual: 3 });
    }

    #[test]
    fn test_rejects_empty_shape() {
        assert_eq!(
            DenseMatrix::from_values(&[], 0, 3, Layout::RowMajor).unwrap_err(),
            MatrixError::InvalidShape { rows: 0, cols: 3 }
        );
        assert!(DenseMatrix::from_rows(&[]).is_err());
    }

    #[test]
    fn test_rejects_ragged_rows() {
        let err = DenseMatrix::from_rows(&[vec![0, 1], vec![1]]).unwrap_err();
        assert_eq!(err, MatrixError::RaggedRows { row: 1, expected: 2, actual: 1 });
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn test_at_out_of_range_panics() {
        let m = DenseMatrix::from_fn(2, 2, |_, _| true).unwrap();
        m.at(2, 0);
    }
}
