//! Raw matrix descriptors as handed over by the host boundary.

use bmm_core::MatrixError;
use serde::{Deserialize, Serialize};

use crate::dense::DenseMatrix;
use crate::layout::Layout;
use crate::sparse::SparseMatrix;
use crate::traits::{BinaryMatrix, MatrixKind};

/// A raw binary matrix descriptor. `build` picks the representation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MatrixInput {
    /// Flat 0/1 buffer of `rows * cols` cells.
    Dense {
        values: Vec<i32>,
        rows: usize,
        cols: usize,
        #[serde(default)]
        layout: Layout,
    },
    /// Compressed columns: `col_offsets` of length `cols + 1`, then the
    /// sorted row indices of the set cells.
    Sparse {
        col_offsets: Vec<i32>,
        row_indices: Vec<i32>,
        rows: usize,
        cols: usize,
    },
}

impl MatrixInput {
    /// Validate and build the matrix.
    pub fn build(&self) -> Result<Box<dyn BinaryMatrix>, MatrixError> {
        match self {
            Self::Dense {
                values,
                rows,
                cols,
                layout,
            } => Ok(Box::new(DenseMatrix::from_i32(values, *rows, *cols, *layout)?)),
            Self::Sparse {
                col_offsets,
                row_indices,
                rows,
                cols,
            } => Ok(Box::new(SparseMatrix::from_i32(
                col_offsets,
                row_indices,
                *rows,
                *cols,
            )?)),
        }
    }

    pub fn kind(&self) -> MatrixKind {
        match self {
            Self::Dense { .. } => MatrixKind::Dense,
            Self::Sparse { .. } => MatrixKind::Sparse,
        }
    }

    /// Declared `(rows, cols)`.
    pub fn shape(&self) -> (usize, usize) {
        match self {
            Self::Dense { rows, cols, .. } | Self::Sparse { rows, cols, .. } => (*rows, *cols),
        }
    }
}
