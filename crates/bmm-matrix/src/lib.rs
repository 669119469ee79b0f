//! # bmm-matrix
//!
//! Binary (0/1) matrices for the mixture engine.
//!
//! Algorithms are written once against [`BinaryMatrix`]; the concrete
//! representation is picked at construction time:
//! - [`DenseMatrix`]: one bit per cell in a packed [`BitStore`].
//! - [`SparseMatrix`]: compressed columns, only the set cells are stored.
//!
//! Both variants are read-only after construction.

pub mod bitstore;
pub mod dense;
pub mod input;
pub mod layout;
pub mod sparse;
pub mod traits;

pub use bitstore::BitStore;
pub use dense::DenseMatrix;
pub use input::MatrixInput;
pub use layout::Layout;
pub use sparse::SparseMatrix;
pub use traits::{BinaryMatrix, MatrixKind};

pub(crate) fn check_shape(rows: usize, cols: usize) -> Result<usize, bmm_core::MatrixError> {
    if rows == 0 || cols == 0 {
        return Err(bmm_core::MatrixError::InvalidShape { rows, cols });
    }
    rows.checked_mul(cols)
        .ok_or(bmm_core::MatrixError::InvalidShape { rows, cols })
}
