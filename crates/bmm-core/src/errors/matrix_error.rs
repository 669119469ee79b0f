//! Binary matrix construction errors.
//!
//! All of these are fatal and surface before any EM work starts.
//! Malformed input is rejected, never repaired.

use super::error_code::{self, BmmErrorCode};

/// Errors raised while building a dense or sparse binary matrix.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MatrixError {
    #[error("Matrix shape must be positive, got {rows}x{cols}")]
    InvalidShape { rows: usize, cols: usize },

    #[error("Expected {expected} cells, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    #[error("Cell {index} holds {value}, expected 0 or 1")]
    InvalidCellValue { index: usize, value: i64 },

    #[error("Ragged rows: row {row} has {actual} columns, expected {expected}")]
    RaggedRows {
        row: usize,
        expected: usize,
        actual: usize,
    },

    #[error("Column offsets must have length {expected}, got {actual}")]
    OffsetsLength { expected: usize, actual: usize },

    #[error("Column offsets must start at 0, got {first}")]
    OffsetsStart { first: usize },

    #[error("Column offsets decrease at column {col}")]
    OffsetsDecreasing { col: usize },

    #[error("Last column offset {last} does not match {indices} row indices")]
    OffsetsTotal { last: usize, indices: usize },

    #[error("Row index {row} in column {col} is out of range for {rows} rows")]
    RowIndexOutOfRange { col: usize, row: usize, rows: usize },

    #[error("Row indices in column {col} are not strictly increasing at position {position}")]
    UnsortedRowIndices { col: usize, position: usize },

    #[error("Negative value {value} in {field} at position {position}")]
    NegativeIndex {
        field: &'static str,
        position: usize,
        value: i64,
    },
}

impl BmmErrorCode for MatrixError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidShape { .. }
            | Self::LengthMismatch { .. }
            | Self::InvalidCellValue { .. }
            | Self::RaggedRows { .. } => error_code::MATRIX_ERROR,
            Self::OffsetsLength { .. }
            | Self::OffsetsStart { .. }
            | Self::OffsetsDecreasing { .. }
            | Self::OffsetsTotal { .. }
            | Self::RowIndexOutOfRange { .. }
            | Self::UnsortedRowIndices { .. }
            | Self::NegativeIndex { .. } => error_code::SPARSE_STRUCTURE,
        }
    }
}
