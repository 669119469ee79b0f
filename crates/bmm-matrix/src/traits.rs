//! The binary matrix access trait.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Concrete representation behind a `BinaryMatrix`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatrixKind {
    Dense,
    Sparse,
}

impl MatrixKind {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Dense => "dense",
            Self::Sparse => "sparse",
        }
    }
}

impl fmt::Display for MatrixKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Read-only `rows x cols` matrix of bits.
///
/// Every implementation must return the same value from `at` for the same
/// logical matrix, so algorithms written against this trait produce the
/// same numbers whichever representation they are given. Implementations
/// differ only in access cost.
///
/// `at` panics when `row >= rows()` or `col >= cols()`.
pub trait BinaryMatrix: Send + Sync {
    /// Number of observations.
    fn rows(&self) -> usize;

    /// Number of binary features.
    fn cols(&self) -> usize;

    /// Value of cell `(row, col)`.
    fn at(&self, row: usize, col: usize) -> bool;

    /// Which representation this is.
    fn kind(&self) -> MatrixKind;

    /// Write the columns set in `row` into `out`, ascending.
    fn row_ones(&self, row: usize, out: &mut Vec<usize>) {
        out.clear();
        out.extend((0..self.cols()).filter(|&col| self.at(row, col)));
    }

    /// Number of set cells.
    fn count_ones(&self) -> usize {
        (0..self.rows())
            .map(|row| (0..self.cols()).filter(|&col| self.at(row, col)).count())
            .sum()
    }

    /// Fraction of rows set, per column.
    fn column_means(&self) -> Vec<f64> {
        let rows = self.rows() as f64;
        (0..self.cols())
            .map(|col| (0..self.rows()).filter(|&row| self.at(row, col)).count() as f64 / rows)
            .collect()
    }

    /// Number of columns where rows `a` and `b` differ.
    fn hamming(&self, a: usize, b: usize) -> usize {
        (0..self.cols())
            .filter(|&col| self.at(a, col) != self.at(b, col))
            .count()
    }

    /// Top-left corner of at most `rows x cols` cells as 0/1 values.
    fn preview(&self, rows: usize, cols: usize) -> Vec<Vec<u8>> {
        let rows = rows.min(self.rows());
        let cols = cols.min(self.cols());
        (0..rows)
            .map(|row| (0..cols).map(|col| u8::from(self.at(row, col))).collect())
            .collect()
    }
}

impl<M: BinaryMatrix + ?Sized> BinaryMatrix for Box<M> {
    fn rows(&self) -> usize {
        (**self).rows()
    }

    fn cols(&self) -> usize {
        (**self).cols()
    }

    #[inline]
    fn at(&self, row: usize, col: usize) -> bool {
        (**self).at(row, col)
    }

    fn kind(&self) -> MatrixKind {
        (**self).kind()
    }

    fn row_ones(&self, row: usize, out: &mut Vec<usize>) {
        (**self).row_ones(row, out)
    }

    fn count_ones(&self) -> usize {
        (**self).count_ones()
    }

    fn column_means(&self) -> Vec<f64> {
        (**self).column_means()
    }
}
