//! Cell ordering for flat matrix buffers.

use serde::{Deserialize, Serialize};

/// Order in which the cells of an `n x d` matrix appear in a flat buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Layout {
    /// Cell `(r, c)` at `r * d + c`.
    #[default]
    RowMajor,
    /// Cell `(r, c)` at `c * n + r`. Used by column-oriented hosts.
    ColumnMajor,
}

impl Layout {
    /// Flat index of cell `(row, col)` in a `rows x cols` buffer.
    #[inline]
    pub fn flat_index(self, row: usize, col: usize, rows: usize, cols: usize) -> usize {
        match self {
            Self::RowMajor => row * cols + col,
            Self::ColumnMajor => col * rows + row,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flat_index() {
        // 2 x 3
        assert_eq!(Layout::RowMajor.flat_index(1, 2, 2, 3), 5);
        assert_eq!(Layout::ColumnMajor.flat_index(1, 2, 2, 3), 5);
        assert_eq!(Layout::RowMajor.flat_index(1, 0, 2, 3), 3);
        assert_eq!(Layout::ColumnMajor.flat_index(1, 0, 2, 3), 1);
    }
}
