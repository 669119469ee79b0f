use bmm_core::MatrixError;
use bmm_matrix::{BinaryMatrix, BitStore, DenseMatrix, Layout, SparseMatrix};
use proptest::prelude::*;

/// A random shape and its row-major cells.
fn arb_cells() -> impl Strategy<Value = (usize, usize, Vec<u8>)> {
    (1usize..12, 1usize..12).prop_flat_map(|(rows, cols)| {
        (
            Just(rows),
            Just(cols),
            prop::collection::vec(0u8..=1, rows * cols),
        )
    })
}

fn column_major(rows: usize, cols: usize, cells: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(cells.len());
    for c in 0..cols {
        for r in 0..rows {
            out.push(cells[r * cols + c]);
        }
    }
    out
}

proptest! {
    #[test]
    fn bitstore_get_returns_last_set(
        len in 1usize..300,
        writes in prop::collection::vec((any::<prop::sample::Index>(), any::<bool>()), 0..64),
    ) {
        let mut store = BitStore::new(len);
        let mut shadow = vec![false; len];
        for (index, value) in writes {
            let i = index.index(len);
            store.set(i, value);
            prop_assert_eq!(store.get(i), value);
            shadow[i] = value;
        }
        for (i, &v) in shadow.iter().enumerate() {
            prop_assert_eq!(store.get(i), v);
        }
        prop_assert_eq!(store.count_ones(), shadow.iter().filter(|&&b| b).count());
    }

    #[test]
    fn dense_and_sparse_agree_on_every_cell((rows, cols, cells) in arb_cells()) {
        let row_major = DenseMatrix::from_values(&cells, rows, cols, Layout::RowMajor).unwrap();
        let col_major = DenseMatrix::from_values(
            &column_major(rows, cols, &cells), rows, cols, Layout::ColumnMajor,
        ).unwrap();
        let sparse = SparseMatrix::from_matrix(&row_major);

        for r in 0..rows {
            for c in 0..cols {
                let expected = cells[r * cols + c] == 1;
                prop_assert_eq!(row_major.at(r, c), expected);
                prop_assert_eq!(col_major.at(r, c), expected);
                prop_assert_eq!(sparse.at(r, c), expected);
            }
        }
        prop_assert_eq!(sparse.nnz(), row_major.count_ones());
        prop_assert_eq!(sparse.column_means(), row_major.column_means());
    }

    #[test]
    fn sparse_rebuilds_from_its_own_arrays((rows, cols, cells) in arb_cells()) {
        let dense = DenseMatrix::from_values(&cells, rows, cols, Layout::RowMajor).unwrap();
        let sparse = SparseMatrix::from_matrix(&dense);
        let rebuilt = SparseMatrix::new(
            sparse.col_offsets().to_vec(),
            sparse.row_indices().to_vec(),
            rows,
            cols,
        ).unwrap();
        prop_assert_eq!(rebuilt, sparse);
    }

    #[test]
    fn sparse_rejects_reversed_column(rows in 2usize..20, picks in prop::collection::btree_set(0usize..20, 2..6)) {
        let mut column: Vec<usize> = picks.into_iter().filter(|&r| r < rows).collect();
        prop_assume!(column.len() >= 2);
        column.reverse();
        let len = column.len();
        let err = SparseMatrix::new(vec![0, len], column, rows, 1).unwrap_err();
        prop_assert!(
            matches!(err, MatrixError::UnsortedRowIndices { col: 0, .. }),
            "unexpected error {:?}", err
        );
    }
}
