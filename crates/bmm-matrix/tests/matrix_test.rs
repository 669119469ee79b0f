//! Integration tests for dense and sparse binary matrices against golden fixtures.

use bmm_core::errors::BmmErrorCode;
use bmm_matrix::{BinaryMatrix, DenseMatrix, MatrixInput, MatrixKind, SparseMatrix};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct FourByThree {
    rows: Vec<Vec<u8>>,
    inputs: Vec<MatrixInput>,
}

#[derive(Debug, Deserialize)]
struct InvalidCase {
    case: String,
    input: MatrixInput,
    error_code: String,
}

#[derive(Debug, Deserialize)]
struct InvalidSparse {
    cases: Vec<InvalidCase>,
}

#[test]
fn every_input_form_reads_the_same_cells() {
    let fixture: FourByThree = test_fixtures::load_fixture("matrix/four_by_three.json");
    let reference = DenseMatrix::from_rows(&fixture.rows).unwrap();

    for input in &fixture.inputs {
        let matrix = input.build().unwrap();
        assert_eq!(matrix.kind(), input.kind());
        assert_eq!((matrix.rows(), matrix.cols()), input.shape());
        for r in 0..reference.rows() {
            for c in 0..reference.cols() {
                assert_eq!(
                    matrix.at(r, c),
                    reference.at(r, c),
                    "{} input differs at ({r}, {c})",
                    input.kind()
                );
            }
        }
        assert_eq!(matrix.count_ones(), 6);
        assert_eq!(matrix.column_means(), vec![0.5, 0.5, 0.5]);
    }
}

#[test]
fn malformed_inputs_are_rejected_with_codes() {
    let fixture: InvalidSparse = test_fixtures::load_fixture("matrix/invalid_sparse.json");
    assert!(!fixture.cases.is_empty());
    for case in &fixture.cases {
        match case.input.build() {
            Ok(_) => panic!("case {} should have been rejected", case.case),
            Err(e) => assert_eq!(e.error_code(), case.error_code, "case {}: {e}", case.case),
        }
    }
}

#[test]
fn provided_methods_agree_across_variants() {
    let dense = DenseMatrix::from_rows(&[
        vec![1, 0, 1, 1, 0],
        vec![0, 0, 0, 0, 0],
        vec![1, 1, 0, 1, 0],
    ])
    .unwrap();
    let sparse = SparseMatrix::from_matrix(&dense);
    assert_eq!(sparse.kind(), MatrixKind::Sparse);

    let mut a = Vec::new();
    let mut b = Vec::new();
    for row in 0..3 {
        dense.row_ones(row, &mut a);
        sparse.row_ones(row, &mut b);
        assert_eq!(a, b);
    }
    assert_eq!(dense.hamming(0, 2), sparse.hamming(0, 2));
    assert_eq!(dense.hamming(0, 2), 2);
    assert_eq!(dense.column_means(), sparse.column_means());
    assert_eq!(dense.preview(2, 10), sparse.preview(2, 10));
    assert_eq!(dense.preview(2, 10).len(), 2);
    assert_eq!(dense.preview(2, 10)[0].len(), 5);
}

#[test]
fn boxed_matrix_forwards_to_inner() {
    let boxed: Box<dyn BinaryMatrix> =
        Box::new(SparseMatrix::new(vec![0, 1, 1], vec![1], 2, 2).unwrap());
    assert_eq!(boxed.rows(), 2);
    assert!(boxed.at(1, 0));
    assert!(!boxed.at(0, 0));
    assert_eq!(boxed.count_ones(), 1);
}
