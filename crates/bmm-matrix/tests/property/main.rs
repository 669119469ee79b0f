//! Property tests for bmm-matrix.

mod matrix_properties;
