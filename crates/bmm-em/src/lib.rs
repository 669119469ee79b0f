//! # bmm-em
//!
//! Expectation-Maximization for a finite mixture of multivariate Bernoulli
//! distributions over a binary matrix.
//!
//! ```text
//! INIT -> { E_STEP -> M_STEP -> CONVERGENCE_CHECK } -> DONE
//! ```
//!
//! The engine reads its input only through [`bmm_matrix::BinaryMatrix`], so
//! dense and sparse inputs give the same numbers.

pub mod api;
pub mod convergence;
pub mod engine;
pub(crate) mod estep;
pub mod export;
pub mod init;
pub mod model;
pub(crate) mod mstep;
pub mod observer;
pub mod responsibilities;
pub mod result;
pub mod settings;

pub use api::{fit_dense, fit_input, fit_sparse};
pub use engine::EmEngine;
pub use export::EmExport;
pub use init::{FarthestFirstInit, FixedInit, Initializer, RandomAssignmentInit, RandomInit};
pub use model::MixtureModel;
pub use observer::{IterationObserver, NoopObserver, TracingObserver};
pub use responsibilities::Responsibilities;
pub use result::EmResult;
pub use settings::EmSettings;
