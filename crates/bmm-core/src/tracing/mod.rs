//! Observability for the Bernoulli mixture engine.
//! `tracing` crate with `EnvFilter`, configured through `BMM_LOG`.

pub mod metrics;
pub mod setup;

pub use setup::init_tracing;
