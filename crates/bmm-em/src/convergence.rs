//! Stopping rule for the EM loop.

use bmm_core::config::ConvergenceCriterion;

/// Whether the change from `previous` to `current` log-likelihood is small
/// enough to stop.
///
/// The change is taken in absolute value, so a tiny numerical decrease
/// also counts as converged. A non-finite change never converges. The
/// relative criterion falls back to the absolute one when `previous` is 0.
pub fn has_converged(
    criterion: ConvergenceCriterion,
    previous: f64,
    current: f64,
    tolerance: f64,
) -> bool {
    let change = (current - previous).abs();
    if !change.is_finite() {
        return false;
    }
    match criterion {
        ConvergenceCriterion::Absolute => change < tolerance,
        ConvergenceCriterion::Relative if previous == 0.0 => change < tolerance,
        ConvergenceCriterion::Relative => change < tolerance * previous.abs(),
    }
}
