//! Names shared by EM spans.

/// Span name for a full EM fit.
pub const SPAN_FIT: &str = "bmm.em";
