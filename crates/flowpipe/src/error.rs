//! Crate-level error type.
//!
//! All errors are fatal to the current invocation: a partially built flowpipe
//! with a missing segment would not be a sound over-approximation, so nothing
//! is retried or swallowed. The builder loop tags propagating errors with the
//! offending step index via [`FlowpipeError::at_step`].

use std::fmt;

/// Failure modes of the approximation core.
#[derive(Debug, Clone, PartialEq)]
pub enum FlowpipeError {
    /// Malformed or out-of-range configuration (non-positive step size,
    /// too few initial points, empty bloating set).
    InvalidConfig { reason: String },
    /// A point set cannot form a non-zero-area convex polygon
    /// (all points collinear or coincident).
    DegenerateInput {
        step: Option<usize>,
        reason: String,
    },
    /// A value expected to satisfy the polygon invariant does not.
    /// Unreachable through safe construction; checked at component
    /// boundaries so corrupted geometry never propagates silently.
    InvalidPolygon {
        step: Option<usize>,
        reason: String,
    },
}

impl FlowpipeError {
    pub(crate) fn config(reason: impl Into<String>) -> Self {
        FlowpipeError::InvalidConfig {
            reason: reason.into(),
        }
    }

    pub(crate) fn degenerate(reason: impl Into<String>) -> Self {
        FlowpipeError::DegenerateInput {
            step: None,
            reason: reason.into(),
        }
    }

    pub(crate) fn polygon(reason: impl Into<String>) -> Self {
        FlowpipeError::InvalidPolygon {
            step: None,
            reason: reason.into(),
        }
    }

    /// Attach the flowpipe step index at which the error surfaced.
    /// An already-tagged error keeps its original index.
    pub fn at_step(self, step: usize) -> Self {
        match self {
            FlowpipeError::DegenerateInput { step: None, reason } => {
                FlowpipeError::DegenerateInput {
                    step: Some(step),
                    reason,
                }
            }
            FlowpipeError::InvalidPolygon { step: None, reason } => FlowpipeError::InvalidPolygon {
                step: Some(step),
                reason,
            },
            other => other,
        }
    }
}

fn step_suffix(step: &Option<usize>) -> String {
    match step {
        Some(i) => format!(" at step {}", i),
        None => String::new(),
    }
}

impl fmt::Display for FlowpipeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FlowpipeError::InvalidConfig { reason } => {
                write!(f, "invalid configuration: {}", reason)
            }
            FlowpipeError::DegenerateInput { step, reason } => {
                write!(f, "degenerate input{}: {}", step_suffix(step), reason)
            }
            FlowpipeError::InvalidPolygon { step, reason } => {
                write!(f, "invalid polygon{}: {}", step_suffix(step), reason)
            }
        }
    }
}

impl std::error::Error for FlowpipeError {}
