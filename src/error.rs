//! Error taxonomy for the assertion engine.
//!
//! Three kinds of failure leave the library, and they never mix:
//!
//! - [`AssertError::Failed`] is the soft, expected outcome of a failed
//!   expectation; it is the only kind a deferred scope collects.
//! - [`AssertError::Usage`] signals programmer error, not a failed
//!   expectation, so test tooling can tell a misuse from an assertion outcome.
//! - [`AssertError::ReentrantBridge`] signals a blocking wait entered from
//!   inside another blocking wait on the same thread.
//!
//! Cancellation of a suspended evaluation is dropping its future; nothing is
//! recorded anywhere and the cancellation propagates through the surrounding
//! runtime on its own.

use crate::outcome::Failure;

/// Errors surfaced by evaluating, scoping, or bridging expectations.
#[derive(Debug, thiserror::Error)]
pub enum AssertError {
    /// One or more expectations did not hold.
    #[error("{0}")]
    Failed(Failure),

    /// The fluent API was misused; this is a programmer error and is never
    /// collected by a scope.
    #[error("usage error: {0}")]
    Usage(String),

    /// `run_blocking` was entered again from within an outer blocking wait on
    /// the same thread.
    #[error("run_blocking entered re-entrantly on the same thread")]
    ReentrantBridge,
}

impl AssertError {
    /// Whether this is a soft assertion failure (as opposed to a hard usage
    /// or re-entrancy error).
    pub fn is_assertion_failure(&self) -> bool {
        matches!(self, AssertError::Failed(_))
    }

    /// The failure report, when this is an assertion failure.
    pub fn failure(&self) -> Option<&Failure> {
        match self {
            AssertError::Failed(failure) => Some(failure),
            _ => None,
        }
    }
}
