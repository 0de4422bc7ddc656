//! Synchronous bridge: run a suspendable evaluation from blocking code.
//!
//! There is one suspendable evaluation core; the bridge drives it to
//! completion on the calling thread and re-raises its error unchanged: same
//! kind, same rendered message, never wrapped or renamed. A thread-local
//! nesting counter catches re-entrant entry, which would deadlock-or-worse a
//! blocked wait; that is a usage error, fatal, and never collected by any
//! open scope.

use crate::error::AssertError;
use std::cell::Cell;
use std::future::Future;

thread_local! {
    static BRIDGE_DEPTH: Cell<usize> = const { Cell::new(0) };
}

struct DepthGuard;

impl Drop for DepthGuard {
    fn drop(&mut self) {
        BRIDGE_DEPTH.with(|depth| depth.set(depth.get() - 1));
    }
}

/// Drive a suspendable evaluation to completion on the calling thread.
///
/// Returns exactly what awaiting the evaluation would return. Fails with
/// [`AssertError::ReentrantBridge`] when invoked from within another
/// `run_blocking` wait on the same thread.
///
/// # Example
///
/// ```rust,ignore
/// use attest::{run_blocking, subject_of, is_one_of};
///
/// run_blocking(subject_of("tue").to(is_one_of(["mon", "tue"])).evaluate())?;
/// ```
pub fn run_blocking<R, F>(evaluation: F) -> Result<R, AssertError>
where
    F: Future<Output = Result<R, AssertError>>,
{
    let entered = BRIDGE_DEPTH.with(|depth| {
        if depth.get() > 0 {
            false
        } else {
            depth.set(depth.get() + 1);
            true
        }
    });
    if !entered {
        return Err(AssertError::ReentrantBridge);
    }
    let _guard = DepthGuard;
    futures::executor::block_on(evaluation)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_runs_to_completion() {
        let result = run_blocking(async { Ok::<_, AssertError>(7) });
        assert_eq!(result.unwrap(), 7);
    }

    #[test]
    fn test_error_passes_through_unchanged() {
        let result: Result<(), AssertError> =
            run_blocking(async { Err(AssertError::Usage("oops".to_string())) });
        let error = result.unwrap_err();
        assert_eq!(error.to_string(), "usage error: oops");
    }

    #[test]
    fn test_reentrant_entry_is_rejected() {
        let result: Result<(), AssertError> = run_blocking(async {
            run_blocking(async { Ok(()) })
        });
        assert!(matches!(result, Err(AssertError::ReentrantBridge)));
    }

    #[test]
    fn test_depth_resets_after_rejection() {
        let _ = run_blocking(async {
            let inner: Result<(), AssertError> = run_blocking(async { Ok(()) });
            assert!(inner.is_err());
            Ok::<_, AssertError>(())
        });
        // the outer wait finished, so a fresh entry works again
        assert!(run_blocking(async { Ok::<_, AssertError>(()) }).is_ok());
    }

    #[test]
    fn test_independent_threads_do_not_interfere() {
        let outer = run_blocking(async {
            std::thread::spawn(|| run_blocking(async { Ok::<_, AssertError>(1) }))
                .join()
                .unwrap()
        });
        assert_eq!(outer.unwrap(), 1);
    }
}
