//! Deferred multi-failure aggregation scopes.
//!
//! A scope is a dynamically-nested region that intercepts failures from the
//! evaluations running inside it. The stack of open scopes is
//! thread-of-control-local: each thread has its own, so one assertion's
//! failures can never leak into an unrelated concurrent assertion's
//! aggregation, and no lock is ever taken.
//!
//! Push and pop follow strict stack discipline, enforced by a drop guard that
//! releases on every exit path: normal return, early `?`, or a panic already
//! in flight.

use crate::error::AssertError;
use crate::outcome::Failure;
use std::cell::RefCell;
use std::future::Future;
use std::marker::PhantomData;

thread_local! {
    static SCOPES: RefCell<Vec<Frame>> = const { RefCell::new(Vec::new()) };
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Immediate,
    Deferred,
}

#[derive(Debug)]
struct Frame {
    mode: Mode,
    collected: Vec<String>,
}

/// Append a rendered failure to the innermost scope iff it defers.
///
/// Returns `true` when the failure was collected; the caller then returns
/// normally instead of raising.
pub(crate) fn record(message: String) -> bool {
    SCOPES.with(|scopes| {
        let mut scopes = scopes.borrow_mut();
        match scopes.last_mut() {
            Some(frame) if frame.mode == Mode::Deferred => {
                frame.collected.push(message);
                true
            }
            _ => false,
        }
    })
}

#[cfg(test)]
pub(crate) fn depth() -> usize {
    SCOPES.with(|scopes| scopes.borrow().len())
}

/// Pops its frame exactly once, on whichever exit path runs first.
///
/// The raw-pointer marker keeps the guard off other threads, and with it any
/// future holding one across an await: the enclosing future is `!Send`, so a
/// deferred region cannot migrate mid-scope to a thread with a different
/// scope stack.
struct ScopeGuard {
    released: bool,
    _single_thread: PhantomData<*mut ()>,
}

impl ScopeGuard {
    fn push(mode: Mode) -> Self {
        SCOPES.with(|scopes| {
            scopes.borrow_mut().push(Frame {
                mode,
                collected: Vec::new(),
            });
        });
        Self {
            released: false,
            _single_thread: PhantomData,
        }
    }

    fn release(mut self) -> Vec<String> {
        self.released = true;
        SCOPES.with(|scopes| scopes.borrow_mut().pop()).map_or_else(Vec::new, |frame| frame.collected)
    }
}

impl Drop for ScopeGuard {
    fn drop(&mut self) {
        if !self.released {
            SCOPES.with(|scopes| {
                scopes.borrow_mut().pop();
            });
        }
    }
}

/// Close a deferred frame: an in-flight error from the body always wins and
/// the collected failures are discarded; otherwise a non-empty collection
/// becomes one aggregated failure, folded into an enclosing deferred scope
/// as a single entry when one is open, raised to the caller when not.
fn close_deferred<R>(
    result: Result<R, AssertError>,
    collected: Vec<String>,
) -> Result<R, AssertError> {
    let value = result?;
    if collected.is_empty() {
        return Ok(value);
    }
    let failure = Failure::aggregate(collected);
    if record(failure.message()) {
        Ok(value)
    } else {
        Err(AssertError::Failed(failure))
    }
}

/// Run `body` with failures deferred: every failing evaluation inside is
/// collected instead of raised, and the scope closes into at most one
/// aggregated failure listing them in evaluation order.
///
/// # Example
///
/// ```rust,ignore
/// use attest::{assert_all, run_blocking, subject_of, is_one_of, is_present};
///
/// assert_all(|| {
///     run_blocking(subject_of(day).to(is_one_of(["sat", "sun"])).evaluate())?;
///     run_blocking(subject_of(slot).to(is_present()).evaluate())?;
///     Ok(())
/// })?;
/// ```
pub fn assert_all<R>(
    body: impl FnOnce() -> Result<R, AssertError>,
) -> Result<R, AssertError> {
    let guard = ScopeGuard::push(Mode::Deferred);
    let result = body();
    let collected = guard.release();
    close_deferred(result, collected)
}

/// Async form of [`assert_all`].
///
/// The returned future is deliberately `!Send`: the scope stack is
/// thread-local, so the deferred region must stay on one thread of control.
/// Drive it with [`run_blocking`](crate::bridge::run_blocking) or a
/// current-thread executor.
pub async fn assert_all_async<R, F>(body: F) -> Result<R, AssertError>
where
    F: Future<Output = Result<R, AssertError>>,
{
    let guard = ScopeGuard::push(Mode::Deferred);
    let result = body.await;
    let collected = guard.release();
    close_deferred(result, collected)
}

/// Run `body` with failures raised immediately again, shielding it from an
/// enclosing [`assert_all`] region.
pub fn assert_each<R>(
    body: impl FnOnce() -> Result<R, AssertError>,
) -> Result<R, AssertError> {
    let guard = ScopeGuard::push(Mode::Immediate);
    let result = body();
    guard.release();
    result
}
