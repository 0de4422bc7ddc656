//! Caller-supplied predicates, synchronous or suspendable.
//!
//! This is the seam where externally-suspendable predicates plug into the
//! evaluation core: a `satisfies_async` check returns a future, and the
//! evaluator drives it through the same suspendable path as everything else.
//! Dropping the evaluation future mid-await cancels the check; nothing is
//! recorded into any open scope.

use super::{Constraint, IntoConstraint, Predicate};
use crate::subject::Subject;
use async_trait::async_trait;
use futures::future::BoxFuture;
use std::fmt::Debug;
use std::future::Future;

type SyncCheck<T> = Box<dyn Fn(&T) -> bool + Send + Sync>;
type SuspendableCheck<T> = Box<dyn Fn(&T) -> BoxFuture<'static, bool> + Send + Sync>;

enum Check<T> {
    Sync(SyncCheck<T>),
    Suspendable(SuspendableCheck<T>),
}

/// A named caller-supplied predicate. An absent subject never satisfies it.
pub struct Satisfies<T> {
    description: String,
    check: Check<T>,
}

/// Expect the subject's value to satisfy a synchronous check.
///
/// # Example
///
/// ```rust,ignore
/// use attest::{expect, satisfies};
///
/// expect!(port)
///     .to(satisfies("a registered port", |p: &u16| *p >= 1024))
///     .evaluate()
///     .await?;
/// ```
pub fn satisfies<T>(
    description: impl Into<String>,
    check: impl Fn(&T) -> bool + Send + Sync + 'static,
) -> Satisfies<T> {
    Satisfies {
        description: description.into(),
        check: Check::Sync(Box::new(check)),
    }
}

/// Expect the subject's value to satisfy a check that performs asynchronous
/// work.
///
/// The check receives a reference and returns an owned future, so it clones
/// or copies whatever the asynchronous work needs.
///
/// # Example
///
/// ```rust,ignore
/// use attest::{expect, satisfies_async};
///
/// expect!(endpoint)
///     .to(satisfies_async("a reachable endpoint", |e: &Endpoint| {
///         let e = e.clone();
///         async move { probe(&e).await }
///     }))
///     .evaluate()
///     .await?;
/// ```
pub fn satisfies_async<T, F, Fut>(description: impl Into<String>, check: F) -> Satisfies<T>
where
    F: Fn(&T) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = bool> + Send + 'static,
{
    Satisfies {
        description: description.into(),
        check: Check::Suspendable(Box::new(move |value: &T| -> BoxFuture<'static, bool> {
            Box::pin(check(value))
        })),
    }
}

#[async_trait]
impl<T> Predicate<T> for Satisfies<T>
where
    T: Debug + Send + Sync,
{
    async fn holds(&self, subject: &Subject<T>) -> bool {
        let Some(value) = subject.value() else {
            return false;
        };
        match &self.check {
            Check::Sync(check) => check(value),
            Check::Suspendable(check) => check(value).await,
        }
    }

    fn describe(&self, subject: &Subject<T>, negated: bool) -> String {
        let description = &self.description;
        match (subject.value(), negated) {
            (Some(value), false) => {
                format!("to satisfy {description}, but {value:?} did not")
            }
            (None, false) => format!("to satisfy {description}, but was absent"),
            (Some(value), true) => {
                format!("not to satisfy {description}, but {value:?} did")
            }
            (None, true) => format!("not to satisfy {description}"),
        }
    }
}

impl<T> IntoConstraint<T> for Satisfies<T>
where
    T: Debug + Send + Sync + 'static,
{
    fn into_constraint(self) -> Constraint<T> {
        Constraint::new(self)
    }
}
