//! Evaluator and chain continuation.
//!
//! An [`Expectation`] is a subject with one constraint attached, not yet
//! evaluated. `evaluate()` is the single suspendable evaluation core: it runs
//! the predicate, renders the failure if any, then consults the current scope.
//! A deferred scope collects the failure and evaluation returns normally, so
//! chaining continues even after a recorded failure; otherwise the failure is
//! raised as [`AssertError::Failed`].
//!
//! Blocking callers drive the same core through
//! [`run_blocking`](crate::bridge::run_blocking); there is no duplicated
//! synchronous predicate path.

use crate::constraint::{Constraint, IntoConstraint};
use crate::error::AssertError;
use crate::outcome::Failure;
use crate::scope;
use crate::subject::Subject;
use std::fmt::Display;

/// A subject with a constraint attached, ready to evaluate.
#[derive(Debug)]
pub struct Expectation<T> {
    subject: Subject<T>,
    constraint: Constraint<T>,
}

impl<T> Expectation<T> {
    pub(crate) fn new(subject: Subject<T>, constraint: Constraint<T>) -> Self {
        Self {
            subject,
            constraint,
        }
    }

    /// Attach a justification clause, rendered only on failure.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// expect!(weekday)
    ///     .to(is_one_of(["saturday", "sunday"]))
    ///     .because("the report covers {0}", &[&"the weekend"])
    ///     .evaluate()
    ///     .await?;
    /// ```
    pub fn because(mut self, template: impl Into<String>, args: &[&dyn Display]) -> Self {
        self.constraint = self.constraint.because(template, args);
        self
    }

    /// Misuse trap: structural equality must be stated as a constraint
    /// (`is_one_of([other])`), never invoked on the fluent handle itself.
    ///
    /// Always returns [`AssertError::Usage`], regardless of any open scope,
    /// so test tooling never mistakes the misuse for an assertion outcome.
    pub fn equals<U>(&self, _other: &U) -> Result<(), AssertError> {
        Err(handle_equality_misuse())
    }

    /// Run the constraint against the subject.
    ///
    /// On pass, or on a failure collected by an enclosing deferred scope,
    /// returns a [`Chain`] so another constraint can be attached to the same
    /// subject. An uncollected failure is raised as [`AssertError::Failed`];
    /// ill-formed constraint parameters are raised as [`AssertError::Usage`]
    /// and bypass any open scope.
    pub async fn evaluate(self) -> Result<Chain<T>, AssertError> {
        if let Err(message) = self.constraint.validate() {
            return Err(AssertError::Usage(message));
        }
        let outcome = self.constraint.evaluate(&self.subject).await;
        match outcome.render(self.subject.expression()) {
            None => Ok(Chain::new(self.subject)),
            Some(message) => {
                if scope::record(message.clone()) {
                    Ok(Chain::new(self.subject))
                } else {
                    Err(AssertError::Failed(Failure::single(message)))
                }
            }
        }
    }
}

/// Continuation handle returned after a non-raising evaluation.
///
/// Bound to the same subject; carries no memory of prior outcomes beyond
/// what the enclosing scope already recorded.
#[derive(Debug)]
pub struct Chain<T> {
    subject: Subject<T>,
}

impl<T> Chain<T> {
    fn new(subject: Subject<T>) -> Self {
        Self { subject }
    }

    /// Attach a further constraint to the same subject.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// expect!(weekday)
    ///     .to(is_present())
    ///     .evaluate()
    ///     .await?
    ///     .and(is_one_of(["saturday", "sunday"]))
    ///     .evaluate()
    ///     .await?;
    /// ```
    pub fn and(self, constraint: impl IntoConstraint<T>) -> Expectation<T> {
        Expectation::new(self.subject, constraint.into_constraint())
    }

    /// The subject this chain continues on.
    pub fn subject(&self) -> &Subject<T> {
        &self.subject
    }

    /// Misuse trap: see [`Expectation::equals`].
    pub fn equals<U>(&self, _other: &U) -> Result<(), AssertError> {
        Err(handle_equality_misuse())
    }
}

fn handle_equality_misuse() -> AssertError {
    AssertError::Usage(
        "equality on the fluent handle compares handles, not values; \
         state the expectation as a constraint, e.g. is_one_of([other])"
            .to_string(),
    )
}
