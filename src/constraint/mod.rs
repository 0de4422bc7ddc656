//! Constraints: immutable, composable predicate descriptions.
//!
//! This module provides the constraint model and its built-in families:
//! - [`membership`] - "is one of" set membership
//! - [`tolerance`] - time-distance checks against a duration threshold
//! - [`presence`] - present/absent checks
//! - [`custom`] - caller-supplied predicates, sync or suspendable
//!
//! Negation is a flag, not a separate code path: "is one of" and "is not one
//! of" share one evaluation routine, and the failure summary is regenerated
//! under negation rather than reusing the positive-case text.

mod custom;
mod membership;
mod presence;
mod tolerance;

pub use custom::{satisfies, satisfies_async, Satisfies};
pub use membership::{is_not_one_of, is_one_of, Membership};
pub use presence::{is_absent, is_present, Presence};
pub use tolerance::{at_least, exactly, Direction, Tolerance, ToleranceBuilder};

use crate::outcome::Outcome;
use crate::reason::Reason;
use crate::subject::Subject;
use async_trait::async_trait;
use std::fmt::Display;

/// The capability a constraint family implements: deciding whether the
/// predicate holds, and describing a failure.
///
/// `holds` may suspend (a predicate can perform asynchronous work); the
/// built-in families never do. `describe` is pure and receives the negation
/// flag so a negated failure explains why the value *did* match when it
/// should not have.
#[async_trait]
pub trait Predicate<T>: Send + Sync {
    /// Whether the positive (un-negated) predicate holds for this subject.
    async fn holds(&self, subject: &Subject<T>) -> bool;

    /// Failure summary for this subject, regenerated per polarity.
    fn describe(&self, subject: &Subject<T>, negated: bool) -> String;

    /// Reject ill-formed parameters before evaluation. An `Err` surfaces as a
    /// usage error, never as an assertion failure.
    fn validate(&self) -> Result<(), String> {
        Ok(())
    }
}

/// An immutable description of a predicate to evaluate against a subject,
/// together with its polarity and an optional justification.
pub struct Constraint<T> {
    predicate: Box<dyn Predicate<T>>,
    negated: bool,
    reason: Option<Reason>,
}

impl<T> Constraint<T> {
    /// Wrap a predicate with positive polarity and no reason.
    pub fn new(predicate: impl Predicate<T> + 'static) -> Self {
        Self {
            predicate: Box::new(predicate),
            negated: false,
            reason: None,
        }
    }

    /// Flip the polarity.
    pub fn negate(mut self) -> Self {
        self.negated = !self.negated;
        self
    }

    /// Attach a justification clause, rendered only on failure.
    ///
    /// Arguments are captured eagerly; see [`Reason`].
    pub fn because(mut self, template: impl Into<String>, args: &[&dyn Display]) -> Self {
        self.reason = Some(Reason::new(template, args));
        self
    }

    pub(crate) fn validate(&self) -> Result<(), String> {
        self.predicate.validate()
    }

    /// Run the predicate once and produce exactly one outcome.
    pub(crate) async fn evaluate(&self, subject: &Subject<T>) -> Outcome {
        let holds = self.predicate.holds(subject).await;
        if holds != self.negated {
            Outcome::Pass
        } else {
            Outcome::Fail {
                summary: self.predicate.describe(subject, self.negated),
                reason: self.reason.clone(),
            }
        }
    }
}

impl<T> std::fmt::Debug for Constraint<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Constraint")
            .field("negated", &self.negated)
            .field("reason", &self.reason)
            .finish_non_exhaustive()
    }
}

/// Conversion seam so concrete constraint builders slot into the chain.
pub trait IntoConstraint<T> {
    fn into_constraint(self) -> Constraint<T>;
}

impl<T> IntoConstraint<T> for Constraint<T> {
    fn into_constraint(self) -> Constraint<T> {
        self
    }
}

/// Negate a constraint: `not(is_one_of(..))` is the exact logical complement
/// of `is_one_of(..)` for every subject.
pub fn not<T>(constraint: impl IntoConstraint<T>) -> Constraint<T> {
    constraint.into_constraint().negate()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::subject::subject_of;
    use futures::executor::block_on;

    struct AlwaysHolds;

    #[async_trait]
    impl Predicate<i32> for AlwaysHolds {
        async fn holds(&self, _subject: &Subject<i32>) -> bool {
            true
        }

        fn describe(&self, _subject: &Subject<i32>, negated: bool) -> String {
            if negated {
                "not to hold, but it held".to_string()
            } else {
                "to hold".to_string()
            }
        }
    }

    #[test]
    fn test_negation_flips_outcome() {
        let subject = subject_of(1);
        let positive = Constraint::new(AlwaysHolds);
        assert!(block_on(positive.evaluate(&subject)).is_pass());

        let negated = Constraint::new(AlwaysHolds).negate();
        let outcome = block_on(negated.evaluate(&subject));
        assert!(!outcome.is_pass());
    }

    #[test]
    fn test_negated_failure_regenerates_summary() {
        let subject = subject_of(1);
        let outcome = block_on(not(Constraint::new(AlwaysHolds)).evaluate(&subject));
        let message = outcome.render("subject").unwrap();
        assert_eq!(message, "expected subject not to hold, but it held");
    }

    #[test]
    fn test_double_negation_restores_polarity() {
        let subject = subject_of(1);
        let constraint = Constraint::new(AlwaysHolds).negate().negate();
        assert!(block_on(constraint.evaluate(&subject)).is_pass());
    }
}
