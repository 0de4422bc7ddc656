//! Set-membership constraints ("is one of").
//!
//! A present subject passes iff it is structurally equal (`PartialEq`, never
//! reference identity) to at least one candidate. An absent subject matches
//! only if absence is itself listed among the candidates via
//! [`Membership::or_absent`]; it is never treated as automatically excluded
//! or automatically included.

use super::{not, Constraint, IntoConstraint, Predicate};
use crate::subject::Subject;
use async_trait::async_trait;
use std::fmt::Debug;

/// The "is one of" constraint family.
#[derive(Debug, Clone)]
pub struct Membership<T> {
    candidates: Vec<T>,
    absent_allowed: bool,
}

/// Expect the subject to be one of the given candidates.
///
/// # Example
///
/// ```rust,ignore
/// use attest::{expect, is_one_of};
///
/// expect!(weekday)
///     .to(is_one_of(["saturday", "sunday"]))
///     .evaluate()
///     .await?;
/// ```
pub fn is_one_of<T>(candidates: impl IntoIterator<Item = T>) -> Membership<T> {
    Membership {
        candidates: candidates.into_iter().collect(),
        absent_allowed: false,
    }
}

/// Expect the subject not to be any of the given candidates.
///
/// Exact logical negation of [`is_one_of`] for every subject and candidate
/// set, including the absent subject.
pub fn is_not_one_of<T>(candidates: impl IntoIterator<Item = T>) -> Constraint<T>
where
    T: PartialEq + Debug + Send + Sync + 'static,
{
    not(is_one_of(candidates))
}

impl<T> Membership<T> {
    /// Also list absence among the candidates, so an absent subject passes.
    pub fn or_absent(mut self) -> Self {
        self.absent_allowed = true;
        self
    }

    fn candidate_list(&self) -> String
    where
        T: Debug,
    {
        if self.absent_allowed {
            format!("{:?} or absent", self.candidates)
        } else {
            format!("{:?}", self.candidates)
        }
    }
}

#[async_trait]
impl<T> Predicate<T> for Membership<T>
where
    T: PartialEq + Debug + Send + Sync,
{
    async fn holds(&self, subject: &Subject<T>) -> bool {
        match subject.value() {
            Some(value) => self.candidates.iter().any(|candidate| candidate == value),
            None => self.absent_allowed,
        }
    }

    fn describe(&self, subject: &Subject<T>, negated: bool) -> String {
        let candidates = self.candidate_list();
        match (subject.value(), negated) {
            (Some(value), false) => {
                format!("to be one of {candidates}, but was {value:?}")
            }
            (None, false) => format!("to be one of {candidates}, but was absent"),
            (Some(value), true) => {
                format!("not to be one of {candidates}, but {value:?} matched")
            }
            (None, true) => {
                format!("not to be one of {candidates}, but absence is listed")
            }
        }
    }
}

impl<T> IntoConstraint<T> for Membership<T>
where
    T: PartialEq + Debug + Send + Sync + 'static,
{
    fn into_constraint(self) -> Constraint<T> {
        Constraint::new(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::subject::subject_of;
    use futures::executor::block_on;

    fn holds<T: PartialEq + Debug + Send + Sync>(
        membership: &Membership<T>,
        value: Option<T>,
    ) -> bool {
        block_on(membership.holds(&subject_of(value)))
    }

    #[test]
    fn test_present_value_in_set_passes() {
        assert!(holds(&is_one_of(["mon", "tue"]), Some("tue")));
    }

    #[test]
    fn test_present_value_outside_set_fails() {
        assert!(!holds(&is_one_of(["mon", "tue"]), Some("wed")));
    }

    #[test]
    fn test_equality_is_structural() {
        assert!(holds(
            &is_one_of([String::from("alpha")]),
            Some(String::from("alpha"))
        ));
    }

    #[test]
    fn test_absent_fails_unless_listed() {
        assert!(!holds(&is_one_of([1, 2]), None));
        assert!(holds(&is_one_of([1, 2]).or_absent(), None));
    }

    #[test]
    fn test_absent_listed_does_not_admit_present_values() {
        assert!(!holds(&is_one_of([1, 2]).or_absent(), Some(3)));
    }

    #[test]
    fn test_negated_failure_names_the_match() {
        let subject = subject_of("tue");
        let outcome = block_on(is_not_one_of(["mon", "tue"]).evaluate(&subject));
        let message = outcome.render("subject").unwrap();
        assert_eq!(
            message,
            "expected subject not to be one of [\"mon\", \"tue\"], but \"tue\" matched"
        );
    }

    #[test]
    fn test_positive_failure_names_the_actual() {
        let subject = subject_of("wed");
        let constraint = is_one_of(["mon", "tue"]).into_constraint();
        let outcome = block_on(constraint.evaluate(&subject));
        let message = outcome.render("subject").unwrap();
        assert_eq!(
            message,
            "expected subject to be one of [\"mon\", \"tue\"], but was \"wed\""
        );
    }
}
