//! Subject wrapper: the value under test plus its source-expression text.
//!
//! A `Subject` adapts a value (possibly absent) and the literal text of the
//! expression that produced it into a uniform handle passed through the
//! assertion chain. The expression text is used for message rendering only,
//! never evaluated.

use crate::chain::Expectation;
use crate::constraint::IntoConstraint;

/// The value under test, wrapped with its source-expression text.
///
/// Immutable once created. An absent value is a first-class, always-valid
/// state: constraints declare explicitly whether absence passes or fails.
#[derive(Debug, Clone)]
pub struct Subject<T> {
    value: Option<T>,
    expression: String,
}

impl<T> Subject<T> {
    /// Wrap a value (or its absence) together with an expression description.
    pub fn new(value: Option<T>, expression: impl Into<String>) -> Self {
        Self {
            value,
            expression: expression.into(),
        }
    }

    /// Whether a value is present.
    pub fn has_value(&self) -> bool {
        self.value.is_some()
    }

    /// The wrapped value, if present.
    pub fn value(&self) -> Option<&T> {
        self.value.as_ref()
    }

    /// The source-expression text this subject was created from.
    pub fn expression(&self) -> &str {
        &self.expression
    }

    /// Replace the expression text (used by the [`expect!`](crate::expect) macro).
    pub fn described_as(mut self, expression: impl Into<String>) -> Self {
        self.expression = expression.into();
        self
    }

    /// Attach the first constraint, producing a pending expectation.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use attest::{subject_of, is_one_of};
    ///
    /// subject_of("tuesday")
    ///     .to(is_one_of(["monday", "tuesday"]))
    ///     .evaluate()
    ///     .await?;
    /// ```
    pub fn to(self, constraint: impl IntoConstraint<T>) -> Expectation<T> {
        Expectation::new(self, constraint.into_constraint())
    }
}

/// Create a subject from a value.
///
/// This is the entry point for the fluent assertion API. Accepts either a
/// plain value or an `Option<T>`, so an absent subject is stated directly:
///
/// ```rust,ignore
/// use attest::subject_of;
///
/// let present = subject_of(42);
/// let absent = subject_of(None::<i32>);
/// ```
pub fn subject_of<T>(value: impl Into<Option<T>>) -> Subject<T> {
    Subject::new(value.into(), "subject")
}

/// Create a subject capturing the literal source text of the expression.
///
/// # Example
///
/// ```rust,ignore
/// use attest::{expect, is_present};
///
/// let retained = compute_retention();
/// expect!(retained).to(is_present()).evaluate().await?;
/// // a failure renders as: expected `retained` ...
/// ```
#[macro_export]
macro_rules! expect {
    ($value:expr) => {
        $crate::subject_of($value).described_as(concat!("`", stringify!($value), "`"))
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_present_subject() {
        let subject = subject_of(7);
        assert!(subject.has_value());
        assert_eq!(subject.value(), Some(&7));
        assert_eq!(subject.expression(), "subject");
    }

    #[test]
    fn test_absent_subject_is_legal() {
        let subject = subject_of::<String>(None);
        assert!(!subject.has_value());
        assert_eq!(subject.value(), None);
    }

    #[test]
    fn test_described_as_replaces_expression() {
        let subject = subject_of(1).described_as("the count");
        assert_eq!(subject.expression(), "the count");
    }

    #[test]
    fn test_expect_macro_captures_source_text() {
        let weekday = "tuesday";
        let subject = expect!(weekday);
        assert_eq!(subject.expression(), "`weekday`");
        assert_eq!(subject.value(), Some(&"tuesday"));
    }
}
