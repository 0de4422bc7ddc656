//! Tolerance comparisons: time-distance checks against a duration threshold.
//!
//! Given a subject instant, a target instant, a non-negative tolerance, and a
//! direction, the signed difference in the stated direction decides the
//! outcome: `before` measures `target - subject`, `after` measures
//! `subject - target`. "exactly" passes iff the difference equals the
//! tolerance; "at least" passes iff the difference is greater than or equal
//! to it, with the boundary value passing. An absent subject always fails a
//! tolerance comparison; absence carries no temporal position.

use super::{Constraint, IntoConstraint, Predicate};
use crate::subject::Subject;
use async_trait::async_trait;
use chrono::{DateTime, TimeDelta, Utc};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Bound {
    Exactly,
    AtLeast,
}

/// Which side of the target the subject is measured on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// The subject precedes the target: difference is `target - subject`.
    Before,
    /// The subject follows the target: difference is `subject - target`.
    After,
}

/// Partially-built tolerance comparison; call [`before`](ToleranceBuilder::before)
/// or [`after`](ToleranceBuilder::after) to fix the target and direction.
#[derive(Debug, Clone, Copy)]
pub struct ToleranceBuilder {
    bound: Bound,
    tolerance: TimeDelta,
}

/// Expect the time distance to equal `tolerance` exactly.
///
/// # Example
///
/// ```rust,ignore
/// use attest::{expect, exactly};
/// use chrono::TimeDelta;
///
/// expect!(departure)
///     .to(exactly(TimeDelta::seconds(30)).before(boarding_close))
///     .evaluate()
///     .await?;
/// ```
pub fn exactly(tolerance: TimeDelta) -> ToleranceBuilder {
    ToleranceBuilder {
        bound: Bound::Exactly,
        tolerance,
    }
}

/// Expect the time distance to be at least `tolerance`, boundary included.
pub fn at_least(tolerance: TimeDelta) -> ToleranceBuilder {
    ToleranceBuilder {
        bound: Bound::AtLeast,
        tolerance,
    }
}

impl ToleranceBuilder {
    /// The subject must lie `tolerance` before the target.
    pub fn before(self, target: DateTime<Utc>) -> Tolerance {
        Tolerance {
            bound: self.bound,
            tolerance: self.tolerance,
            direction: Direction::Before,
            target,
        }
    }

    /// The subject must lie `tolerance` after the target.
    pub fn after(self, target: DateTime<Utc>) -> Tolerance {
        Tolerance {
            bound: self.bound,
            tolerance: self.tolerance,
            direction: Direction::After,
            target,
        }
    }
}

/// A fully-specified tolerance comparison.
#[derive(Debug, Clone, Copy)]
pub struct Tolerance {
    bound: Bound,
    tolerance: TimeDelta,
    direction: Direction,
    target: DateTime<Utc>,
}

impl Tolerance {
    fn phrase(&self) -> String {
        let bound = match self.bound {
            Bound::Exactly => "exactly",
            Bound::AtLeast => "at least",
        };
        let direction = match self.direction {
            Direction::Before => "before",
            Direction::After => "after",
        };
        format!(
            "{bound} {} {direction} {}",
            format_delta(self.tolerance),
            self.target
        )
    }
}

#[async_trait]
impl Predicate<DateTime<Utc>> for Tolerance {
    async fn holds(&self, subject: &Subject<DateTime<Utc>>) -> bool {
        let Some(&value) = subject.value() else {
            return false;
        };
        let difference = match self.direction {
            Direction::Before => self.target - value,
            Direction::After => value - self.target,
        };
        match self.bound {
            Bound::Exactly => difference == self.tolerance,
            Bound::AtLeast => difference >= self.tolerance,
        }
    }

    fn describe(&self, subject: &Subject<DateTime<Utc>>, negated: bool) -> String {
        let phrase = self.phrase();
        match (subject.value(), negated) {
            (Some(value), false) => format!("to be {phrase}, but was {value}"),
            (None, false) => format!("to be {phrase}, but was absent"),
            (Some(value), true) => format!("not to be {phrase}, but {value} was"),
            (None, true) => format!("not to be {phrase}"),
        }
    }

    fn validate(&self) -> Result<(), String> {
        if self.tolerance < TimeDelta::zero() {
            Err(format!(
                "tolerance must be non-negative, got {}",
                format_delta(self.tolerance)
            ))
        } else {
            Ok(())
        }
    }
}

impl IntoConstraint<DateTime<Utc>> for Tolerance {
    fn into_constraint(self) -> Constraint<DateTime<Utc>> {
        Constraint::new(self)
    }
}

/// Render a delta as whole seconds when it is one, milliseconds otherwise.
fn format_delta(delta: TimeDelta) -> String {
    let millis = delta.num_milliseconds();
    if millis % 1000 == 0 {
        format!("{}s", millis / 1000)
    } else {
        format!("{millis}ms")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::subject::subject_of;
    use futures::executor::block_on;

    fn target() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2024-06-01T12:00:00Z")
            .unwrap()
            .with_timezone(&Utc)
    }

    fn holds(tolerance: &Tolerance, subject: Option<DateTime<Utc>>) -> bool {
        block_on(tolerance.holds(&subject_of(subject)))
    }

    #[test]
    fn test_exactly_before_requires_exact_distance() {
        let constraint = exactly(TimeDelta::seconds(10)).before(target());
        assert!(holds(&constraint, Some(target() - TimeDelta::seconds(10))));
        assert!(!holds(&constraint, Some(target() - TimeDelta::seconds(11))));
        assert!(!holds(&constraint, Some(target() - TimeDelta::seconds(9))));
        assert!(!holds(&constraint, Some(target() + TimeDelta::seconds(10))));
    }

    #[test]
    fn test_at_least_after_boundary_passes() {
        let constraint = at_least(TimeDelta::seconds(10)).after(target());
        // at target+20s the distance is 20s >= 10s
        assert!(holds(&constraint, Some(target() + TimeDelta::seconds(20))));
        // boundary value: exactly 10s after
        assert!(holds(&constraint, Some(target() + TimeDelta::seconds(10))));
        assert!(!holds(&constraint, Some(target() + TimeDelta::seconds(5))));
    }

    #[test]
    fn test_at_least_is_directional() {
        let constraint = at_least(TimeDelta::seconds(10)).after(target());
        // 30s before the target: signed difference is negative
        assert!(!holds(&constraint, Some(target() - TimeDelta::seconds(30))));
    }

    #[test]
    fn test_absent_subject_always_fails() {
        assert!(!holds(&exactly(TimeDelta::zero()).before(target()), None));
        assert!(!holds(&at_least(TimeDelta::zero()).after(target()), None));
    }

    #[test]
    fn test_zero_tolerance_exactly_means_same_instant() {
        let constraint = exactly(TimeDelta::zero()).after(target());
        assert!(holds(&constraint, Some(target())));
    }

    #[test]
    fn test_negative_tolerance_is_rejected() {
        let constraint = at_least(TimeDelta::seconds(-1)).before(target());
        assert!(constraint.validate().is_err());
    }

    #[test]
    fn test_failure_summary_subsecond_tolerance() {
        let constraint = exactly(TimeDelta::milliseconds(1500)).before(target());
        let summary = constraint.describe(&subject_of(None::<DateTime<Utc>>), false);
        assert!(summary.contains("exactly 1500ms before"));
        assert!(summary.ends_with("but was absent"));
    }
}
