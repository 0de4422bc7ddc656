//! Outcome model and the caller-facing failure report.
//!
//! Internal evaluation is exception-free: every constraint evaluation produces
//! exactly one [`Outcome`], and raised-failure objects ([`Failure`]) appear
//! only at the caller boundary, either directly or aggregated by a scope.

use crate::reason::Reason;
use serde::Serialize;
use std::fmt;

/// The result of evaluating one constraint against its subject.
#[derive(Debug, Clone)]
pub enum Outcome {
    /// The expectation held.
    Pass,
    /// The expectation did not hold.
    Fail {
        /// Description of why, without the subject's expression text.
        summary: String,
        /// Caller-supplied justification, if one was attached.
        reason: Option<Reason>,
    },
}

impl Outcome {
    /// Whether the expectation held.
    pub fn is_pass(&self) -> bool {
        matches!(self, Outcome::Pass)
    }

    /// Render the full failure message for a subject expression, or `None`
    /// for a pass. The reason clause is only formatted here, on failure.
    pub(crate) fn render(&self, expression: &str) -> Option<String> {
        match self {
            Outcome::Pass => None,
            Outcome::Fail { summary, reason } => {
                let mut message = format!("expected {expression} {summary}");
                if let Some(reason) = reason {
                    message.push_str(" because ");
                    message.push_str(&reason.render());
                }
                Some(message)
            }
        }
    }
}

/// The caller-facing assertion failure report.
///
/// Holds one rendered message per failed expectation, in evaluation order.
/// Entries are never reordered, deduplicated, or summarized.
#[derive(Debug, Clone, Serialize)]
pub struct Failure {
    entries: Vec<String>,
}

impl Failure {
    /// A report for a single failed expectation.
    pub(crate) fn single(message: String) -> Self {
        Self {
            entries: vec![message],
        }
    }

    /// A report aggregating every failure a scope collected, in call order.
    pub(crate) fn aggregate(entries: Vec<String>) -> Self {
        Self { entries }
    }

    /// The rendered messages, in evaluation order.
    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    /// The fully rendered report text.
    pub fn message(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.entries.as_slice() {
            [single] => f.write_str(single),
            entries => {
                writeln!(f, "{} expectations were not met:", entries.len())?;
                for (i, entry) in entries.iter().enumerate() {
                    if i > 0 {
                        writeln!(f)?;
                    }
                    write!(f, "  {}) {}", i + 1, entry)?;
                }
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pass_renders_nothing() {
        assert_eq!(Outcome::Pass.render("subject"), None);
    }

    #[test]
    fn test_fail_renders_expression_and_summary() {
        let outcome = Outcome::Fail {
            summary: "to be present".to_string(),
            reason: None,
        };
        assert_eq!(
            outcome.render("`config`").as_deref(),
            Some("expected `config` to be present")
        );
    }

    #[test]
    fn test_fail_renders_reason_clause() {
        let outcome = Outcome::Fail {
            summary: "to be present".to_string(),
            reason: Some(Reason::new("startup needs {0}", &[&"a config"])),
        };
        assert_eq!(
            outcome.render("`config`").as_deref(),
            Some("expected `config` to be present because startup needs a config")
        );
    }

    #[test]
    fn test_single_entry_report_is_bare() {
        let failure = Failure::single("expected x to be present".to_string());
        assert_eq!(failure.message(), "expected x to be present");
    }

    #[test]
    fn test_aggregate_report_keeps_order() {
        let failure = Failure::aggregate(vec!["first".to_string(), "second".to_string()]);
        let message = failure.message();
        assert!(message.starts_with("2 expectations were not met:"));
        let first = message.find("first").unwrap();
        let second = message.find("second").unwrap();
        assert!(first < second);
    }

    #[test]
    fn test_serialized_report_exposes_entries_in_order() {
        let failure = Failure::aggregate(vec!["a".to_string(), "b".to_string()]);
        let json = serde_json::to_value(&failure).unwrap();
        assert_eq!(json["entries"], serde_json::json!(["a", "b"]));
    }
}
