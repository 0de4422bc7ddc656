//! Caller-supplied justification clauses ("because ...").
//!
//! A `Reason` is an optional justification attached to a constraint before
//! evaluation. Arguments are formatted eagerly at attachment time, so mutable
//! caller state cannot change the reported reason between attachment and
//! failure. Rendering substitutes positional placeholders and is pure: it may
//! run zero or more times with identical output, and a passing evaluation
//! never renders it at all.

use std::fmt::Display;

/// A justification clause with positional `{0}`, `{1}`, ... placeholders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reason {
    template: String,
    args: Vec<String>,
}

impl Reason {
    /// Capture a template and its arguments.
    ///
    /// Arguments are formatted via `Display` immediately; only their rendered
    /// text is retained.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use attest::Reason;
    ///
    /// let reason = Reason::new("retention is {0} days", &[&30]);
    /// assert_eq!(reason.render(), "retention is 30 days");
    /// ```
    pub fn new(template: impl Into<String>, args: &[&dyn Display]) -> Self {
        Self {
            template: template.into(),
            args: args.iter().map(|a| a.to_string()).collect(),
        }
    }

    /// Substitute the captured arguments into the template.
    ///
    /// Placeholders with no matching argument are left as-is.
    pub fn render(&self) -> String {
        let mut rendered = self.template.clone();
        for (index, arg) in self.args.iter().enumerate() {
            rendered = rendered.replace(&format!("{{{index}}}"), arg);
        }
        rendered
    }
}
