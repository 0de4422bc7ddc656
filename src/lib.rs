//! # attest
//!
//! A fluent assertion engine with deferred failure aggregation.
//!
//! Calling code states an expectation about a value as a composable object,
//! evaluates it as an async operation or through a blocking bridge, and on
//! failure receives one rendered report, optionally merged with sibling
//! failures collected inside an enclosing scope.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use attest::{expect, is_one_of, run_blocking};
//!
//! #[test]
//! fn weekday_is_on_the_roster() {
//!     let weekday = "tuesday";
//!     run_blocking(
//!         expect!(weekday)
//!             .to(is_one_of(["monday", "tuesday"]))
//!             .because("the roster covers {0}", &[&"early week"])
//!             .evaluate(),
//!     )
//!     .unwrap();
//! }
//! ```
//!
//! ## Collecting several failures at once
//!
//! ```rust,ignore
//! use attest::{assert_all, expect, is_one_of, is_present, run_blocking};
//!
//! assert_all(|| {
//!     run_blocking(expect!(day).to(is_one_of(["sat", "sun"])).evaluate())?;
//!     run_blocking(expect!(slot).to(is_present()).evaluate())?;
//!     Ok(())
//! })?;
//! // one failure report, one line per failed expectation, in order
//! ```
//!
//! ## Suspending callers
//!
//! ```rust,ignore
//! use attest::{expect, satisfies_async};
//!
//! expect!(endpoint)
//!     .to(satisfies_async("a reachable endpoint", |e| Box::pin(probe(e))))
//!     .evaluate()
//!     .await?;
//! ```

pub mod bridge;
pub mod chain;
pub mod constraint;
pub mod error;
pub mod outcome;
pub mod reason;
pub mod scope;
pub mod subject;

// Entry points and chain
pub use chain::{Chain, Expectation};
pub use subject::{subject_of, Subject};

// Constraint families
pub use constraint::{
    at_least, exactly, is_absent, is_not_one_of, is_one_of, is_present, not, satisfies,
    satisfies_async, Constraint, Direction, IntoConstraint, Membership, Predicate, Presence,
    Satisfies, Tolerance, ToleranceBuilder,
};

// Evaluation results and errors
pub use error::AssertError;
pub use outcome::{Failure, Outcome};
pub use reason::Reason;

// Scoping and bridging
pub use bridge::run_blocking;
pub use scope::{assert_all, assert_all_async, assert_each};
