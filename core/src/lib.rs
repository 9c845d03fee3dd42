//! assay - Composable, self-describing matchers for test assertions
//!
//! A matcher answers whether a candidate matches, describes what it expects,
//! and explains why a candidate does not match. Matchers compose: small
//! single-attribute *plugins* are registered on a *composite*, which checks
//! the candidate's kind, evaluates every plugin, and renders one combined
//! message.
//!
//! # Architecture
//!
//! - [`Description`] — Append-only sink for expectation and mismatch text
//! - [`Matcher<T>`] — The match / describe / describe-mismatch contract
//! - [`Matchable<V>`] — A literal or a rule; produced by [`wrap`]
//! - [`FieldPlugin`] / [`FlagPlugin`] — One rule over one attribute
//! - [`Composite<T>`] — Ordered plugins with a kind precondition
//! - [`EvalTrace`] — Fresh per-evaluation diagnostics
//! - [`assert_that`] / [`check_that`] — Assertion entry points
//!
//! # Key Design Insights
//!
//! 1. **Accessors, not reflection**: every plugin owns a closure that extracts
//!    its attribute. A missing attribute fails the plugin without running the
//!    comparison.
//!
//! 2. **No stored diagnostics**: evaluation returns a fresh [`EvalTrace`], so
//!    one matcher can be checked against any number of candidates.
//!
//! 3. **Consuming builders**: `register` takes `self` and returns a new
//!    composite, so a matcher borrowed for matching cannot change.
//!
//! # Example
//!
//! ```
//! use assay::prelude::*;
//!
//! #[derive(Debug)]
//! struct Account { owner: String, balance: i64, active: bool }
//!
//! let m = Composite::new("Account", "An Account")
//!     .register(FieldPlugin::new("owner", |a: &Account| Some(a.owner.clone()), starts_with("al")))
//!     .register(FieldPlugin::new("balance", |a: &Account| Some(a.balance), greater_than(0i64)))
//!     .register(FlagPlugin::new("active", |a: &Account| a.active, true));
//!
//! let account = Account { owner: "alice".into(), balance: -5, active: true };
//! let failure = check_that(&account, &m).unwrap_err();
//! assert_eq!(
//!     failure.to_string(),
//!     "\nExpected: An Account with owner a string starting with <\"al\">; \
//!      with balance a value greater than <0>; is active.\n     but: balance was <-5>.\n"
//! );
//! ```
//!
//! # Extensions
//!
//! - [`assay-http`](https://docs.rs/assay-http) — HTTP response and cookie matchers (separate crate)

// ═══════════════════════════════════════════════════════════════════════════════
// Modules
// ═══════════════════════════════════════════════════════════════════════════════

mod assert;
mod composite;
mod description;
mod leaf;
mod logic;
mod matchable;
mod matcher;
mod plugin;
mod trace;

#[cfg(feature = "config")]
mod config;

// ═══════════════════════════════════════════════════════════════════════════════
// Public API
// ═══════════════════════════════════════════════════════════════════════════════

// Core types
pub use composite::{Composite, Erased, DEFAULT_SEPARATOR, DEFAULT_TERMINATOR};
pub use description::{description_of, Description, SelfDescribing};
pub use matchable::{wrap, IntoMatchable, Matchable};
pub use matcher::{mismatch_of, Matcher, Verdict};
pub use plugin::{flag_phrase, Accessor, FieldPlugin, FlagPlugin};

// Assertions
pub use assert::{assert_that, check_that, AssertionFailure};

// Trace types
pub use trace::{EvalTrace, PluginTrace};

// Concrete matchers
pub use leaf::{
    anything, at_least, at_most, contains_string, ends_with, equal_to, equal_to_ignoring_case,
    greater_than, less_than, matches_regex, starts_with, Anything, Compare, Comparison, EqualTo,
    Placement, StringMatcher,
};
pub use logic::{all_of, any_of, not, AllOf, AnyOf, Not};

// Config (feature-gated)
#[cfg(feature = "config")]
pub use config::{ConfigValue, ValueConfig, IGNORE_CASE_KEY};

// ═══════════════════════════════════════════════════════════════════════════════
// Prelude
// ═══════════════════════════════════════════════════════════════════════════════

/// Prelude module for convenient imports.
///
/// ```
/// use assay::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        // Matchers
        all_of,
        any_of,
        anything,
        // Assertions
        assert_that,
        at_least,
        at_most,
        check_that,
        contains_string,
        // Core types
        description_of,
        ends_with,
        equal_to,
        equal_to_ignoring_case,
        greater_than,
        less_than,
        matches_regex,
        not,
        starts_with,
        wrap,
        AssertionFailure,
        Composite,
        Description,
        EvalTrace,
        FieldPlugin,
        FlagPlugin,
        IntoMatchable,
        // Errors
        MatchError,
        Matchable,
        Matcher,
        SelfDescribing,
        StringMatcher,
    };
}

// ═══════════════════════════════════════════════════════════════════════════════
// Errors
// ═══════════════════════════════════════════════════════════════════════════════

/// Errors from matcher construction and evaluation.
///
/// Construction and config errors surface when a matcher is built. At match
/// time only [`Coercion`](Self::Coercion) and
/// [`InvalidCandidate`](Self::InvalidCandidate) occur; an ordinary mismatch is
/// never an error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MatchError {
    /// A rule was configured with no expectation.
    #[error("no expectation given for {field}")]
    MissingExpectation {
        /// The field being configured.
        field: String,
    },

    /// A rule was configured with more than one expectation.
    #[error("ambiguous expectation for {field}: found {}", .found.join(", "))]
    AmbiguousExpectation {
        /// The field being configured.
        field: String,
        /// The competing rule keys.
        found: Vec<String>,
    },

    /// An attribute could not be converted for comparison.
    #[error("cannot read {field} value \"{value}\" as {target}")]
    Coercion {
        /// The attribute being read.
        field: String,
        /// The raw attribute value.
        value: String,
        /// The target type.
        target: &'static str,
    },

    /// A regex or string pattern is invalid.
    #[error("invalid pattern \"{pattern}\": {reason}")]
    InvalidPattern {
        /// The pattern that failed to compile.
        pattern: String,
        /// The underlying error message.
        reason: String,
    },

    /// Configuration deserialization or construction failed.
    #[error("invalid config: {reason}")]
    InvalidConfig {
        /// The underlying error message.
        reason: String,
    },

    /// The candidate could not be built or inspected.
    #[error("invalid candidate: {reason}")]
    InvalidCandidate {
        /// What was wrong with the candidate.
        reason: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_messages() {
        let err = MatchError::AmbiguousExpectation {
            field: "content".into(),
            found: vec!["prefix".into(), "suffix".into()],
        };
        assert_eq!(
            err.to_string(),
            "ambiguous expectation for content: found prefix, suffix"
        );

        let err = MatchError::Coercion {
            field: "max-age".into(),
            value: "forty".into(),
            target: "i64",
        };
        assert_eq!(err.to_string(), "cannot read max-age value \"forty\" as i64");
    }

    #[test]
    fn error_is_std_error() {
        fn assert_error<E: std::error::Error + Send + Sync + 'static>() {}
        assert_error::<MatchError>();
        assert_error::<AssertionFailure>();
    }
}
