//! `Matchable` — Literal-or-rule expectations
//!
//! Builder methods accept either a bare value (`200`, `"dude"`, `true`) or an
//! already-built matcher (`greater_than(30)`, `starts_with("app")`). Both are
//! normalised by [`wrap`] into a [`Matchable`], and every composition layer
//! works only on `Matchable`.

use crate::leaf::describe_was;
use crate::{Description, MatchError, Matcher, SelfDescribing};
use std::fmt::{self, Debug};

/// An expectation: a literal compared by equality, or a delegated rule.
pub enum Matchable<V> {
    /// Equality against a literal value.
    Literal(V),
    /// A matcher deciding on its own.
    Rule(Box<dyn Matcher<V>>),
}

impl<V: Debug> Debug for Matchable<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(value) => f.debug_tuple("Literal").field(value).finish(),
            Self::Rule(rule) => f.debug_tuple("Rule").field(rule).finish(),
        }
    }
}

impl<V: Debug> SelfDescribing for Matchable<V> {
    fn describe_to(&self, description: &mut Description) {
        match self {
            Self::Literal(value) => {
                description.append_value(value);
            }
            Self::Rule(rule) => rule.describe_to(description),
        }
    }
}

impl<V: PartialEq + Debug + Send + Sync> Matcher<V> for Matchable<V> {
    fn matches(&self, actual: &V) -> Result<bool, MatchError> {
        match self {
            Self::Literal(value) => Ok(actual == value),
            Self::Rule(rule) => rule.matches(actual),
        }
    }

    fn describe_mismatch(&self, actual: &V, description: &mut Description) -> Result<(), MatchError> {
        match self {
            Self::Literal(_) => {
                describe_was(actual, description);
                Ok(())
            }
            Self::Rule(rule) => rule.describe_mismatch(actual, description),
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// IntoMatchable
// ═══════════════════════════════════════════════════════════════════════════════

/// Conversion into a [`Matchable<V>`].
///
/// Implemented for every `Matcher<V>` (becoming [`Matchable::Rule`]) and for
/// the literal types builder methods accept:
///
/// | Source | `V` |
/// |--------|-----|
/// | `&str`, `String` | `String` |
/// | `u16`, `i32` | `u16` (status codes) |
/// | `i64`, `i32`, `u32` | `i64` (numeric attributes) |
/// | `bool` | `bool` |
///
/// An `i32` outside the `u16` range becomes a rule that never matches.
#[diagnostic::on_unimplemented(
    message = "`{Self}` cannot be used as an expectation for `{V}` values",
    label = "expected a literal or a `Matcher<{V}>`",
    note = "pass a literal value or a matcher such as `equal_to(..)` or `greater_than(..)`"
)]
pub trait IntoMatchable<V> {
    /// Perform the conversion.
    fn into_matchable(self) -> Matchable<V>;
}

impl<V, M: Matcher<V> + 'static> IntoMatchable<V> for M {
    fn into_matchable(self) -> Matchable<V> {
        Matchable::Rule(Box::new(self))
    }
}

impl IntoMatchable<String> for &str {
    fn into_matchable(self) -> Matchable<String> {
        Matchable::Literal(self.to_string())
    }
}

impl IntoMatchable<String> for String {
    fn into_matchable(self) -> Matchable<String> {
        Matchable::Literal(self)
    }
}

impl IntoMatchable<u16> for u16 {
    fn into_matchable(self) -> Matchable<u16> {
        Matchable::Literal(self)
    }
}

impl IntoMatchable<u16> for i32 {
    fn into_matchable(self) -> Matchable<u16> {
        match u16::try_from(self) {
            Ok(value) => Matchable::Literal(value),
            Err(_) => Matchable::Rule(Box::new(OutOfRange { value: self })),
        }
    }
}

impl IntoMatchable<i64> for i64 {
    fn into_matchable(self) -> Matchable<i64> {
        Matchable::Literal(self)
    }
}

impl IntoMatchable<i64> for i32 {
    fn into_matchable(self) -> Matchable<i64> {
        Matchable::Literal(i64::from(self))
    }
}

impl IntoMatchable<i64> for u32 {
    fn into_matchable(self) -> Matchable<i64> {
        Matchable::Literal(i64::from(self))
    }
}

impl IntoMatchable<bool> for bool {
    fn into_matchable(self) -> Matchable<bool> {
        Matchable::Literal(self)
    }
}

/// Normalise a literal or matcher into a [`Matchable`].
///
/// # Example
///
/// ```
/// use assay::{description_of, greater_than, wrap, Matchable, Matcher};
///
/// let literal: Matchable<String> = wrap("dude");
/// assert!(literal.matches(&"dude".to_string()).unwrap());
///
/// let rule: Matchable<i64> = wrap(greater_than(30i64));
/// assert_eq!(description_of(&rule), "a value greater than <30>");
/// ```
pub fn wrap<V, X: IntoMatchable<V>>(value: X) -> Matchable<V> {
    value.into_matchable()
}

/// An expected integer no candidate of the target type can equal.
#[derive(Debug, Clone, Copy)]
struct OutOfRange {
    value: i32,
}

impl SelfDescribing for OutOfRange {
    fn describe_to(&self, description: &mut Description) {
        description.append_value(&self.value);
    }
}

impl Matcher<u16> for OutOfRange {
    fn matches(&self, _actual: &u16) -> Result<bool, MatchError> {
        Ok(false)
    }

    fn describe_mismatch(&self, actual: &u16, description: &mut Description) -> Result<(), MatchError> {
        describe_was(actual, description);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{description_of, mismatch_of, starts_with};

    #[test]
    fn literal_describes_and_mismatches() {
        let m: Matchable<String> = wrap("dude");
        assert!(m.matches(&"dude".to_string()).unwrap());
        assert!(!m.matches(&"dudette".to_string()).unwrap());
        assert_eq!(description_of(&m), "<\"dude\">");
        assert_eq!(mismatch_of(&m, &"dudette".to_string()).unwrap(), "was <\"dudette\">");
    }

    #[test]
    fn rule_delegates() {
        let m: Matchable<String> = wrap(starts_with("du"));
        assert!(matches!(m, Matchable::Rule(_)));
        assert!(m.matches(&"dude".to_string()).unwrap());
        assert_eq!(description_of(&m), "a string starting with <\"du\">");
    }

    #[test]
    fn integer_literals_pick_the_target_type() {
        let status: Matchable<u16> = wrap(200);
        assert!(status.matches(&200).unwrap());

        let age: Matchable<i64> = wrap(40);
        assert!(age.matches(&40).unwrap());

        let age: Matchable<i64> = wrap(40u32);
        assert!(age.matches(&40).unwrap());
    }

    #[test]
    fn out_of_range_status_never_matches() {
        let status: Matchable<u16> = wrap(70_000);
        assert!(!status.matches(&4464).unwrap());
        assert_eq!(description_of(&status), "<70000>");
        assert_eq!(mismatch_of(&status, &200).unwrap(), "was <200>");

        let negative: Matchable<u16> = wrap(-1);
        assert!(!negative.matches(&0).unwrap());
    }

    #[test]
    fn bool_literal() {
        let m: Matchable<bool> = wrap(true);
        assert!(m.matches(&true).unwrap());
        assert_eq!(mismatch_of(&m, &false).unwrap(), "was <false>");
    }
}
