//! Logical matchers — Boolean composition of matchers
//!
//! - [`AllOf`] — All children must match
//! - [`AnyOf`] — Any child must match
//! - [`Not`] — Inverts the inner matcher
//!
//! Unlike a [`Composite`](crate::Composite), logical matchers short-circuit:
//! they decide a boolean and do not collect per-child diagnostics.

use crate::{wrap, Description, IntoMatchable, MatchError, Matchable, Matcher, SelfDescribing};
use std::fmt::Debug;

/// All children must match. Short-circuits on the first failure.
#[derive(Debug)]
pub struct AllOf<V> {
    children: Vec<Matchable<V>>,
}

/// Any child must match. Short-circuits on the first success.
#[derive(Debug)]
pub struct AnyOf<V> {
    children: Vec<Matchable<V>>,
}

/// Inverts the inner matcher.
#[derive(Debug)]
pub struct Not<V> {
    inner: Matchable<V>,
}

/// Match when every child matches.
///
/// The mismatch names the first failing child only.
///
/// # Example
///
/// ```
/// use assay::{all_of, ends_with, starts_with, AllOf, Matcher};
///
/// let m: AllOf<String> = all_of([starts_with("app"), ends_with("json")]);
/// assert!(m.matches(&"application/json".to_string()).unwrap());
/// ```
pub fn all_of<V, X, I>(children: I) -> AllOf<V>
where
    X: IntoMatchable<V>,
    I: IntoIterator<Item = X>,
{
    AllOf {
        children: children.into_iter().map(wrap).collect(),
    }
}

/// Match when at least one child matches.
pub fn any_of<V, X, I>(children: I) -> AnyOf<V>
where
    X: IntoMatchable<V>,
    I: IntoIterator<Item = X>,
{
    AnyOf {
        children: children.into_iter().map(wrap).collect(),
    }
}

/// Match when `inner` does not.
pub fn not<V>(inner: impl IntoMatchable<V>) -> Not<V> {
    Not { inner: wrap(inner) }
}

fn describe_children<V: Debug>(children: &[Matchable<V>], joiner: &str, description: &mut Description) {
    description.append_text("(");
    for (i, child) in children.iter().enumerate() {
        if i > 0 {
            description.append_text(joiner);
        }
        child.describe_to(description);
    }
    description.append_text(")");
}

impl<V: Debug> SelfDescribing for AllOf<V> {
    fn describe_to(&self, description: &mut Description) {
        describe_children(&self.children, " and ", description);
    }
}

impl<V: PartialEq + Debug + Send + Sync> Matcher<V> for AllOf<V> {
    fn matches(&self, actual: &V) -> Result<bool, MatchError> {
        for child in &self.children {
            if !child.matches(actual)? {
                return Ok(false);
            }
        }
        Ok(true)
    }

    fn describe_mismatch(&self, actual: &V, description: &mut Description) -> Result<(), MatchError> {
        for child in &self.children {
            if !child.matches(actual)? {
                child.describe_to(description);
                description.append_text(" ");
                return child.describe_mismatch(actual, description);
            }
        }
        Ok(())
    }
}

impl<V: Debug> SelfDescribing for AnyOf<V> {
    fn describe_to(&self, description: &mut Description) {
        describe_children(&self.children, " or ", description);
    }
}

impl<V: PartialEq + Debug + Send + Sync> Matcher<V> for AnyOf<V> {
    fn matches(&self, actual: &V) -> Result<bool, MatchError> {
        for child in &self.children {
            if child.matches(actual)? {
                return Ok(true);
            }
        }
        Ok(false)
    }

    fn describe_mismatch(&self, actual: &V, description: &mut Description) -> Result<(), MatchError> {
        description.append_text("was ").append_value(actual);
        Ok(())
    }
}

impl<V: Debug> SelfDescribing for Not<V> {
    fn describe_to(&self, description: &mut Description) {
        description.append_text("not ");
        self.inner.describe_to(description);
    }
}

impl<V: PartialEq + Debug + Send + Sync> Matcher<V> for Not<V> {
    fn matches(&self, actual: &V) -> Result<bool, MatchError> {
        Ok(!self.inner.matches(actual)?)
    }

    fn describe_mismatch(&self, actual: &V, description: &mut Description) -> Result<(), MatchError> {
        description.append_text("was ").append_value(actual);
        Ok(())
    }
}
