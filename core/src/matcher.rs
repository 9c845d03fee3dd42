//! `Matcher` — The match/describe contract shared by every matcher
//!
//! A matcher answers three questions about a candidate:
//!
//! - does it match? ([`Matcher::matches`])
//! - what was expected? ([`SelfDescribing::describe_to`])
//! - why did it not match? ([`Matcher::describe_mismatch`])
//!
//! Leaf matchers, plugins and composites all implement the same trait, so a
//! composite can be nested anywhere a plugin is accepted.

use crate::{Description, MatchError, SelfDescribing};
use std::fmt::Debug;

/// A self-describing predicate over candidates of type `T`.
///
/// # Hard failures
///
/// `matches` returns `Err` only when the candidate cannot be inspected at
/// all (e.g. a numeric attribute that does not parse). An ordinary
/// non-match is `Ok(false)`, explained later through
/// [`describe_mismatch`](Self::describe_mismatch).
///
/// # Thread Safety
///
/// Matchers hold no per-evaluation state and must be `Send + Sync`.
///
/// # Example
///
/// ```
/// use assay::{equal_to, Matcher};
///
/// let matcher = equal_to(200u16);
/// assert!(matcher.matches(&200).unwrap());
/// assert!(!matcher.matches(&404).unwrap());
/// ```
#[diagnostic::on_unimplemented(
    message = "`{Self}` does not implement `Matcher<{T}>`",
    label = "this type cannot match candidates of type `{T}`",
    note = "a matcher must implement `matches`, `describe_mismatch` and `SelfDescribing::describe_to`"
)]
pub trait Matcher<T: ?Sized>: SelfDescribing + Send + Sync + Debug {
    /// Check whether `actual` satisfies this matcher.
    ///
    /// # Errors
    ///
    /// Returns [`MatchError`] when `actual` cannot be evaluated at all.
    fn matches(&self, actual: &T) -> Result<bool, MatchError>;

    /// Append why `actual` does not match.
    ///
    /// Only meaningful after `matches` returned `false`.
    ///
    /// # Errors
    ///
    /// Same conditions as [`matches`](Self::matches).
    fn describe_mismatch(&self, actual: &T, description: &mut Description)
        -> Result<(), MatchError>;

    /// Evaluate `actual` into a fresh [`Verdict`].
    ///
    /// # Errors
    ///
    /// Same conditions as [`matches`](Self::matches).
    fn verdict(&self, actual: &T) -> Result<Verdict, MatchError> {
        if self.matches(actual)? {
            return Ok(Verdict::matched());
        }
        let mut description = Description::new();
        self.describe_mismatch(actual, &mut description)?;
        Ok(Verdict::mismatched(description.into_string()))
    }
}

// Blanket implementation for boxed matchers
#[diagnostic::do_not_recommend]
impl<T: ?Sized, M: Matcher<T> + ?Sized> Matcher<T> for Box<M> {
    fn matches(&self, actual: &T) -> Result<bool, MatchError> {
        (**self).matches(actual)
    }

    fn describe_mismatch(
        &self,
        actual: &T,
        description: &mut Description,
    ) -> Result<(), MatchError> {
        (**self).describe_mismatch(actual, description)
    }

    fn verdict(&self, actual: &T) -> Result<Verdict, MatchError> {
        (**self).verdict(actual)
    }
}

/// Result of a single evaluation, owned by the caller.
///
/// A new `Verdict` is produced per evaluation; nothing is cached on the
/// matcher, so one matcher can be evaluated against any number of candidates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verdict {
    /// Whether the candidate matched.
    pub matched: bool,
    /// Rendered mismatch text, present only when `matched` is `false`.
    pub mismatch: Option<String>,
}

impl Verdict {
    /// A successful match.
    #[must_use]
    pub fn matched() -> Self {
        Self {
            matched: true,
            mismatch: None,
        }
    }

    /// A failed match with its rendered explanation.
    #[must_use]
    pub fn mismatched(mismatch: impl Into<String>) -> Self {
        Self {
            matched: false,
            mismatch: Some(mismatch.into()),
        }
    }
}

/// Render the mismatch of `actual` against `matcher` into a fresh string.
///
/// # Errors
///
/// Propagates hard failures from the matcher.
pub fn mismatch_of<T: ?Sized, M: Matcher<T> + ?Sized>(
    matcher: &M,
    actual: &T,
) -> Result<String, MatchError> {
    let mut description = Description::new();
    matcher.describe_mismatch(actual, &mut description)?;
    Ok(description.into_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct IsEven;

    impl SelfDescribing for IsEven {
        fn describe_to(&self, description: &mut Description) {
            description.append_text("an even number");
        }
    }

    impl Matcher<i64> for IsEven {
        fn matches(&self, actual: &i64) -> Result<bool, MatchError> {
            Ok(actual % 2 == 0)
        }

        fn describe_mismatch(
            &self,
            actual: &i64,
            description: &mut Description,
        ) -> Result<(), MatchError> {
            description.append_text("was ").append_value(actual);
            Ok(())
        }
    }

    #[test]
    fn verdict_is_fresh_per_call() {
        let m = IsEven;
        assert_eq!(m.verdict(&3).unwrap(), Verdict::mismatched("was <3>"));
        assert_eq!(m.verdict(&4).unwrap(), Verdict::matched());
        assert_eq!(m.verdict(&5).unwrap(), Verdict::mismatched("was <5>"));
    }

    #[test]
    fn boxed_matcher_forwards() {
        let m: Box<dyn Matcher<i64>> = Box::new(IsEven);
        assert!(m.matches(&2).unwrap());
        assert_eq!(mismatch_of(&m, &7).unwrap(), "was <7>");
        assert_eq!(crate::description_of(&m), "an even number");
    }

    #[test]
    fn matcher_is_send_sync() {
        fn assert_send_sync<T: Send + Sync + ?Sized>() {}
        assert_send_sync::<Box<dyn Matcher<i64>>>();
    }
}
