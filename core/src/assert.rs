//! Assertion entry points
//!
//! [`check_that`] returns the failure as a value; [`assert_that`] panics with
//! it, which is the test-failure signal.
//!
//! ```text
//!
//! Expected: An HttpResponse with status code <300>.
//!      but: status code was <200>.
//! ```

use crate::{description_of, MatchError, Matcher};
use thiserror::Error;
use tracing::error;

/// A failed assertion.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AssertionFailure {
    /// The candidate did not match.
    #[error("\nExpected: {expected}\n     but: {but}\n")]
    Mismatch {
        /// The matcher's description.
        expected: String,
        /// The rendered mismatch.
        but: String,
    },

    /// The matcher could not evaluate the candidate.
    #[error("matcher failed: {0}")]
    Error(#[from] MatchError),
}

/// Check `actual` against `matcher`.
///
/// # Errors
///
/// Returns [`AssertionFailure::Mismatch`] when the candidate does not match,
/// or [`AssertionFailure::Error`] on a hard failure.
///
/// # Example
///
/// ```
/// use assay::{check_that, equal_to, AssertionFailure};
///
/// assert!(check_that(&200u16, &equal_to(200u16)).is_ok());
///
/// let failure = check_that(&404u16, &equal_to(200u16)).unwrap_err();
/// assert_eq!(
///     failure,
///     AssertionFailure::Mismatch { expected: "<200>".into(), but: "was <404>".into() }
/// );
/// ```
pub fn check_that<T, M>(actual: &T, matcher: &M) -> Result<(), AssertionFailure>
where
    T: ?Sized,
    M: Matcher<T> + ?Sized,
{
    let verdict = matcher.verdict(actual).inspect_err(|err| {
        error!(error = %err, "assertion could not be evaluated");
    })?;
    if verdict.matched {
        return Ok(());
    }
    let expected = description_of(matcher);
    let but = verdict.mismatch.unwrap_or_default();
    error!(%expected, %but, "assertion failed");
    Err(AssertionFailure::Mismatch { expected, but })
}

/// Assert that `actual` satisfies `matcher`.
///
/// # Panics
///
/// Panics with the rendered [`AssertionFailure`] when the check fails.
#[track_caller]
pub fn assert_that<T, M>(actual: &T, matcher: &M)
where
    T: ?Sized,
    M: Matcher<T> + ?Sized,
{
    if let Err(failure) = check_that(actual, matcher) {
        panic!("{failure}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{equal_to, starts_with};
    use pretty_assertions::assert_eq;

    #[test]
    fn passing_check_is_ok() {
        assert_eq!(check_that(&"dude".to_string(), &starts_with("du")), Ok(()));
    }

    #[test]
    fn failure_renders_expected_and_but() {
        let failure = check_that(&41i64, &equal_to(40i64)).unwrap_err();
        assert_eq!(failure.to_string(), "\nExpected: <40>\n     but: was <41>\n");
    }

    #[test]
    fn hard_error_is_wrapped() {
        let err = MatchError::InvalidCandidate {
            reason: "broken".into(),
        };
        let failure = AssertionFailure::from(err.clone());
        assert_eq!(failure, AssertionFailure::Error(err));
    }

    #[test]
    fn assert_that_passes() {
        assert_that(&200u16, &equal_to(200u16));
    }

    #[test]
    #[should_panic(expected = "but: was <404>")]
    fn assert_that_panics_on_mismatch() {
        assert_that(&404u16, &equal_to(200u16));
    }
}
