//! Leaf matchers — Value-level matching with no sub-matchers
//!
//! # Available Matchers
//!
//! - [`EqualTo`] — Equality against an expected value
//! - [`Anything`] — Matches every candidate
//! - [`StringMatcher`] — Exact / prefix / suffix / contains / regex string match
//! - [`Compare`] — Comparison against a bound (`>`, `>=`, `<`, `<=`)

use crate::{Description, MatchError, Matcher, SelfDescribing};
use std::fmt::Debug;

/// Append the standard `was <actual>` mismatch.
pub(crate) fn describe_was<V: Debug + ?Sized>(actual: &V, description: &mut Description) {
    description.append_text("was ").append_value(actual);
}

// ═══════════════════════════════════════════════════════════════════════════════
// Equality
// ═══════════════════════════════════════════════════════════════════════════════

/// Equality matcher.
///
/// # Example
///
/// ```
/// use assay::{description_of, equal_to, Matcher};
///
/// let matcher = equal_to("dude".to_string());
/// assert!(matcher.matches(&"dude".to_string()).unwrap());
/// assert_eq!(description_of(&matcher), "<\"dude\">");
/// ```
#[derive(Debug, Clone)]
pub struct EqualTo<V> {
    expected: V,
}

impl<V> EqualTo<V> {
    /// Returns the expected value.
    #[must_use]
    pub fn expected(&self) -> &V {
        &self.expected
    }
}

/// Match candidates equal to `expected`.
pub fn equal_to<V>(expected: V) -> EqualTo<V> {
    EqualTo { expected }
}

impl<V: Debug> SelfDescribing for EqualTo<V> {
    fn describe_to(&self, description: &mut Description) {
        description.append_value(&self.expected);
    }
}

impl<V: PartialEq + Debug + Send + Sync> Matcher<V> for EqualTo<V> {
    fn matches(&self, actual: &V) -> Result<bool, MatchError> {
        Ok(*actual == self.expected)
    }

    fn describe_mismatch(&self, actual: &V, description: &mut Description) -> Result<(), MatchError> {
        describe_was(actual, description);
        Ok(())
    }
}

/// Matches every candidate.
#[derive(Debug, Clone, Copy, Default)]
pub struct Anything;

/// Match any candidate.
#[must_use]
pub fn anything() -> Anything {
    Anything
}

impl SelfDescribing for Anything {
    fn describe_to(&self, description: &mut Description) {
        description.append_text("ANYTHING");
    }
}

impl<T: ?Sized> Matcher<T> for Anything {
    fn matches(&self, _actual: &T) -> Result<bool, MatchError> {
        Ok(true)
    }

    fn describe_mismatch(&self, _actual: &T, _description: &mut Description) -> Result<(), MatchError> {
        Ok(())
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// StringMatcher
// ═══════════════════════════════════════════════════════════════════════════════

/// Where a literal pattern must sit in the candidate string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// The whole candidate.
    Whole,
    /// At the start.
    Start,
    /// At the end.
    End,
    /// Anywhere.
    Anywhere,
}

impl Placement {
    fn phrase(self) -> &'static str {
        match self {
            Self::Whole => "a string equal to ",
            Self::Start => "a string starting with ",
            Self::End => "a string ending with ",
            Self::Anywhere => "a string containing ",
        }
    }

    fn holds(self, haystack: &str, needle: &str) -> bool {
        match self {
            Self::Whole => haystack == needle,
            Self::Start => haystack.starts_with(needle),
            Self::End => haystack.ends_with(needle),
            Self::Anywhere => haystack.contains(needle),
        }
    }
}

/// String matcher: a placed literal or a regex.
///
/// Case-insensitive literals compare ASCII-lowercased text; the needle is
/// folded once at construction.
///
/// # Example
///
/// ```
/// use assay::{Matcher, StringMatcher};
///
/// let matcher = StringMatcher::prefix("APPLICATION/", true);
/// assert!(matcher.matches(&"application/json".to_string()).unwrap());
///
/// let matcher = StringMatcher::regex(r"^session-\d+$").unwrap();
/// assert!(matcher.matches(&"session-123".to_string()).unwrap());
/// assert!(!matcher.matches(&"session-abc".to_string()).unwrap());
/// ```
#[derive(Debug, Clone)]
pub enum StringMatcher {
    /// A literal at a [`Placement`].
    Literal {
        /// Where the literal must occur.
        placement: Placement,
        /// The literal as given, used in descriptions.
        value: String,
        /// Lowercased literal when matching ignores case.
        folded: Option<String>,
    },
    /// Regular expression match (RE2 semantics, linear time).
    Regex(regex::Regex),
}

impl StringMatcher {
    /// Match a literal at `placement`.
    #[must_use]
    pub fn literal(placement: Placement, value: impl Into<String>, ignore_case: bool) -> Self {
        let value = value.into();
        let folded = ignore_case.then(|| value.to_ascii_lowercase());
        Self::Literal {
            placement,
            value,
            folded,
        }
    }

    /// Create an exact match.
    #[must_use]
    pub fn exact(value: impl Into<String>, ignore_case: bool) -> Self {
        Self::literal(Placement::Whole, value, ignore_case)
    }

    /// Create a prefix match.
    #[must_use]
    pub fn prefix(value: impl Into<String>, ignore_case: bool) -> Self {
        Self::literal(Placement::Start, value, ignore_case)
    }

    /// Create a suffix match.
    #[must_use]
    pub fn suffix(value: impl Into<String>, ignore_case: bool) -> Self {
        Self::literal(Placement::End, value, ignore_case)
    }

    /// Create a contains match.
    #[must_use]
    pub fn contains(value: impl Into<String>, ignore_case: bool) -> Self {
        Self::literal(Placement::Anywhere, value, ignore_case)
    }

    /// Create a regex match.
    ///
    /// # Errors
    ///
    /// Returns [`MatchError::InvalidPattern`] if the pattern does not compile.
    pub fn regex(pattern: &str) -> Result<Self, MatchError> {
        compile_regex(pattern, pattern)
    }

    /// Create a case-insensitive regex match.
    ///
    /// Prepends `(?i)` to the pattern.
    ///
    /// # Errors
    ///
    /// Returns [`MatchError::InvalidPattern`] if the pattern does not compile.
    pub fn regex_ignore_case(pattern: &str) -> Result<Self, MatchError> {
        compile_regex(&format!("(?i){pattern}"), pattern)
    }

    fn is_match(&self, input: &str) -> bool {
        match self {
            Self::Literal {
                placement,
                folded: Some(needle),
                ..
            } => placement.holds(&input.to_ascii_lowercase(), needle),
            Self::Literal {
                placement, value, ..
            } => placement.holds(input, value),
            Self::Regex(re) => re.is_match(input),
        }
    }
}

fn compile_regex(source: &str, pattern: &str) -> Result<StringMatcher, MatchError> {
    regex::Regex::new(source)
        .map(StringMatcher::Regex)
        .map_err(|e| MatchError::InvalidPattern {
            pattern: pattern.to_string(),
            reason: e.to_string(),
        })
}

impl SelfDescribing for StringMatcher {
    fn describe_to(&self, description: &mut Description) {
        match self {
            Self::Literal {
                placement,
                value,
                folded,
            } => {
                description
                    .append_text(placement.phrase())
                    .append_value(value.as_str());
                if folded.is_some() {
                    description.append_text(" ignoring case");
                }
            }
            Self::Regex(re) => {
                description
                    .append_text("a string matching /")
                    .append_text(re.as_str())
                    .append_text("/");
            }
        }
    }
}

impl Matcher<String> for StringMatcher {
    fn matches(&self, actual: &String) -> Result<bool, MatchError> {
        Ok(self.is_match(actual))
    }

    fn describe_mismatch(&self, actual: &String, description: &mut Description) -> Result<(), MatchError> {
        describe_was(actual, description);
        Ok(())
    }
}

/// Match strings equal to `value`, ignoring ASCII case.
#[must_use]
pub fn equal_to_ignoring_case(value: impl Into<String>) -> StringMatcher {
    StringMatcher::exact(value, true)
}

/// Match strings starting with `prefix`.
#[must_use]
pub fn starts_with(prefix: impl Into<String>) -> StringMatcher {
    StringMatcher::prefix(prefix, false)
}

/// Match strings ending with `suffix`.
#[must_use]
pub fn ends_with(suffix: impl Into<String>) -> StringMatcher {
    StringMatcher::suffix(suffix, false)
}

/// Match strings containing `substring`.
#[must_use]
pub fn contains_string(substring: impl Into<String>) -> StringMatcher {
    StringMatcher::contains(substring, false)
}

/// Match strings against a regular expression.
///
/// # Errors
///
/// Returns [`MatchError::InvalidPattern`] if the pattern does not compile.
pub fn matches_regex(pattern: &str) -> Result<StringMatcher, MatchError> {
    StringMatcher::regex(pattern)
}

// ═══════════════════════════════════════════════════════════════════════════════
// Compare
// ═══════════════════════════════════════════════════════════════════════════════

/// Comparison operator used by [`Compare`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    /// `actual > bound`
    GreaterThan,
    /// `actual >= bound`
    AtLeast,
    /// `actual < bound`
    LessThan,
    /// `actual <= bound`
    AtMost,
}

impl Comparison {
    fn phrase(self) -> &'static str {
        match self {
            Self::GreaterThan => "a value greater than ",
            Self::AtLeast => "a value greater than or equal to ",
            Self::LessThan => "a value less than ",
            Self::AtMost => "a value less than or equal to ",
        }
    }
}

/// Matches values that compare against a bound.
#[derive(Debug, Clone)]
pub struct Compare<V> {
    comparison: Comparison,
    bound: V,
}

impl<V> Compare<V> {
    /// Create an ordering matcher.
    pub fn new(comparison: Comparison, bound: V) -> Self {
        Self { comparison, bound }
    }
}

/// Match values strictly greater than `bound`.
pub fn greater_than<V>(bound: V) -> Compare<V> {
    Compare::new(Comparison::GreaterThan, bound)
}

/// Match values greater than or equal to `bound`.
pub fn at_least<V>(bound: V) -> Compare<V> {
    Compare::new(Comparison::AtLeast, bound)
}

/// Match values strictly less than `bound`.
pub fn less_than<V>(bound: V) -> Compare<V> {
    Compare::new(Comparison::LessThan, bound)
}

/// Match values less than or equal to `bound`.
pub fn at_most<V>(bound: V) -> Compare<V> {
    Compare::new(Comparison::AtMost, bound)
}

impl<V: Debug> SelfDescribing for Compare<V> {
    fn describe_to(&self, description: &mut Description) {
        description
            .append_text(self.comparison.phrase())
            .append_value(&self.bound);
    }
}

impl<V: PartialOrd + Debug + Send + Sync> Matcher<V> for Compare<V> {
    fn matches(&self, actual: &V) -> Result<bool, MatchError> {
        Ok(match self.comparison {
            Comparison::GreaterThan => *actual > self.bound,
            Comparison::AtLeast => *actual >= self.bound,
            Comparison::LessThan => *actual < self.bound,
            Comparison::AtMost => *actual <= self.bound,
        })
    }

    fn describe_mismatch(&self, actual: &V, description: &mut Description) -> Result<(), MatchError> {
        describe_was(actual, description);
        Ok(())
    }
}
