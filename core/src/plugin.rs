//! Plugins — One rule over one attribute of a candidate
//!
//! A plugin pairs an accessor closure with an expectation:
//!
//! - [`FieldPlugin`] — Extracts an optional value and matches it against a
//!   [`Matchable`]. A missing value never reaches the comparison.
//! - [`FlagPlugin`] — A boolean attribute rendered as `is <field>` /
//!   `is not <field>`.
//!
//! Plugins are registered on a [`Composite`](crate::Composite), which
//! aggregates their verdicts and descriptions.

use crate::{wrap, Description, IntoMatchable, MatchError, Matchable, Matcher, SelfDescribing};
use std::fmt::{self, Debug};

/// Fallible accessor: `Ok(None)` means the attribute is absent.
pub type Accessor<C, V> = Box<dyn Fn(&C) -> Result<Option<V>, MatchError> + Send + Sync>;

// ═══════════════════════════════════════════════════════════════════════════════
// FieldPlugin
// ═══════════════════════════════════════════════════════════════════════════════

/// Matches one extracted attribute against an expectation.
///
/// # Rendering
///
/// | Situation | Text |
/// |-----------|------|
/// | describe | `<prefix> <expected>` (prefix defaults to `with <label>`) |
/// | attribute absent | `<missing>` (defaults to `has no <label>`) |
/// | attribute present | `<label> <expected mismatch>` |
///
/// # Example
///
/// ```
/// use assay::{description_of, mismatch_of, FieldPlugin, Matcher};
///
/// struct Point { x: i64 }
///
/// let plugin = FieldPlugin::new("x", |p: &Point| Some(p.x), 3i64);
/// assert!(plugin.matches(&Point { x: 3 }).unwrap());
/// assert_eq!(description_of(&plugin), "with x <3>");
/// assert_eq!(mismatch_of(&plugin, &Point { x: 4 }).unwrap(), "x was <4>");
/// ```
pub struct FieldPlugin<C: ?Sized, V> {
    label: String,
    prefix: String,
    missing: String,
    accessor: Accessor<C, V>,
    expected: Matchable<V>,
}

impl<C: ?Sized, V> FieldPlugin<C, V> {
    /// Create a plugin from an infallible accessor.
    pub fn new<F>(label: impl Into<String>, accessor: F, expected: impl IntoMatchable<V>) -> Self
    where
        F: Fn(&C) -> Option<V> + Send + Sync + 'static,
    {
        Self::try_new(label, move |candidate: &C| Ok(accessor(candidate)), expected)
    }

    /// Create a plugin from a fallible accessor.
    ///
    /// An `Err` from the accessor is a hard failure and propagates out of
    /// `matches` and `describe_mismatch`.
    pub fn try_new<F>(label: impl Into<String>, accessor: F, expected: impl IntoMatchable<V>) -> Self
    where
        F: Fn(&C) -> Result<Option<V>, MatchError> + Send + Sync + 'static,
    {
        let label = label.into();
        Self {
            prefix: format!("with {label}"),
            missing: format!("has no {label}"),
            label,
            accessor: Box::new(accessor),
            expected: wrap(expected),
        }
    }

    /// Replace the describe prefix.
    #[must_use]
    pub fn described_as(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// Replace the fragment used when the attribute is absent.
    #[must_use]
    pub fn missing_as(mut self, missing: impl Into<String>) -> Self {
        self.missing = missing.into();
        self
    }

    /// The label prefixed to mismatch fragments.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// The expectation this plugin checks.
    #[must_use]
    pub fn expected(&self) -> &Matchable<V> {
        &self.expected
    }
}

impl<C: ?Sized, V: Debug> Debug for FieldPlugin<C, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldPlugin")
            .field("label", &self.label)
            .field("expected", &self.expected)
            .finish_non_exhaustive()
    }
}

impl<C: ?Sized, V: Debug> SelfDescribing for FieldPlugin<C, V> {
    fn describe_to(&self, description: &mut Description) {
        description.append_text(&self.prefix).append_text(" ");
        self.expected.describe_to(description);
    }
}

impl<C: ?Sized, V> Matcher<C> for FieldPlugin<C, V>
where
    V: PartialEq + Debug + Send + Sync,
{
    fn matches(&self, actual: &C) -> Result<bool, MatchError> {
        match (self.accessor)(actual)? {
            Some(value) => self.expected.matches(&value),
            None => Ok(false),
        }
    }

    fn describe_mismatch(&self, actual: &C, description: &mut Description) -> Result<(), MatchError> {
        match (self.accessor)(actual)? {
            Some(value) => {
                description.append_text(&self.label).append_text(" ");
                self.expected.describe_mismatch(&value, description)
            }
            None => {
                description.append_text(&self.missing);
                Ok(())
            }
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// FlagPlugin
// ═══════════════════════════════════════════════════════════════════════════════

/// Render a boolean attribute: `is secure` / `is not secure`.
///
/// Used both for the expectation and for the observed value, so a failed
/// `is_secure(false)` reads `is not secure` against `is secure`.
#[must_use]
pub fn flag_phrase(field: &str, value: bool) -> String {
    if value {
        format!("is {field}")
    } else {
        format!("is not {field}")
    }
}

/// Matches a boolean attribute against an expected flag value.
pub struct FlagPlugin<C: ?Sized> {
    field: String,
    accessor: Box<dyn Fn(&C) -> bool + Send + Sync>,
    expected: bool,
}

impl<C: ?Sized> FlagPlugin<C> {
    /// Create a flag plugin.
    pub fn new<F>(field: impl Into<String>, accessor: F, expected: bool) -> Self
    where
        F: Fn(&C) -> bool + Send + Sync + 'static,
    {
        Self {
            field: field.into(),
            accessor: Box::new(accessor),
            expected,
        }
    }

    /// The expected flag value.
    #[must_use]
    pub fn expected(&self) -> bool {
        self.expected
    }
}

impl<C: ?Sized> Debug for FlagPlugin<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FlagPlugin")
            .field("field", &self.field)
            .field("expected", &self.expected)
            .finish_non_exhaustive()
    }
}

impl<C: ?Sized> SelfDescribing for FlagPlugin<C> {
    fn describe_to(&self, description: &mut Description) {
        description.append_text(&flag_phrase(&self.field, self.expected));
    }
}

impl<C: ?Sized> Matcher<C> for FlagPlugin<C> {
    fn matches(&self, actual: &C) -> Result<bool, MatchError> {
        Ok((self.accessor)(actual) == self.expected)
    }

    fn describe_mismatch(&self, actual: &C, description: &mut Description) -> Result<(), MatchError> {
        description.append_text(&flag_phrase(&self.field, (self.accessor)(actual)));
        Ok(())
    }
}
