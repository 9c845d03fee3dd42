//! Cookie matchers: [`MorselMatcher`] for one cookie entry and
//! [`CookieMatcher`] for a whole [`CookieJar`].
//!
//! ```text
//! A CookieJar with cookie <hello> as A Morsel with value <"dude">, is secure, is httponly
//! ```

use crate::{CookieJar, Morsel};
use assay::{
    Composite, Description, Erased, EvalTrace, FieldPlugin, FlagPlugin, IntoMatchable, MatchError,
    Matcher, SelfDescribing, Verdict,
};

/// Candidate kind guarded by [`MorselMatcher`].
pub const MORSEL_KIND: &str = "Morsel";

/// Candidate kind guarded by [`CookieMatcher`].
pub const COOKIE_JAR_KIND: &str = "CookieJar";

fn max_age_of(morsel: &Morsel) -> Result<Option<i64>, MatchError> {
    morsel
        .max_age()
        .map(|raw| {
            raw.trim().parse::<i64>().map_err(|_| MatchError::Coercion {
                field: "max-age".to_string(),
                value: raw.to_string(),
                target: "i64",
            })
        })
        .transpose()
}

// ═══════════════════════════════════════════════════════════════════════════════
// MorselMatcher
// ═══════════════════════════════════════════════════════════════════════════════

/// Matches one cookie entry. Fragments are separated by `", "`.
#[derive(Debug)]
pub struct MorselMatcher {
    inner: Composite<Morsel>,
}

/// Match a morsel whose value matches `value`.
///
/// The value plugin is registered first; attribute checks follow in call
/// order.
///
/// # Example
///
/// ```
/// use assay::{assert_that, description_of};
/// use assay_http::{morsel, Morsel};
///
/// let hello = Morsel::builder("hello", "dude").secure(true).max_age("40").build();
/// let m = morsel("dude").secure().max_age(40);
/// assert_that(&hello, &m);
/// assert_eq!(
///     description_of(&m),
///     "A Morsel with value <\"dude\">, is secure, with max-age <40>."
/// );
/// ```
pub fn morsel(value: impl IntoMatchable<String>) -> MorselMatcher {
    MorselMatcher {
        inner: Composite::new(MORSEL_KIND, "A Morsel").separated_by(", "),
    }
    .with_value(value)
}

impl MorselMatcher {
    fn with_value(self, value: impl IntoMatchable<String>) -> Self {
        self.register(FieldPlugin::new(
            "value",
            |m: &Morsel| Some(m.value().to_string()),
            value,
        ))
    }

    /// Require the `Secure` flag to equal `secure`.
    #[must_use]
    pub fn is_secure(self, secure: bool) -> Self {
        self.register(FlagPlugin::new("secure", Morsel::secure, secure))
    }

    /// Require the `Secure` flag.
    #[must_use]
    pub fn secure(self) -> Self {
        self.is_secure(true)
    }

    /// Require the `HttpOnly` flag to equal `httponly`.
    #[must_use]
    pub fn is_httponly(self, httponly: bool) -> Self {
        self.register(FlagPlugin::new("httponly", Morsel::http_only, httponly))
    }

    /// Require the `HttpOnly` flag.
    #[must_use]
    pub fn httponly(self) -> Self {
        self.is_httponly(true)
    }

    /// Require `Max-Age`, read as an integer, to match `max_age`.
    ///
    /// An absent attribute fails with `has no max-age`. A value that is not an
    /// integer is a hard failure ([`MatchError::Coercion`]).
    #[must_use]
    pub fn max_age(self, max_age: impl IntoMatchable<i64>) -> Self {
        self.register(FieldPlugin::try_new("max-age", max_age_of, max_age))
    }

    /// Require the `Path` attribute to match `path`.
    #[must_use]
    pub fn with_path(self, path: impl IntoMatchable<String>) -> Self {
        self.register(FieldPlugin::new(
            "path",
            |m: &Morsel| m.path().map(str::to_string),
            path,
        ))
    }

    /// Require the `Domain` attribute to match `domain`.
    #[must_use]
    pub fn with_domain(self, domain: impl IntoMatchable<String>) -> Self {
        self.register(FieldPlugin::new(
            "domain",
            |m: &Morsel| m.domain().map(str::to_string),
            domain,
        ))
    }

    /// Require the `SameSite` attribute to match `same_site`.
    #[must_use]
    pub fn with_same_site(self, same_site: impl IntoMatchable<String>) -> Self {
        self.register(FieldPlugin::new(
            "samesite",
            |m: &Morsel| m.same_site().map(str::to_string),
            same_site,
        ))
    }

    /// Register a custom plugin.
    #[must_use]
    pub fn register(self, plugin: impl Matcher<Morsel> + 'static) -> Self {
        Self {
            inner: self.inner.register(plugin),
        }
    }

    /// Evaluate every plugin against `morsel`.
    ///
    /// # Errors
    ///
    /// Returns a hard error such as a malformed `Max-Age`.
    pub fn evaluate(&self, morsel: &Morsel) -> Result<EvalTrace, MatchError> {
        self.inner.evaluate(morsel)
    }

    /// Match candidates of any type, checking they are a [`Morsel`] first.
    #[must_use]
    pub fn erased(self) -> Erased<Morsel> {
        self.inner.erased()
    }
}

impl SelfDescribing for MorselMatcher {
    fn describe_to(&self, description: &mut Description) {
        self.inner.describe_to(description);
    }
}

impl Matcher<Morsel> for MorselMatcher {
    fn matches(&self, actual: &Morsel) -> Result<bool, MatchError> {
        self.inner.matches(actual)
    }

    fn describe_mismatch(&self, actual: &Morsel, description: &mut Description) -> Result<(), MatchError> {
        self.inner.describe_mismatch(actual, description)
    }

    fn verdict(&self, actual: &Morsel) -> Result<Verdict, MatchError> {
        self.inner.verdict(actual)
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// CookieMatcher
// ═══════════════════════════════════════════════════════════════════════════════

/// Matches a [`CookieJar`] key by key.
///
/// A missing key fails with `does not contain key <key>` and its morsel
/// matcher never runs.
#[derive(Debug)]
pub struct CookieMatcher {
    inner: Composite<CookieJar>,
}

/// Match any cookie jar. Add expectations with
/// [`with_cookie`](CookieMatcher::with_cookie).
#[must_use]
pub fn cookies() -> CookieMatcher {
    CookieMatcher {
        inner: Composite::new(COOKIE_JAR_KIND, "A CookieJar"),
    }
}

/// Match a jar holding `key` whose morsel matches `matcher`.
///
/// # Example
///
/// ```
/// use assay::check_that;
/// use assay_http::{cookie, morsel, CookieJar, Morsel};
///
/// let jar: CookieJar = [Morsel::builder("hello", "dude").build()].into_iter().collect();
/// assert!(check_that(&jar, &cookie("hello", morsel("dude"))).is_ok());
///
/// let failure = check_that(&jar, &cookie("bye", morsel("dude"))).unwrap_err();
/// assert!(failure.to_string().contains("does not contain key <bye>"));
/// ```
#[must_use]
pub fn cookie(key: impl Into<String>, matcher: MorselMatcher) -> CookieMatcher {
    cookies().with_cookie(key, matcher)
}

impl CookieMatcher {
    /// Require a cookie named `key` matching `matcher`.
    #[must_use]
    pub fn with_cookie(self, key: impl Into<String>, matcher: MorselMatcher) -> Self {
        let key = key.into();
        let lookup = key.clone();
        let plugin = FieldPlugin::new(
            format!("cookie <{key}>"),
            move |jar: &CookieJar| jar.get(&lookup).cloned(),
            matcher,
        )
        .described_as(format!("with cookie <{key}> as"))
        .missing_as(format!("does not contain key <{key}>"));
        self.register(plugin)
    }

    /// Require a cookie named `key` whose value matches `value`.
    ///
    /// Shorthand for `with_cookie(key, morsel(value))`.
    #[must_use]
    pub fn with_cookie_value(self, key: impl Into<String>, value: impl IntoMatchable<String>) -> Self {
        self.with_cookie(key, morsel(value))
    }

    /// Register a custom plugin.
    #[must_use]
    pub fn register(self, plugin: impl Matcher<CookieJar> + 'static) -> Self {
        Self {
            inner: self.inner.register(plugin),
        }
    }

    /// Number of cookie expectations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// `true` if no cookie is expected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Evaluate every expectation against `jar`.
    ///
    /// # Errors
    ///
    /// Returns a hard error raised by a morsel matcher.
    pub fn evaluate(&self, jar: &CookieJar) -> Result<EvalTrace, MatchError> {
        self.inner.evaluate(jar)
    }

    /// Match candidates of any type, checking they are a [`CookieJar`] first.
    #[must_use]
    pub fn erased(self) -> Erased<CookieJar> {
        self.inner.erased()
    }
}

impl SelfDescribing for CookieMatcher {
    fn describe_to(&self, description: &mut Description) {
        self.inner.describe_to(description);
    }
}

impl Matcher<CookieJar> for CookieMatcher {
    fn matches(&self, actual: &CookieJar) -> Result<bool, MatchError> {
        self.inner.matches(actual)
    }

    fn describe_mismatch(&self, actual: &CookieJar, description: &mut Description) -> Result<(), MatchError> {
        self.inner.describe_mismatch(actual, description)
    }

    fn verdict(&self, actual: &CookieJar) -> Result<Verdict, MatchError> {
        self.inner.verdict(actual)
    }
}
