//! Cookie contexts: [`Morsel`] and [`CookieJar`].
//!
//! A `Morsel` is one cookie entry with its attributes kept in their raw
//! string form. Parsing `Set-Cookie` header values is delegated to the
//! `cookie` crate.

use assay::MatchError;
use std::collections::BTreeMap;

/// One cookie entry and its attributes.
///
/// `max-age` stays string-typed, as it appears on the wire; matchers coerce
/// it when they compare.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Morsel {
    name: String,
    value: String,
    secure: bool,
    http_only: bool,
    max_age: Option<String>,
    path: Option<String>,
    domain: Option<String>,
    same_site: Option<String>,
}

impl Morsel {
    /// Create a builder for a morsel named `name` holding `value`.
    #[must_use]
    pub fn builder(name: impl Into<String>, value: impl Into<String>) -> MorselBuilder {
        MorselBuilder {
            morsel: Self {
                name: name.into(),
                value: value.into(),
                ..Self::default()
            },
        }
    }

    /// Parse a `Set-Cookie` header value.
    ///
    /// # Errors
    ///
    /// Returns [`MatchError::InvalidCandidate`] if the header does not parse.
    ///
    /// `Max-Age` is kept as the raw attribute text, so a value the `cookie`
    /// crate would drop or clamp still reaches the matchers unchanged.
    pub fn parse(set_cookie: &str) -> Result<Self, MatchError> {
        let parsed =
            ::cookie::Cookie::parse(set_cookie).map_err(|e| MatchError::InvalidCandidate {
                reason: format!("malformed Set-Cookie \"{set_cookie}\": {e}"),
            })?;
        Ok(Self {
            max_age: raw_attribute(set_cookie, "Max-Age").map(str::to_string),
            ..Self::from(&parsed)
        })
    }

    /// Cookie name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Cookie value.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Whether the `Secure` attribute is set.
    #[must_use]
    pub fn secure(&self) -> bool {
        self.secure
    }

    /// Whether the `HttpOnly` attribute is set.
    #[must_use]
    pub fn http_only(&self) -> bool {
        self.http_only
    }

    /// Raw `Max-Age` attribute.
    #[must_use]
    pub fn max_age(&self) -> Option<&str> {
        self.max_age.as_deref()
    }

    /// `Path` attribute.
    #[must_use]
    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    /// `Domain` attribute.
    #[must_use]
    pub fn domain(&self) -> Option<&str> {
        self.domain.as_deref()
    }

    /// `SameSite` attribute.
    #[must_use]
    pub fn same_site(&self) -> Option<&str> {
        self.same_site.as_deref()
    }
}

/// Raw text of the last attribute named `name` (case-insensitive).
fn raw_attribute<'a>(set_cookie: &'a str, name: &str) -> Option<&'a str> {
    set_cookie
        .split(';')
        .skip(1)
        .filter_map(|segment| segment.split_once('='))
        .filter(|(key, _)| key.trim().eq_ignore_ascii_case(name))
        .map(|(_, value)| value.trim())
        .last()
}

impl From<&::cookie::Cookie<'_>> for Morsel {
    fn from(parsed: &::cookie::Cookie<'_>) -> Self {
        Self {
            name: parsed.name().to_string(),
            value: parsed.value().to_string(),
            secure: parsed.secure().unwrap_or(false),
            http_only: parsed.http_only().unwrap_or(false),
            max_age: parsed.max_age().map(|age| age.whole_seconds().to_string()),
            path: parsed.path().map(str::to_string),
            domain: parsed.domain().map(str::to_string),
            same_site: parsed.same_site().map(|same_site| same_site.to_string()),
        }
    }
}

/// Builder for [`Morsel`].
#[derive(Debug)]
pub struct MorselBuilder {
    morsel: Morsel,
}

impl MorselBuilder {
    /// Set the `Secure` flag.
    #[must_use]
    pub fn secure(mut self, secure: bool) -> Self {
        self.morsel.secure = secure;
        self
    }

    /// Set the `HttpOnly` flag.
    #[must_use]
    pub fn http_only(mut self, http_only: bool) -> Self {
        self.morsel.http_only = http_only;
        self
    }

    /// Set the raw `Max-Age` attribute.
    #[must_use]
    pub fn max_age(mut self, max_age: impl Into<String>) -> Self {
        self.morsel.max_age = Some(max_age.into());
        self
    }

    /// Set the `Path` attribute.
    #[must_use]
    pub fn path(mut self, path: impl Into<String>) -> Self {
        self.morsel.path = Some(path.into());
        self
    }

    /// Set the `Domain` attribute.
    #[must_use]
    pub fn domain(mut self, domain: impl Into<String>) -> Self {
        self.morsel.domain = Some(domain.into());
        self
    }

    /// Set the `SameSite` attribute.
    #[must_use]
    pub fn same_site(mut self, same_site: impl Into<String>) -> Self {
        self.morsel.same_site = Some(same_site.into());
        self
    }

    /// Build the `Morsel`.
    #[must_use]
    pub fn build(self) -> Morsel {
        self.morsel
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// CookieJar
// ═══════════════════════════════════════════════════════════════════════════════

/// Cookies keyed by name. A later cookie with the same name replaces the
/// earlier one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CookieJar {
    cookies: BTreeMap<String, Morsel>,
}

impl CookieJar {
    /// Create an empty jar.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse every `Set-Cookie` header value into a jar.
    ///
    /// # Errors
    ///
    /// Returns [`MatchError::InvalidCandidate`] on the first malformed value.
    pub fn from_set_cookie_headers<I, S>(headers: I) -> Result<Self, MatchError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut jar = Self::new();
        for header in headers {
            jar.insert(Morsel::parse(header.as_ref())?);
        }
        Ok(jar)
    }

    /// Insert a morsel under its own name.
    pub fn insert(&mut self, morsel: Morsel) {
        self.cookies.insert(morsel.name.clone(), morsel);
    }

    /// Look up a cookie by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Morsel> {
        self.cookies.get(name)
    }

    /// Whether a cookie named `name` exists.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.cookies.contains_key(name)
    }

    /// Number of cookies.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cookies.len()
    }

    /// `true` if the jar holds no cookie.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cookies.is_empty()
    }

    /// Iterate cookies in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Morsel)> {
        self.cookies.iter().map(|(name, morsel)| (name.as_str(), morsel))
    }
}

impl FromIterator<Morsel> for CookieJar {
    fn from_iter<I: IntoIterator<Item = Morsel>>(iter: I) -> Self {
        let mut jar = Self::new();
        for morsel in iter {
            jar.insert(morsel);
        }
        jar
    }
}
