//! Config types for building response matchers from YAML or JSON.
//!
//! ```yaml
//! status: 200
//! headers:
//!   Content-Type: { prefix: application/ }
//! content: { contains: dude }
//! cookies:
//!   session: abc                  # bare value
//!   hello:
//!     value: dude
//!     secure: true
//!     httponly: true
//!     max_age: { gt: 30 }
//! ```
//!
//! # Relationship to runtime types
//!
//! | Config type | Runtime type | Method |
//! |-------------|--------------|--------|
//! | [`ResponseMatcherConfig`] | [`ResponseMatcher`] | [`compile()`](ResponseMatcherConfig::compile) |
//! | [`MorselConfig`] | [`MorselMatcher`] | [`compile()`](MorselConfig::compile) |
//! | [`ValueConfig`] | [`Matchable`](assay::Matchable) | [`compile()`](ValueConfig::compile) |
//!
//! Maps are registered in sorted key order, so a compiled matcher always
//! renders the same way.

use crate::{cookies, morsel, response, CookieMatcher, MorselMatcher, ResponseMatcher};
use assay::{MatchError, ValueConfig};
use serde::{de, Deserialize, Deserializer};
use serde_json::Value;
use std::collections::BTreeMap;

fn invalid_config(e: impl std::fmt::Display) -> MatchError {
    MatchError::InvalidConfig {
        reason: e.to_string(),
    }
}

/// Configuration for a [`ResponseMatcher`].
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ResponseMatcherConfig {
    /// Expected status code.
    #[serde(default)]
    pub status: Option<ValueConfig<u16>>,

    /// Expected headers by name.
    #[serde(default)]
    pub headers: BTreeMap<String, ValueConfig<String>>,

    /// Expected body text.
    #[serde(default)]
    pub content: Option<ValueConfig<String>>,

    /// Expected cookies by name.
    #[serde(default)]
    pub cookies: Option<BTreeMap<String, MorselConfig>>,
}

impl ResponseMatcherConfig {
    /// Parse from YAML.
    ///
    /// # Errors
    ///
    /// Returns [`MatchError::InvalidConfig`] if the YAML does not describe a
    /// response matcher.
    pub fn from_yaml(text: &str) -> Result<Self, MatchError> {
        serde_yaml::from_str(text).map_err(invalid_config)
    }

    /// Parse from JSON.
    ///
    /// # Errors
    ///
    /// Returns [`MatchError::InvalidConfig`] if the JSON does not describe a
    /// response matcher.
    pub fn from_json(text: &str) -> Result<Self, MatchError> {
        serde_json::from_str(text).map_err(invalid_config)
    }

    /// Compile into a [`ResponseMatcher`].
    ///
    /// Plugins are registered as status, headers, content, cookies.
    ///
    /// # Errors
    ///
    /// Returns the first construction error of any expectation.
    pub fn compile(&self) -> Result<ResponseMatcher, MatchError> {
        let mut matcher = response();
        if let Some(status) = &self.status {
            matcher = matcher.with_status(status.compile("status")?);
        }
        for (name, value) in &self.headers {
            matcher = matcher.with_header(name, value.compile(&format!("headers.{name}"))?);
        }
        if let Some(content) = &self.content {
            matcher = matcher.with_content(content.compile("content")?);
        }
        if let Some(jar) = &self.cookies {
            matcher = matcher.with_cookies(compile_cookies(jar)?);
        }
        Ok(matcher)
    }
}

fn compile_cookies(jar: &BTreeMap<String, MorselConfig>) -> Result<CookieMatcher, MatchError> {
    jar.iter().try_fold(cookies(), |matcher, (key, config)| {
        Ok(matcher.with_cookie(key, config.compile(key)?))
    })
}

/// Configuration for one cookie: a bare value expectation or an attribute
/// map.
///
/// A map holding any of [`MorselConfig::ATTRIBUTE_KEYS`] is read as
/// attributes only, so a misspelt or mistyped attribute is reported by name.
#[derive(Debug, Clone, PartialEq)]
pub enum MorselConfig {
    /// `{ value: .., secure: .., ... }`
    Attributes(MorselAttributes),
    /// A value expectation alone.
    Value(ValueConfig<String>),
}

/// Per-attribute cookie expectations.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MorselAttributes {
    /// Expected value.
    pub value: ValueConfig<String>,
    /// Expected `Secure` flag.
    #[serde(default)]
    pub secure: Option<bool>,
    /// Expected `HttpOnly` flag.
    #[serde(default)]
    pub httponly: Option<bool>,
    /// Expected `Max-Age`, as an integer.
    #[serde(default)]
    pub max_age: Option<ValueConfig<i64>>,
    /// Expected `Path`.
    #[serde(default)]
    pub path: Option<ValueConfig<String>>,
    /// Expected `Domain`.
    #[serde(default)]
    pub domain: Option<ValueConfig<String>>,
    /// Expected `SameSite`.
    #[serde(default)]
    pub samesite: Option<ValueConfig<String>>,
}

impl<'de> Deserialize<'de> for MorselConfig {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Value::deserialize(deserializer)?;
        let is_attributes = raw.as_object().is_some_and(|map| {
            map.keys()
                .any(|key| Self::ATTRIBUTE_KEYS.contains(&key.as_str()))
        });
        if is_attributes {
            serde_json::from_value(raw).map(Self::Attributes)
        } else {
            serde_json::from_value(raw).map(Self::Value)
        }
        .map_err(de::Error::custom)
    }
}

impl MorselConfig {
    /// Keys that mark a cookie entry as an attribute map.
    pub const ATTRIBUTE_KEYS: &'static [&'static str] = &[
        "value", "secure", "httponly", "max_age", "path", "domain", "samesite",
    ];

    /// Compile into a [`MorselMatcher`] for the cookie named `key`.
    ///
    /// # Errors
    ///
    /// Returns the first construction error of any attribute.
    pub fn compile(&self, key: &str) -> Result<MorselMatcher, MatchError> {
        let attributes = match self {
            Self::Value(value) => return Ok(morsel(value.compile(&format!("cookies.{key}"))?)),
            Self::Attributes(attributes) => attributes,
        };
        let field = |name: &str| format!("cookies.{key}.{name}");

        let mut matcher = morsel(attributes.value.compile(&field("value"))?);
        if let Some(secure) = attributes.secure {
            matcher = matcher.is_secure(secure);
        }
        if let Some(httponly) = attributes.httponly {
            matcher = matcher.is_httponly(httponly);
        }
        if let Some(max_age) = &attributes.max_age {
            matcher = matcher.max_age(max_age.compile(&field("max_age"))?);
        }
        if let Some(path) = &attributes.path {
            matcher = matcher.with_path(path.compile(&field("path"))?);
        }
        if let Some(domain) = &attributes.domain {
            matcher = matcher.with_domain(domain.compile(&field("domain"))?);
        }
        if let Some(samesite) = &attributes.samesite {
            matcher = matcher.with_same_site(samesite.compile(&field("samesite"))?);
        }
        Ok(matcher)
    }
}
