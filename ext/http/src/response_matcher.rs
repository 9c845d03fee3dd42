//! [`ResponseMatcher`] — status, header, content and cookie checks on an
//! [`HttpResponse`].
//!
//! # Example
//!
//! ```
//! use assay::check_that;
//! use assay_http::{status, HttpResponse};
//!
//! let response = HttpResponse::builder()
//!     .header("Content-Type", "application/json")
//!     .content(r#"{"Hello":"dude"}"#)
//!     .build();
//!
//! let m = status(300)
//!     .with_header("Content-Type", "application/json")
//!     .with_content(r#"{"Hello":"dude"}"#);
//!
//! let failure = check_that(&response, &m).unwrap_err();
//! assert!(failure.to_string().ends_with("but: status code was <200>.\n"));
//! ```

use crate::{CookieJar, HttpResponse};
use assay::{
    Composite, Description, Erased, EvalTrace, FieldPlugin, IntoMatchable, MatchError, Matcher,
    SelfDescribing, Verdict,
};
use std::any::Any;

/// Candidate kind guarded by [`ResponseMatcher`].
pub const RESPONSE_KIND: &str = "HttpResponse";

/// Matches an [`HttpResponse`] plugin by plugin.
#[derive(Debug)]
pub struct ResponseMatcher {
    inner: Composite<HttpResponse>,
}

/// Match any response. Add expectations with the `with_*` methods.
#[must_use]
pub fn response() -> ResponseMatcher {
    ResponseMatcher {
        inner: Composite::new(RESPONSE_KIND, "An HttpResponse"),
    }
}

/// Match a response whose status code matches `code`.
pub fn status(code: impl IntoMatchable<u16>) -> ResponseMatcher {
    response().with_status(code)
}

/// Match a response whose body text matches `content`.
pub fn has_content(content: impl IntoMatchable<String>) -> ResponseMatcher {
    response().with_content(content)
}

/// Match a response carrying every header in `headers`.
pub fn has_headers<I, K, X>(headers: I) -> ResponseMatcher
where
    I: IntoIterator<Item = (K, X)>,
    K: Into<String>,
    X: IntoMatchable<String>,
{
    response().with_headers(headers)
}

/// Match a response whose cookie jar matches `cookies`.
pub fn has_cookies(cookies: impl IntoMatchable<CookieJar>) -> ResponseMatcher {
    response().with_cookies(cookies)
}

impl ResponseMatcher {
    /// Require the status code to match `code`.
    #[must_use]
    pub fn with_status(self, code: impl IntoMatchable<u16>) -> Self {
        self.register(FieldPlugin::new(
            "status code",
            |r: &HttpResponse| Some(r.status()),
            code,
        ))
    }

    /// Require a header named `name` (case-insensitive) whose value matches
    /// `value`.
    #[must_use]
    pub fn with_header(self, name: impl Into<String>, value: impl IntoMatchable<String>) -> Self {
        let name = name.into();
        let lookup = name.clone();
        let plugin = FieldPlugin::new(
            format!("header {name:?}"),
            move |r: &HttpResponse| r.header(&lookup).map(str::to_string),
            value,
        )
        .missing_as(format!("does not contain header <{name}>"));
        self.register(plugin)
    }

    /// Require every header in `headers`, one plugin each, in iteration order.
    #[must_use]
    pub fn with_headers<I, K, X>(self, headers: I) -> Self
    where
        I: IntoIterator<Item = (K, X)>,
        K: Into<String>,
        X: IntoMatchable<String>,
    {
        headers
            .into_iter()
            .fold(self, |matcher, (name, value)| matcher.with_header(name, value))
    }

    /// Require the body, decoded as lossy UTF-8, to match `content`.
    #[must_use]
    pub fn with_content(self, content: impl IntoMatchable<String>) -> Self {
        self.register(FieldPlugin::new(
            "content",
            |r: &HttpResponse| Some(r.text()),
            content,
        ))
    }

    /// Require the cookie jar to match `cookies`, usually a
    /// [`CookieMatcher`](crate::CookieMatcher).
    #[must_use]
    pub fn with_cookies(self, cookies: impl IntoMatchable<CookieJar>) -> Self {
        self.register(FieldPlugin::new(
            "cookies:",
            |r: &HttpResponse| Some(r.cookies().clone()),
            cookies,
        ))
    }

    /// Register a custom plugin.
    #[must_use]
    pub fn register(self, plugin: impl Matcher<HttpResponse> + 'static) -> Self {
        Self {
            inner: self.inner.register(plugin),
        }
    }

    /// Number of registered plugins.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// `true` if no plugin is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Evaluate every plugin against `response`.
    ///
    /// # Errors
    ///
    /// Returns the first hard error raised by a plugin.
    pub fn evaluate(&self, response: &HttpResponse) -> Result<EvalTrace, MatchError> {
        self.inner.evaluate(response)
    }

    /// Evaluate a candidate of unknown type, checking it is an
    /// [`HttpResponse`] first.
    ///
    /// # Errors
    ///
    /// Returns the first hard error raised by a plugin.
    pub fn evaluate_any(&self, candidate: &dyn Any) -> Result<EvalTrace, MatchError> {
        self.inner.evaluate_any(candidate)
    }

    /// Match candidates of any type, checking they are an [`HttpResponse`]
    /// first.
    #[must_use]
    pub fn erased(self) -> Erased<HttpResponse> {
        self.inner.erased()
    }

    /// Unwrap into the underlying composite.
    #[must_use]
    pub fn into_composite(self) -> Composite<HttpResponse> {
        self.inner
    }
}

impl SelfDescribing for ResponseMatcher {
    fn describe_to(&self, description: &mut Description) {
        self.inner.describe_to(description);
    }
}

impl Matcher<HttpResponse> for ResponseMatcher {
    fn matches(&self, actual: &HttpResponse) -> Result<bool, MatchError> {
        self.inner.matches(actual)
    }

    fn describe_mismatch(
        &self,
        actual: &HttpResponse,
        description: &mut Description,
    ) -> Result<(), MatchError> {
        self.inner.describe_mismatch(actual, description)
    }

    fn verdict(&self, actual: &HttpResponse) -> Result<Verdict, MatchError> {
        self.inner.verdict(actual)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{cookie, morsel, Morsel};
    use assay::{contains_string, description_of, mismatch_of, starts_with};
    use pretty_assertions::assert_eq;

    fn json_response() -> HttpResponse {
        HttpResponse::builder()
            .status(200)
            .header("Content-Type", "application/json")
            .content(r#"{"Hello":"dude"}"#)
            .build()
    }

    #[test]
    fn response_matches_everything() {
        let m = response();
        assert!(m.is_empty());
        assert!(m.matches(&json_response()).unwrap());
        assert_eq!(description_of(&m), "An HttpResponse.");
    }

    #[test]
    fn full_match() {
        let m = status(200)
            .with_header("Content-Type", "application/json")
            .with_content(r#"{"Hello":"dude"}"#);
        assert!(m.matches(&json_response()).unwrap());
        assert_eq!(
            description_of(&m),
            "An HttpResponse with status code <200>; with header \"Content-Type\" \
             <\"application/json\">; with content <\"{\\\"Hello\\\":\\\"dude\\\"}\">."
        );
    }

    #[test]
    fn status_mismatch_is_the_only_fragment() {
        let m = status(300)
            .with_header("Content-Type", "application/json")
            .with_content(r#"{"Hello":"dude"}"#);
        assert_eq!(mismatch_of(&m, &json_response()).unwrap(), "status code was <200>.");
    }

    #[test]
    fn missing_header() {
        let m = has_headers([("Location", "/home")]);
        assert_eq!(
            mismatch_of(&m, &json_response()).unwrap(),
            "does not contain header <Location>."
        );
    }

    #[test]
    fn header_value_mismatch() {
        let m = response().with_header("content-type", starts_with("text/"));
        assert_eq!(
            mismatch_of(&m, &json_response()).unwrap(),
            "header \"content-type\" was <\"application/json\">."
        );
    }

    #[test]
    fn headers_keep_iteration_order() {
        let m = has_headers([("X-B", "b"), ("X-A", "a")]);
        let trace = m.evaluate(&json_response()).unwrap();
        assert_eq!(
            trace.fragments().collect::<Vec<_>>(),
            vec!["does not contain header <X-B>", "does not contain header <X-A>"]
        );
    }

    #[test]
    fn content_rule() {
        assert!(has_content(contains_string("dude"))
            .matches(&json_response())
            .unwrap());
        assert_eq!(
            mismatch_of(&has_content("nope"), &json_response()).unwrap(),
            "content was <\"{\\\"Hello\\\":\\\"dude\\\"}\">."
        );
    }

    #[test]
    fn nested_cookie_mismatch() {
        let response = HttpResponse::builder()
            .cookie(Morsel::builder("hello", "dude").secure(true).build())
            .build();
        let m = has_cookies(cookie("hello", morsel("dude").is_secure(false)));
        assert_eq!(
            mismatch_of(&m, &response).unwrap(),
            "cookies: cookie <hello> is secure."
        );
        assert_eq!(
            description_of(&m),
            "An HttpResponse with cookies: A CookieJar with cookie <hello> as A Morsel \
             with value <\"dude\">, is not secure."
        );
    }

    #[test]
    fn erased_wrong_kind() {
        let m = status(200).erased();
        let trace = m.inner().evaluate_any(&"not a response").unwrap();
        assert_eq!(
            trace.fragments().collect::<Vec<_>>(),
            vec!["The item is not an instance of HttpResponse"]
        );
    }
}
