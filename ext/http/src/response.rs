//! `HttpResponse` — the candidate response matched by
//! [`ResponseMatcher`](crate::ResponseMatcher).
//!
//! Build one directly for tests, or convert from an [`http::Response`].

use crate::{CookieJar, Morsel};
use assay::MatchError;
use tracing::{debug, trace};

/// A captured HTTP response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    status: u16,
    headers: Vec<(String, String)>,
    content: Vec<u8>,
    cookies: CookieJar,
}

impl Default for HttpResponse {
    fn default() -> Self {
        Self {
            status: 200,
            headers: Vec::new(),
            content: Vec::new(),
            cookies: CookieJar::new(),
        }
    }
}

impl HttpResponse {
    /// Create a builder for `HttpResponse`. Status defaults to 200.
    #[must_use]
    pub fn builder() -> HttpResponseBuilder {
        HttpResponseBuilder::default()
    }

    /// Status code.
    #[must_use]
    pub fn status(&self) -> u16 {
        self.status
    }

    /// Get a header value by name (case-insensitive). The first one wins.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Whether a header named `name` is present (case-insensitive).
    #[must_use]
    pub fn has_header(&self, name: &str) -> bool {
        self.header(name).is_some()
    }

    /// All headers in insertion order.
    pub fn headers(&self) -> impl Iterator<Item = (&str, &str)> {
        self.headers
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    /// Raw body bytes.
    #[must_use]
    pub fn content(&self) -> &[u8] {
        &self.content
    }

    /// Body decoded as UTF-8, replacing invalid sequences.
    #[must_use]
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.content).into_owned()
    }

    /// Cookies set by the response.
    #[must_use]
    pub fn cookies(&self) -> &CookieJar {
        &self.cookies
    }
}

/// Builder for `HttpResponse`.
#[derive(Debug, Default)]
pub struct HttpResponseBuilder {
    response: HttpResponse,
}

impl HttpResponseBuilder {
    /// Set the status code.
    #[must_use]
    pub fn status(mut self, status: u16) -> Self {
        self.response.status = status;
        self
    }

    /// Add a header.
    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.response.headers.push((name.into(), value.into()));
        self
    }

    /// Replace the body.
    #[must_use]
    pub fn content(mut self, content: impl Into<Vec<u8>>) -> Self {
        self.response.content = content.into();
        self
    }

    /// Append to the body.
    #[must_use]
    pub fn write(mut self, chunk: impl AsRef<[u8]>) -> Self {
        self.response.content.extend_from_slice(chunk.as_ref());
        self
    }

    /// Set a cookie.
    #[must_use]
    pub fn cookie(mut self, morsel: Morsel) -> Self {
        self.response.cookies.insert(morsel);
        self
    }

    /// Build the `HttpResponse`.
    #[must_use]
    pub fn build(self) -> HttpResponse {
        self.response
    }
}

impl<B: AsRef<[u8]>> TryFrom<&http::Response<B>> for HttpResponse {
    type Error = MatchError;

    /// `Set-Cookie` headers go to the cookie jar; every other header is kept
    /// as a response header.
    fn try_from(response: &http::Response<B>) -> Result<Self, MatchError> {
        let mut builder = Self::builder()
            .status(response.status().as_u16())
            .content(response.body().as_ref());
        for (name, value) in response.headers() {
            let value = value.to_str().map_err(|e| MatchError::InvalidCandidate {
                reason: format!("header {name} is not visible ASCII: {e}"),
            })?;
            builder = if *name == http::header::SET_COOKIE {
                let morsel = Morsel::parse(value)
                    .inspect_err(|e| debug!(header = value, error = %e, "rejecting Set-Cookie"))?;
                builder.cookie(morsel)
            } else {
                builder.header(name.as_str(), value)
            };
        }
        let captured = builder.build();
        trace!(
            status = captured.status,
            headers = captured.headers.len(),
            cookies = captured.cookies.len(),
            "captured http::Response"
        );
        Ok(captured)
    }
}
