//! assay-http: HTTP response and cookie matchers
//!
//! This crate provides two layers:
//!
//! 1. **Contexts**: [`HttpResponse`], [`CookieJar`] and [`Morsel`], the
//!    candidates under test
//! 2. **Matchers**: [`ResponseMatcher`], [`CookieMatcher`] and
//!    [`MorselMatcher`], composites of single-attribute plugins
//!
//! # Architecture
//!
//! ```text
//! ResponseMatcher (Composite<HttpResponse>)
//!   ├── status code / header / content plugins
//!   └── cookies: CookieMatcher (Composite<CookieJar>)
//!         └── cookie <key>: MorselMatcher (Composite<Morsel>)
//!               └── value / secure / httponly / max-age / ... plugins
//! ```
//!
//! # Example
//!
//! ```
//! use assay::assert_that;
//! use assay_http::prelude::*;
//!
//! let response = HttpResponse::builder()
//!     .status(200)
//!     .header("Content-Type", "application/json")
//!     .content(r#"{"Hello":"dude"}"#)
//!     .cookie(Morsel::builder("hello", "dude").secure(true).http_only(true).max_age("40").build())
//!     .build();
//!
//! assert_that(
//!     &response,
//!     &status(200)
//!         .with_header("Content-Type", "application/json")
//!         .with_content(r#"{"Hello":"dude"}"#)
//!         .with_cookies(cookie("hello", morsel("dude").secure().is_httponly(true).max_age(40))),
//! );
//! ```

mod cookie_jar;
mod cookie_matcher;
mod response;
mod response_matcher;

#[cfg(feature = "config")]
mod config;

pub use cookie_jar::{CookieJar, Morsel, MorselBuilder};
pub use cookie_matcher::{cookie, cookies, morsel, CookieMatcher, MorselMatcher, COOKIE_JAR_KIND, MORSEL_KIND};
pub use response::{HttpResponse, HttpResponseBuilder};
pub use response_matcher::{
    has_content, has_cookies, has_headers, response, status, ResponseMatcher, RESPONSE_KIND,
};

#[cfg(feature = "config")]
pub use config::{MorselAttributes, MorselConfig, ResponseMatcherConfig};

/// Prelude for convenient imports.
pub mod prelude {
    pub use super::{
        // Cookie matchers
        cookie,
        cookies,
        // Response matchers
        has_content,
        has_cookies,
        has_headers,
        morsel,
        response,
        status,
        CookieJar,
        CookieMatcher,
        // Contexts
        HttpResponse,
        HttpResponseBuilder,
        Morsel,
        MorselMatcher,
        ResponseMatcher,
    };

    #[cfg(feature = "config")]
    pub use super::{MorselConfig, ResponseMatcherConfig};
}
