//! Conformance tests that run YAML fixtures against assay-http
//!
//! Run with: cargo test -p assay-http --test conformance
//!
//! Note: This test file requires the `config` feature (on by default).

#![cfg(feature = "config")]

use assay::{check_that, AssertionFailure, MatchError};
use assay_http::{HttpResponse, Morsel, ResponseMatcherConfig};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// A complete test fixture
#[derive(Debug, Deserialize)]
struct Fixture {
    name: String,
    #[allow(dead_code)]
    description: String,
    matcher: ResponseMatcherConfig,
    /// Expected construction error variant, if the matcher must not compile
    #[serde(default)]
    compile_error: Option<String>,
    #[serde(default)]
    cases: Vec<TestCase>,
}

/// A candidate response and the expected outcome
#[derive(Debug, Deserialize)]
struct TestCase {
    name: String,
    response: ResponseFixture,
    #[serde(default)]
    expect: Expect,
    /// Exact mismatch text, checked when `expect` is `mismatch`
    #[serde(default)]
    mismatch: Option<String>,
}

#[derive(Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
enum Expect {
    #[default]
    Match,
    Mismatch,
    Error,
}

#[derive(Debug, Deserialize)]
struct ResponseFixture {
    #[serde(default = "default_status")]
    status: u16,
    #[serde(default)]
    headers: BTreeMap<String, String>,
    #[serde(default)]
    content: String,
    /// Raw `Set-Cookie` header values
    #[serde(default)]
    set_cookie: Vec<String>,
    /// Morsels whose attributes cannot come from a parsed header
    #[serde(default)]
    morsels: Vec<MorselFixture>,
}

#[derive(Debug, Deserialize)]
struct MorselFixture {
    name: String,
    value: String,
    #[serde(default)]
    max_age: Option<String>,
}

fn default_status() -> u16 {
    200
}

impl ResponseFixture {
    fn build(&self) -> HttpResponse {
        let mut builder = HttpResponse::builder()
            .status(self.status)
            .content(self.content.as_str());
        for (name, value) in &self.headers {
            builder = builder.header(name, value);
        }
        for header in &self.set_cookie {
            let morsel = Morsel::parse(header)
                .unwrap_or_else(|e| panic!("bad Set-Cookie fixture {header:?}: {e}"));
            builder = builder.cookie(morsel);
        }
        for fixture in &self.morsels {
            let mut morsel = Morsel::builder(&fixture.name, &fixture.value);
            if let Some(max_age) = &fixture.max_age {
                morsel = morsel.max_age(max_age);
            }
            builder = builder.cookie(morsel.build());
        }
        builder.build()
    }
}

fn error_variant(err: &MatchError) -> &'static str {
    match err {
        MatchError::MissingExpectation { .. } => "missing_expectation",
        MatchError::AmbiguousExpectation { .. } => "ambiguous_expectation",
        MatchError::Coercion { .. } => "coercion",
        MatchError::InvalidPattern { .. } => "invalid_pattern",
        MatchError::InvalidConfig { .. } => "invalid_config",
        MatchError::InvalidCandidate { .. } => "invalid_candidate",
    }
}

impl Fixture {
    fn from_yaml_multi(yaml: &str) -> Result<Vec<Self>, serde_yaml::Error> {
        serde_yaml::Deserializer::from_str(yaml)
            .map(Fixture::deserialize)
            .collect()
    }

    fn run_and_assert(&self) {
        let matcher = match (self.matcher.compile(), &self.compile_error) {
            (Ok(matcher), None) => matcher,
            (Err(err), Some(expected)) => {
                assert_eq!(error_variant(&err), expected.as_str(), "fixture {}", self.name);
                return;
            }
            (Ok(_), Some(expected)) => {
                panic!("fixture {}: expected {expected} at compile time", self.name)
            }
            (Err(err), None) => panic!("fixture {}: compile failed: {err}", self.name),
        };

        for case in &self.cases {
            println!("    case: {}", case.name);
            let outcome = check_that(&case.response.build(), &matcher);
            match (&case.expect, outcome) {
                (Expect::Match, Ok(())) => {}
                (Expect::Mismatch, Err(AssertionFailure::Mismatch { but, .. })) => {
                    if let Some(expected) = &case.mismatch {
                        assert_eq!(&but, expected, "{} / {}", self.name, case.name);
                    }
                }
                (Expect::Error, Err(AssertionFailure::Error(_))) => {}
                (expect, outcome) => panic!(
                    "{} / {}: expected {expect:?}, got {outcome:?}",
                    self.name, case.name
                ),
            }
        }
    }
}

fn fixtures_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests").join("fixtures")
}

/// Load and run all fixtures in a directory
fn run_fixture_file(path: &Path) {
    println!("Running fixture: {}", path.display());
    let yaml = fs::read_to_string(path).expect("read yaml");

    // Parse potentially multiple fixtures (separated by ---)
    let fixtures = Fixture::from_yaml_multi(&yaml).unwrap_or_else(|e| {
        panic!("Failed to parse {}: {}", path.display(), e);
    });

    for fixture in fixtures {
        println!("  Running: {}", fixture.name);
        fixture.run_and_assert();
    }
}

#[test]
fn test_response_fixtures() {
    run_fixture_file(&fixtures_dir().join("response.yaml"));
}

#[test]
fn test_cookie_fixtures() {
    run_fixture_file(&fixtures_dir().join("cookie.yaml"));
}

#[test]
fn test_construction_fixtures() {
    run_fixture_file(&fixtures_dir().join("construction.yaml"));
}
