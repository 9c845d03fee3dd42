//! Response matcher behaviour against realistic responses.

use assay::{assert_that, check_that, contains_string, description_of, AssertionFailure, Matcher};
use assay_http::prelude::*;
use pretty_assertions::assert_eq;
use std::any::Any;

fn hello_dude() -> HttpResponse {
    HttpResponse::builder()
        .status(200)
        .header("Content-Type", "application/json")
        .content(r#"{"Hello":"dude"}"#)
        .build()
}

fn full_matcher(code: u16) -> ResponseMatcher {
    status(code)
        .with_headers([("Content-Type", "application/json")])
        .with_content(r#"{"Hello":"dude"}"#)
}

#[test]
fn status_headers_and_content_match() {
    assert_that(&hello_dude(), &full_matcher(200));
}

#[test]
fn wrong_status_yields_single_fragment() {
    let failure = check_that(&hello_dude(), &full_matcher(300)).unwrap_err();
    let AssertionFailure::Mismatch { but, .. } = failure else {
        panic!("expected a mismatch, got {failure:?}");
    };
    assert_eq!(but, "status code was <200>.");
}

#[test]
fn status_only_matches_any_body() {
    assert_that(&hello_dude(), &status(200));
    assert_that(&HttpResponse::default(), &response());
}

#[test]
fn describe_is_idempotent() {
    let m = full_matcher(200);
    let first = description_of(&m);
    let second = description_of(&m);
    assert_eq!(first, second);
}

#[test]
fn missing_header_never_compares_value() {
    let m = has_headers([("Location", contains_string("/"))]);
    let trace = m.evaluate(&hello_dude()).unwrap();
    assert_eq!(
        trace.fragments().collect::<Vec<_>>(),
        vec!["does not contain header <Location>"]
    );
}

#[test]
fn all_failing_fragments_are_reported_in_order() {
    let m = status(404)
        .with_header("Content-Type", "text/html")
        .with_content("nope");
    let verdict = m.verdict(&hello_dude()).unwrap();
    assert_eq!(
        verdict.mismatch.as_deref(),
        Some(
            "status code was <200>; header \"Content-Type\" was <\"application/json\">; \
             content was <\"{\\\"Hello\\\":\\\"dude\\\"}\">."
        )
    );
}

#[test]
fn matcher_is_reusable_across_candidates() {
    let m = status(200);
    let ok = hello_dude();
    let missing = HttpResponse::builder().status(404).build();
    assert!(m.matches(&ok).unwrap());
    assert!(!m.matches(&missing).unwrap());
    assert!(m.matches(&ok).unwrap());
}

#[test]
fn wrong_kind_candidate() {
    let m = full_matcher(200).erased();
    let candidate: &dyn Any = &"{\"Hello\":\"dude\"}";
    let failure = check_that(candidate, &m).unwrap_err();
    assert_eq!(
        failure,
        AssertionFailure::Mismatch {
            expected: description_of(&full_matcher(200)),
            but: "The item is not an instance of HttpResponse.".into(),
        }
    );
}

#[test]
fn converts_from_http_crate() {
    let source = http::Response::builder()
        .status(201)
        .header("Content-Type", "application/json")
        .header("Set-Cookie", "hello=dude; Secure; HttpOnly; Max-Age=40")
        .body(r#"{"Hello":"dude"}"#)
        .unwrap();
    let response = HttpResponse::try_from(&source).unwrap();
    assert_that(
        &response,
        &status(201)
            .with_header("content-type", "application/json")
            .with_cookies(cookie("hello", morsel("dude").secure().httponly().max_age(40))),
    );
}

#[test]
#[should_panic(expected = "but: status code was <200>.")]
fn assert_that_panics_with_rendered_message() {
    assert_that(&hello_dude(), &status(500));
}
