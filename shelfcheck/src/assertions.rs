//! Response assertions.
//!
//! Every `assert_*` function panics with the caller's message when the
//! check fails, which fails the running test and leaves the others alone.
//! A passing check logs a `✓` line. The `check_*` functions carry the same
//! logic without panicking.

use std::fmt;

use tracing::info;

use crate::config::{HTTP_200_OK, HTTP_201_CREATED, HTTP_204_NO_CONTENT, HTTP_404_NOT_FOUND};
use crate::response::ApiResponse;

/// A failed check: the caller's message plus what was observed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssertionFailure {
    pub message: String,
    pub detail: String,
}

impl AssertionFailure {
    fn new(message: &str, detail: impl Into<String>) -> Self {
        Self {
            message: message.to_string(),
            detail: detail.into(),
        }
    }
}

impl fmt::Display for AssertionFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.message, self.detail)
    }
}

impl std::error::Error for AssertionFailure {}

pub type CheckResult = Result<(), AssertionFailure>;

pub fn check_status(response: &ApiResponse, expected: u16, message: &str) -> CheckResult {
    let actual = response.status_code();
    if actual == expected {
        Ok(())
    } else {
        Err(AssertionFailure::new(
            message,
            format!("expected status {expected} but got {actual}"),
        ))
    }
}

pub fn check_status_in(response: &ApiResponse, expected: &[u16], message: &str) -> CheckResult {
    let actual = response.status_code();
    if expected.contains(&actual) {
        Ok(())
    } else {
        Err(AssertionFailure::new(
            message,
            format!("expected one of {expected:?} but got {actual}"),
        ))
    }
}

pub fn check_body_contains(response: &ApiResponse, text: &str, message: &str) -> CheckResult {
    if response.text().contains(text) {
        Ok(())
    } else {
        Err(AssertionFailure::new(
            message,
            format!("body does not contain '{text}'"),
        ))
    }
}

pub fn check_body_not_contains(response: &ApiResponse, text: &str, message: &str) -> CheckResult {
    if response.text().contains(text) {
        Err(AssertionFailure::new(message, format!("body contains '{text}'")))
    } else {
        Ok(())
    }
}

pub fn check_header_present(response: &ApiResponse, name: &str, message: &str) -> CheckResult {
    if response.headers().contains_key(name) {
        Ok(())
    } else {
        Err(AssertionFailure::new(
            message,
            format!("header '{name}' is missing"),
        ))
    }
}

pub fn check_header_value(
    response: &ApiResponse,
    name: &str,
    expected: &str,
    message: &str,
) -> CheckResult {
    match response.header(name) {
        Some(actual) if actual == expected => Ok(()),
        Some(actual) => Err(AssertionFailure::new(
            message,
            format!("header '{name}' expected '{expected}' but was '{actual}'"),
        )),
        None => Err(AssertionFailure::new(
            message,
            format!("header '{name}' expected '{expected}' but was absent"),
        )),
    }
}

/// Passes iff the elapsed time is strictly below `max_ms`.
pub fn check_response_time(response: &ApiResponse, max_ms: u64, message: &str) -> CheckResult {
    let elapsed = response.elapsed_ms();
    if elapsed < max_ms {
        Ok(())
    } else {
        Err(AssertionFailure::new(
            message,
            format!("Expected < {max_ms}ms but got {elapsed}ms"),
        ))
    }
}

#[track_caller]
fn enforce(result: CheckResult) {
    if let Err(failure) = result {
        panic!("{failure}");
    }
}

#[track_caller]
pub fn assert_status_ok(response: &ApiResponse, message: &str) {
    assert_status(response, HTTP_200_OK, message);
}

#[track_caller]
pub fn assert_status_created(response: &ApiResponse, message: &str) {
    assert_status(response, HTTP_201_CREATED, message);
}

#[track_caller]
pub fn assert_status_no_content(response: &ApiResponse, message: &str) {
    assert_status(response, HTTP_204_NO_CONTENT, message);
}

#[track_caller]
pub fn assert_status_not_found(response: &ApiResponse, message: &str) {
    assert_status(response, HTTP_404_NOT_FOUND, message);
}

#[track_caller]
pub fn assert_status(response: &ApiResponse, expected: u16, message: &str) {
    enforce(check_status(response, expected, message));
    info!("✓ Status code {} assertion passed", expected);
}

/// Passes when the status is any of `expected`.
#[track_caller]
pub fn assert_status_in(response: &ApiResponse, expected: &[u16], message: &str) {
    enforce(check_status_in(response, expected, message));
    info!(
        "✓ Status code {} is one of {:?}",
        response.status_code(),
        expected
    );
}

#[track_caller]
pub fn assert_body_contains(response: &ApiResponse, text: &str, message: &str) {
    enforce(check_body_contains(response, text, message));
    info!("✓ Response contains '{}' assertion passed", text);
}

#[track_caller]
pub fn assert_body_not_contains(response: &ApiResponse, text: &str, message: &str) {
    enforce(check_body_not_contains(response, text, message));
    info!("✓ Response does not contain '{}' assertion passed", text);
}

#[track_caller]
pub fn assert_header_present(response: &ApiResponse, name: &str, message: &str) {
    enforce(check_header_present(response, name, message));
    info!("✓ Header '{}' is present", name);
}

#[track_caller]
pub fn assert_header_value(response: &ApiResponse, name: &str, expected: &str, message: &str) {
    enforce(check_header_value(response, name, expected, message));
    info!("✓ Header '{}' has value '{}'", name, expected);
}

#[track_caller]
pub fn assert_response_time(response: &ApiResponse, max_ms: u64, message: &str) {
    enforce(check_response_time(response, max_ms, message));
    info!(
        "✓ Response time {} ms is within limit of {} ms",
        response.elapsed_ms(),
        max_ms
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::{HeaderMap, HeaderValue, StatusCode};
    use std::time::Duration;

    fn response(status: u16, body: &'static str, elapsed_ms: u64) -> ApiResponse {
        let mut headers = HeaderMap::new();
        headers.insert("api-supported-versions", HeaderValue::from_static("1.0"));
        ApiResponse::new(
            StatusCode::from_u16(status).unwrap(),
            headers,
            body,
            Duration::from_millis(elapsed_ms),
        )
    }

    #[test]
    fn test_check_status() {
        let ok = response(200, "", 10);
        assert!(check_status(&ok, 200, "ok").is_ok());

        let failure = check_status(&ok, 201, "Expected HTTP 201 Created status code").unwrap_err();
        assert_eq!(
            failure.to_string(),
            "Expected HTTP 201 Created status code - expected status 201 but got 200"
        );
    }

    #[test]
    fn test_check_status_in() {
        let no_content = response(204, "", 10);
        assert!(check_status_in(&no_content, &[200, 204], "delete").is_ok());
        assert!(check_status_in(&no_content, &[200, 201], "create").is_err());
    }

    #[test]
    fn test_check_body() {
        let r = response(200, r#"[{"id":1,"title":"Book 1"}]"#, 10);
        assert!(check_body_contains(&r, "title", "m").is_ok());
        assert!(check_body_contains(&r, "firstName", "m").is_err());
        assert!(check_body_not_contains(&r, "error", "m").is_ok());
        assert!(check_body_not_contains(&r, "Book 1", "m").is_err());
    }

    #[test]
    fn test_check_headers() {
        let r = response(200, "", 10);
        assert!(check_header_present(&r, "Api-Supported-Versions", "m").is_ok());
        assert!(check_header_present(&r, "etag", "m").is_err());
        assert!(check_header_value(&r, "api-supported-versions", "1.0", "m").is_ok());

        let wrong = check_header_value(&r, "api-supported-versions", "2.0", "m").unwrap_err();
        assert_eq!(wrong.detail, "header 'api-supported-versions' expected '2.0' but was '1.0'");

        let absent = check_header_value(&r, "server", "GitHub.com", "m").unwrap_err();
        assert!(absent.detail.ends_with("but was absent"));
    }

    #[test]
    fn test_check_response_time_is_strict() {
        let fast = response(200, "", 4999);
        let exact = response(200, "", 5000);
        let slow = response(200, "", 7200);

        assert!(check_response_time(&fast, 5000, "m").is_ok());
        assert!(check_response_time(&exact, 5000, "m").is_err());

        let failure = check_response_time(&slow, 5000, "Response should be fast").unwrap_err();
        assert_eq!(
            failure.to_string(),
            "Response should be fast - Expected < 5000ms but got 7200ms"
        );
    }

    #[test]
    fn test_assert_helpers_pass() {
        let r = response(200, r#"{"id":1}"#, 5);
        assert_status_ok(&r, "200");
        assert_status(&r, 200, "200");
        assert_status_in(&r, &[200, 204], "200 or 204");
        assert_body_contains(&r, "id", "id");
        assert_body_not_contains(&r, "title", "title");
        assert_header_present(&r, "api-supported-versions", "header");
        assert_header_value(&r, "api-supported-versions", "1.0", "header");
        assert_response_time(&r, 100, "time");

        assert_status_created(&response(201, "", 5), "201");
        assert_status_no_content(&response(204, "", 5), "204");
        assert_status_not_found(&response(404, "", 5), "404");
    }

    #[test]
    #[should_panic(expected = "Expected HTTP 404 - expected status 404 but got 200")]
    fn test_assert_status_not_found_fails() {
        assert_status_not_found(&response(200, "", 5), "Expected HTTP 404");
    }

    #[test]
    #[should_panic(expected = "too slow - Expected < 100ms but got 100ms")]
    fn test_assert_response_time_fails_at_threshold() {
        assert_response_time(&response(200, "", 100), 100, "too slow");
    }

    #[test]
    #[should_panic(expected = "header missing")]
    fn test_assert_header_present_fails() {
        assert_header_present(&response(200, "", 5), "etag", "header missing");
    }
}
