//! Response captured from a catalog request.

use std::time::Duration;

use bytes::Bytes;
use http::{HeaderMap, StatusCode};
use serde::de::DeserializeOwned;

use crate::error::{Error, Result};

/// A fully read HTTP response plus the time it took to get it.
///
/// The body is buffered, so every accessor can be called any number of
/// times.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    status: StatusCode,
    headers: HeaderMap,
    body: Bytes,
    elapsed: Duration,
}

impl ApiResponse {
    /// Assembles a response from its parts.
    pub fn new(status: StatusCode, headers: HeaderMap, body: impl Into<Bytes>, elapsed: Duration) -> Self {
        Self {
            status,
            headers,
            body: body.into(),
            elapsed,
        }
    }

    pub(crate) async fn from_reqwest(
        response: reqwest::Response,
        started: std::time::Instant,
    ) -> std::result::Result<Self, reqwest::Error> {
        let status = response.status();
        let headers = response.headers().clone();
        let body = response.bytes().await?;

        Ok(Self::new(status, headers, body, started.elapsed()))
    }

    /// Returns the HTTP status code.
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Returns the status code as a number.
    pub fn status_code(&self) -> u16 {
        self.status.as_u16()
    }

    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Returns the response headers.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Looks up a header by name, ignoring case.
    ///
    /// Returns `None` when the header is missing or its value is not
    /// visible ASCII.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    pub fn content_type(&self) -> Option<&str> {
        self.header(http::header::CONTENT_TYPE.as_str())
    }

    /// Returns the response body as text.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).to_string()
    }

    /// Returns the response body as raw bytes.
    pub fn bytes(&self) -> &Bytes {
        &self.body
    }

    /// Deserializes the response body as JSON.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        serde_json::from_slice(&self.body).map_err(Error::Decode)
    }

    /// The body pretty-printed if it is JSON, the raw text otherwise.
    pub fn pretty_body(&self) -> String {
        serde_json::from_slice::<serde_json::Value>(&self.body)
            .ok()
            .and_then(|value| serde_json::to_string_pretty(&value).ok())
            .unwrap_or_else(|| self.text())
    }

    /// Time from sending the request to reading the last body byte.
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    pub fn elapsed_ms(&self) -> u64 {
        self.elapsed.as_millis() as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::HeaderValue;

    fn response(body: &'static str) -> ApiResponse {
        let mut headers = HeaderMap::new();
        headers.insert(
            http::header::CONTENT_TYPE,
            HeaderValue::from_static("application/json; charset=utf-8"),
        );
        ApiResponse::new(StatusCode::OK, headers, body, Duration::from_millis(120))
    }

    #[test]
    fn test_status_accessors() {
        let response = response("[]");
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.status_code(), 200);
        assert!(response.is_success());
        assert_eq!(response.elapsed_ms(), 120);
    }

    #[test]
    fn test_header_lookup_is_case_insensitive() {
        let response = response("[]");
        assert_eq!(
            response.header("Content-Type"),
            Some("application/json; charset=utf-8")
        );
        assert_eq!(response.content_type(), response.header("content-type"));
        assert_eq!(response.header("etag"), None);
    }

    #[test]
    fn test_json_decode() {
        #[derive(serde::Deserialize)]
        struct Item {
            id: i64,
        }

        let response = response(r#"[{"id": 1}, {"id": 2}]"#);
        let items: Vec<Item> = response.json().unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[1].id, 2);
    }

    #[test]
    fn test_json_decode_failure() {
        let response = response("not json");
        let err = response.json::<Vec<u8>>().unwrap_err();
        assert!(matches!(err, Error::Decode(_)));
    }

    #[test]
    fn test_pretty_body() {
        assert_eq!(response(r#"{"id":1}"#).pretty_body(), "{\n  \"id\": 1\n}");
        assert_eq!(response("plain").pretty_body(), "plain");
        assert_eq!(response("").text(), "");
    }
}
