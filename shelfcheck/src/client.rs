//! Request helper for the catalog API.

use std::time::Instant;

use http::{HeaderMap, HeaderValue, Method, header};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::config::{ApiConfig, CONTENT_TYPE_JSON};
use crate::error::{Error, Result};
use crate::response::ApiResponse;

/// Sends JSON requests to the catalog service.
///
/// Every request carries `Content-Type: application/json` and
/// `Accept: application/json`. Each call is attempted exactly once; a
/// transport failure comes back as [`Error::Transport`].
///
/// # Examples
///
/// ```ignore
/// use shelfcheck::prelude::*;
///
/// let client = ApiClient::new(ApiConfig::default())?;
/// let response = client.get(&client.config().books_url()).await?;
/// assert_status_ok(&response, "Expected HTTP 200 OK status code");
/// ```
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    config: ApiConfig,
}

impl ApiClient {
    /// Creates a client applying the configured timeouts.
    pub fn new(config: ApiConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(header::CONTENT_TYPE, HeaderValue::from_static(CONTENT_TYPE_JSON));
        headers.insert(header::ACCEPT, HeaderValue::from_static(CONTENT_TYPE_JSON));

        let mut builder = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(config.request_timeout)
            .connect_timeout(config.connect_timeout);
        if !config.use_system_proxy {
            builder = builder.no_proxy();
        }
        let http = builder.build().map_err(Error::Client)?;

        Ok(Self { http, config })
    }

    /// Returns the configuration this client was built with.
    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    pub async fn get(&self, url: &str) -> Result<ApiResponse> {
        info!(url, "Making GET request");
        self.send(Method::GET, url, None).await
    }

    pub async fn post<B: Serialize + ?Sized>(&self, url: &str, body: &B) -> Result<ApiResponse> {
        info!(url, "Making POST request with body");
        self.send(Method::POST, url, Some(encode(body)?)).await
    }

    pub async fn put<B: Serialize + ?Sized>(&self, url: &str, body: &B) -> Result<ApiResponse> {
        info!(url, "Making PUT request with body");
        self.send(Method::PUT, url, Some(encode(body)?)).await
    }

    pub async fn delete(&self, url: &str) -> Result<ApiResponse> {
        info!(url, "Making DELETE request");
        self.send(Method::DELETE, url, None).await
    }

    pub async fn patch<B: Serialize + ?Sized>(&self, url: &str, body: &B) -> Result<ApiResponse> {
        info!(url, "Making PATCH request with body");
        self.send(Method::PATCH, url, Some(encode(body)?)).await
    }

    async fn send(&self, method: Method, url: &str, body: Option<Vec<u8>>) -> Result<ApiResponse> {
        let mut request = self.http.request(method.clone(), url);
        if let Some(body) = body {
            debug!(bytes = body.len(), "request body encoded");
            request = request.body(body);
        }

        let started = Instant::now();
        let result = match request.send().await {
            Ok(response) => ApiResponse::from_reqwest(response, started).await,
            Err(e) => Err(e),
        };

        match result {
            Ok(response) => {
                debug!(
                    %method,
                    url,
                    status = response.status_code(),
                    duration_ms = response.elapsed_ms(),
                    "response received"
                );
                Ok(response)
            }
            Err(e) => {
                let err = Error::transport(method, url, e);
                warn!(kind = ?err.kind(), error = %err, "request failed");
                Err(err)
            }
        }
    }
}

fn encode<B: Serialize + ?Sized>(body: &B) -> Result<Vec<u8>> {
    serde_json::to_vec(body).map_err(Error::Encode)
}

/// Logs the status code and body of a response.
pub fn log_response(response: &ApiResponse) {
    info!(status = response.status_code(), "Response Status Code");
    info!(body = %response.text(), "Response Body");
}
