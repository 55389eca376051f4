//! Target service configuration.
//!
//! [`ApiConfig`] holds the endpoint, timeout and content-type settings the
//! suites run against. The defaults are the public FakeRestAPI deployment;
//! [`ApiConfig::from_env`] lets a run point somewhere else through
//! environment variables or a `.env` file.

use std::env;
use std::str::FromStr;
use std::time::Duration;

/// Base URL of the public FakeRestAPI service.
pub const BASE_URL: &str = "https://fakerestapi.azurewebsites.net";

/// API version prefix shared by every endpoint.
pub const API_V1: &str = "/api/v1";

/// Books collection path.
pub const BOOKS_ENDPOINT: &str = "/api/v1/Books";

/// Authors collection path.
pub const AUTHORS_ENDPOINT: &str = "/api/v1/Authors";

pub const HTTP_200_OK: u16 = 200;
pub const HTTP_201_CREATED: u16 = 201;
pub const HTTP_204_NO_CONTENT: u16 = 204;
pub const HTTP_400_BAD_REQUEST: u16 = 400;
pub const HTTP_404_NOT_FOUND: u16 = 404;
pub const HTTP_500_INTERNAL_SERVER_ERROR: u16 = 500;

/// Request timeout in milliseconds.
pub const REQUEST_TIMEOUT_MS: u64 = 5000;

/// Connection timeout in milliseconds.
pub const CONNECTION_TIMEOUT_MS: u64 = 5000;

/// Content type sent and accepted on every request.
pub const CONTENT_TYPE_JSON: &str = "application/json";

pub const BASE_URL_VAR: &str = "SHELFCHECK_BASE_URL";
pub const REQUEST_TIMEOUT_VAR: &str = "SHELFCHECK_REQUEST_TIMEOUT_MS";
pub const CONNECT_TIMEOUT_VAR: &str = "SHELFCHECK_CONNECT_TIMEOUT_MS";

/// Read-only settings for one suite run.
///
/// Built once and handed to [`ApiClient::new`](crate::client::ApiClient::new);
/// nothing in the crate reads configuration from global state.
///
/// # Examples
///
/// ```
/// use shelfcheck::config::ApiConfig;
///
/// let config = ApiConfig::default();
/// assert_eq!(
///     config.books_url(),
///     "https://fakerestapi.azurewebsites.net/api/v1/Books"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    /// Scheme and authority, without a trailing slash.
    pub base_url: String,
    /// Total time allowed for one request.
    pub request_timeout: Duration,
    /// Time allowed to establish a connection.
    pub connect_timeout: Duration,
    /// Honour `HTTP_PROXY` and friends. Off for loopback targets.
    pub use_system_proxy: bool,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: BASE_URL.to_string(),
            request_timeout: Duration::from_millis(REQUEST_TIMEOUT_MS),
            connect_timeout: Duration::from_millis(CONNECTION_TIMEOUT_MS),
            use_system_proxy: true,
        }
    }
}

impl ApiConfig {
    /// Creates a configuration with the default constants.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads the configuration from the environment.
    ///
    /// Reads `.env` if present, then `SHELFCHECK_BASE_URL`,
    /// `SHELFCHECK_REQUEST_TIMEOUT_MS` and `SHELFCHECK_CONNECT_TIMEOUT_MS`.
    /// Unset variables fall back to the defaults; a timeout that is set but
    /// not a number is an error.
    pub fn from_env() -> Result<Self, ConfigError> {
        load_dotenv();

        let base_url = get_env_or(BASE_URL_VAR, BASE_URL);
        let request_timeout = optional_millis(REQUEST_TIMEOUT_VAR, REQUEST_TIMEOUT_MS)?;
        let connect_timeout = optional_millis(CONNECT_TIMEOUT_VAR, CONNECTION_TIMEOUT_MS)?;

        Ok(Self::default()
            .with_base_url(base_url)
            .with_request_timeout(request_timeout)
            .with_connect_timeout(connect_timeout))
    }

    /// Sets the base URL. A trailing slash is dropped.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    /// Sets the request timeout.
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Sets the connection timeout.
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    pub fn with_system_proxy(mut self, enabled: bool) -> Self {
        self.use_system_proxy = enabled;
        self
    }

    /// Joins an endpoint path onto the base URL.
    pub fn endpoint_url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url, endpoint)
    }

    pub fn books_url(&self) -> String {
        self.endpoint_url(BOOKS_ENDPOINT)
    }

    pub fn authors_url(&self) -> String {
        self.endpoint_url(AUTHORS_ENDPOINT)
    }

    /// URL of a single book. Takes any displayable id so that malformed
    /// ids (`"abc"`) can be requested too.
    pub fn book_url(&self, id: impl std::fmt::Display) -> String {
        format!("{}/{}", self.books_url(), id)
    }

    pub fn author_url(&self, id: impl std::fmt::Display) -> String {
        format!("{}/{}", self.authors_url(), id)
    }

    /// Request timeout in whole milliseconds.
    pub fn request_timeout_ms(&self) -> u64 {
        self.request_timeout.as_millis() as u64
    }
}

fn optional_millis(key: &str, default: u64) -> Result<Duration, ConfigError> {
    match env::var(key) {
        Ok(_) => get_env_parsed::<u64>(key).map(Duration::from_millis),
        Err(_) => Ok(Duration::from_millis(default)),
    }
}

/// Load environment variables from a `.env` file if it exists.
pub fn load_dotenv() {
    let _ = dotenvy::dotenv();
}

/// Get a required environment variable.
pub fn get_env(key: &str) -> Result<String, ConfigError> {
    env::var(key).map_err(|_| ConfigError::Missing(key.to_string()))
}

/// Get an optional environment variable with a default value.
pub fn get_env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Get and parse an environment variable.
pub fn get_env_parsed<T: FromStr>(key: &str) -> Result<T, ConfigError> {
    let value = get_env(key)?;
    value.parse().map_err(|_| ConfigError::Invalid {
        key: key.to_string(),
        value,
    })
}

/// Get and parse an environment variable, falling back to `default` when
/// it is unset or unparsable.
pub fn get_env_parsed_or<T: FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

/// Configuration loading errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Environment variable is not set.
    Missing(String),
    /// Environment variable value is invalid.
    Invalid { key: String, value: String },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Missing(key) => {
                write!(f, "Missing required environment variable '{}'", key)
            }
            ConfigError::Invalid { key, value } => {
                write!(
                    f,
                    "Invalid value '{}' for environment variable '{}' (failed to parse as expected type)",
                    value, key
                )
            }
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn clear_vars() {
        // SAFETY: every test touching these variables is #[serial].
        unsafe {
            env::remove_var(BASE_URL_VAR);
            env::remove_var(REQUEST_TIMEOUT_VAR);
            env::remove_var(CONNECT_TIMEOUT_VAR);
        }
    }

    #[test]
    fn test_default_config() {
        let config = ApiConfig::default();
        assert_eq!(config.base_url, BASE_URL);
        assert_eq!(config.request_timeout, Duration::from_millis(5000));
        assert_eq!(config.connect_timeout, Duration::from_millis(5000));
        assert_eq!(config.request_timeout_ms(), 5000);
        assert!(config.use_system_proxy);
    }

    #[test]
    fn test_endpoint_urls() {
        let config = ApiConfig::default();
        assert_eq!(
            config.books_url(),
            "https://fakerestapi.azurewebsites.net/api/v1/Books"
        );
        assert_eq!(
            config.authors_url(),
            "https://fakerestapi.azurewebsites.net/api/v1/Authors"
        );
        assert_eq!(
            config.book_url(7),
            "https://fakerestapi.azurewebsites.net/api/v1/Books/7"
        );
        assert_eq!(
            config.book_url("abc"),
            "https://fakerestapi.azurewebsites.net/api/v1/Books/abc"
        );
        assert!(BOOKS_ENDPOINT.starts_with(API_V1));
        assert!(AUTHORS_ENDPOINT.starts_with(API_V1));
    }

    #[test]
    fn test_with_base_url_trims_trailing_slash() {
        let config = ApiConfig::new().with_base_url("http://127.0.0.1:8080/");
        assert_eq!(config.base_url, "http://127.0.0.1:8080");
        assert_eq!(config.author_url(3), "http://127.0.0.1:8080/api/v1/Authors/3");
    }

    #[test]
    #[serial]
    fn test_from_env_defaults() {
        clear_vars();
        let config = ApiConfig::from_env().unwrap();
        assert_eq!(config, ApiConfig::default());
    }

    #[test]
    #[serial]
    fn test_from_env_overrides() {
        clear_vars();
        unsafe {
            env::set_var(BASE_URL_VAR, "http://localhost:5000/");
            env::set_var(REQUEST_TIMEOUT_VAR, "1500");
        }

        let config = ApiConfig::from_env().unwrap();
        assert_eq!(config.base_url, "http://localhost:5000");
        assert_eq!(config.request_timeout, Duration::from_millis(1500));
        assert_eq!(config.connect_timeout, Duration::from_millis(5000));

        clear_vars();
    }

    #[test]
    #[serial]
    fn test_from_env_invalid_timeout() {
        clear_vars();
        unsafe {
            env::set_var(CONNECT_TIMEOUT_VAR, "soon");
        }

        let err = ApiConfig::from_env().unwrap_err();
        assert_eq!(
            err,
            ConfigError::Invalid {
                key: CONNECT_TIMEOUT_VAR.to_string(),
                value: "soon".to_string(),
            }
        );

        clear_vars();
    }

    #[test]
    fn test_get_env_missing() {
        let result = get_env("SHELFCHECK_TEST_MISSING_VAR_12345");
        assert!(result.is_err());
    }

    #[test]
    fn test_get_env_or_default() {
        let value = get_env_or("SHELFCHECK_TEST_MISSING_VAR_12345", "default");
        assert_eq!(value, "default");
    }

    #[test]
    fn test_get_env_parsed_or_default() {
        let value: u64 = get_env_parsed_or("SHELFCHECK_TEST_MISSING_VAR_12345", 5000);
        assert_eq!(value, 5000);
    }

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::Missing("SHELFCHECK_BASE_URL".to_string());
        assert_eq!(
            err.to_string(),
            "Missing required environment variable 'SHELFCHECK_BASE_URL'"
        );

        let err = ConfigError::Invalid {
            key: "SHELFCHECK_REQUEST_TIMEOUT_MS".to_string(),
            value: "abc".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid value 'abc' for environment variable 'SHELFCHECK_REQUEST_TIMEOUT_MS' (failed to parse as expected type)"
        );
    }
}
