//! Logging setup for suite runs.

use tracing::Level;
use tracing_subscriber::{EnvFilter, fmt};

/// Configuration for the tracing subscriber.
///
/// `RUST_LOG` takes precedence over [`level`](Self::level) when set.
///
/// # Examples
///
/// ```ignore
/// use shelfcheck::observability::TracingConfig;
///
/// TracingConfig::new().json().init();
/// ```
#[derive(Debug, Clone)]
pub struct TracingConfig {
    /// Output logs as JSON.
    pub json: bool,
    /// The minimum log level.
    pub level: Level,
    /// Include the target (module path) in logs.
    pub with_target: bool,
    /// Include the source file in logs.
    pub with_file: bool,
    /// Include line numbers in logs.
    pub with_line_number: bool,
    /// Write through the test harness so output is captured per test.
    pub test_writer: bool,
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self {
            json: false,
            level: Level::INFO,
            with_target: false,
            with_file: false,
            with_line_number: false,
            test_writer: false,
        }
    }
}

impl TracingConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Preset for `cargo test`: output goes through the libtest capture.
    pub fn for_tests() -> Self {
        Self {
            test_writer: true,
            ..Self::default()
        }
    }

    /// Enables JSON output format.
    pub fn json(mut self) -> Self {
        self.json = true;
        self
    }

    /// Sets the minimum log level.
    pub fn level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    pub fn with_target(mut self, enabled: bool) -> Self {
        self.with_target = enabled;
        self
    }

    pub fn with_file(mut self, enabled: bool) -> Self {
        self.with_file = enabled;
        self
    }

    pub fn with_line_number(mut self, enabled: bool) -> Self {
        self.with_line_number = enabled;
        self
    }

    /// Installs the global subscriber.
    ///
    /// Returns `false` if a subscriber was already installed, which happens
    /// whenever several tests in one binary call this.
    pub fn init(self) -> bool {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(self.level.to_string()));

        let builder = fmt()
            .with_env_filter(filter)
            .with_target(self.with_target)
            .with_file(self.with_file)
            .with_line_number(self.with_line_number);

        match (self.json, self.test_writer) {
            (true, true) => builder.json().with_test_writer().try_init().is_ok(),
            (true, false) => builder.json().try_init().is_ok(),
            (false, true) => builder.with_test_writer().try_init().is_ok(),
            (false, false) => builder.try_init().is_ok(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tracing_config_default() {
        let config = TracingConfig::default();
        assert!(!config.json);
        assert_eq!(config.level, Level::INFO);
        assert!(!config.with_target);
        assert!(!config.with_file);
        assert!(!config.with_line_number);
        assert!(!config.test_writer);
    }

    #[test]
    fn test_tracing_config_for_tests() {
        let config = TracingConfig::for_tests();
        assert!(config.test_writer);
        assert_eq!(config.level, Level::INFO);
    }

    #[test]
    fn test_tracing_config_builder_chain() {
        let config = TracingConfig::new()
            .json()
            .level(Level::TRACE)
            .with_target(true)
            .with_file(true)
            .with_line_number(true);

        assert!(config.json);
        assert_eq!(config.level, Level::TRACE);
        assert!(config.with_target);
        assert!(config.with_file);
        assert!(config.with_line_number);
    }

    #[test]
    fn test_init_twice_is_harmless() {
        TracingConfig::for_tests().init();
        assert!(!TracingConfig::for_tests().init());
    }
}
