//! Log vocabulary shared by the scenarios.
//!
//! A [`Scenario`] prints a section header when it begins and then narrates
//! numbered steps. [`SuiteBanner`] frames a whole group of scenarios and
//! prints its closing banner when dropped.

use std::fmt::Display;
use std::time::{SystemTime, UNIX_EPOCH};

use tracing::{error, info};

const HEAVY_RULE: &str = "═══════════════════════════════════════════════════════════";
const LIGHT_RULE: &str = "─────────────────────────────────────────────────────────────";

/// Narrates one scenario.
#[derive(Debug, Clone)]
pub struct Scenario {
    title: String,
}

impl Scenario {
    /// Logs the section header `TEST: {group} - {name}`.
    pub fn begin(group: &str, name: &str) -> Self {
        let title = format!("{group} - {name}");
        info!("{}", LIGHT_RULE);
        info!("TEST: {}", title);
        info!("{}", LIGHT_RULE);
        Self { title }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn step(&self, number: u32, description: impl Display) {
        info!("Step {}: {}", number, description);
    }

    pub fn info(&self, message: impl Display) {
        info!("ℹ INFO: {}", message);
    }

    pub fn success(&self, message: impl Display) {
        info!("✓ SUCCESS: {}", message);
    }

    pub fn failure(&self, message: impl Display) {
        error!("✗ FAILURE: {}", message);
    }
}

/// Opening and closing banners around a group of scenarios.
#[derive(Debug)]
pub struct SuiteBanner {
    name: String,
}

impl SuiteBanner {
    pub fn start(name: impl Into<String>) -> Self {
        let name = name.into();
        let timestamp_ms = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or_default();

        info!("{}", HEAVY_RULE);
        info!("Starting Test Class: {}", name);
        info!("{}", HEAVY_RULE);
        info!(timestamp_ms, "Test execution timestamp");

        Self { name }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Drop for SuiteBanner {
    fn drop(&mut self) {
        info!("{}", HEAVY_RULE);
        info!("Completed Test Class: {}", self.name);
        info!("{}", HEAVY_RULE);
    }
}
