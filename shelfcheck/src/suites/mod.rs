//! Scenario groups for the catalog resources.
//!
//! Each scenario is an async function that takes an [`ApiClient`], returns
//! transport errors, and panics on a failed assertion. Every group also
//! exposes a priority-ordered `SCENARIOS` table that [`run_suite`] walks.

pub mod authors;
pub mod books;
pub mod books_edge;

use std::future::Future;
use std::pin::Pin;

use serde::de::DeserializeOwned;
use tracing::{error, info};

use crate::client::ApiClient;
use crate::error::Result;
use crate::scenario::SuiteBanner;

/// An owned, sendable scenario future.
pub type BoxFuture<T> = Pin<Box<dyn Future<Output = T> + Send + 'static>>;

/// One entry in a group's scenario table.
#[derive(Clone, Copy)]
pub struct ScenarioDef {
    /// Execution order within the group, lowest first.
    pub priority: u32,
    pub name: &'static str,
    pub description: &'static str,
    pub run: fn(ApiClient) -> BoxFuture<Result<()>>,
}

impl std::fmt::Debug for ScenarioDef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScenarioDef")
            .field("priority", &self.priority)
            .field("name", &self.name)
            .finish()
    }
}

/// Result of running a scenario table.
#[derive(Debug, Default)]
pub struct SuiteOutcome {
    pub passed: Vec<&'static str>,
    /// Scenario name and failure message.
    pub failed: Vec<(&'static str, String)>,
}

impl SuiteOutcome {
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }

    pub fn total(&self) -> usize {
        self.passed.len() + self.failed.len()
    }
}

/// Runs every scenario in priority order.
///
/// Each scenario runs on its own task, so a failed assertion is recorded
/// and the remaining scenarios still run. Nothing is shared between
/// scenarios except the client.
pub async fn run_suite(name: &str, scenarios: &[ScenarioDef], client: &ApiClient) -> SuiteOutcome {
    let _banner = SuiteBanner::start(name);

    let mut ordered = scenarios.to_vec();
    ordered.sort_by_key(|s| s.priority);

    let mut outcome = SuiteOutcome::default();
    for scenario in ordered {
        info!(priority = scenario.priority, "{}", scenario.description);

        match tokio::spawn((scenario.run)(client.clone())).await {
            Ok(Ok(())) => outcome.passed.push(scenario.name),
            Ok(Err(e)) => {
                error!(scenario = scenario.name, error = %e, "scenario aborted");
                outcome.failed.push((scenario.name, e.to_string()));
            }
            Err(join_error) => {
                let message = if join_error.is_panic() {
                    panic_message(join_error.into_panic())
                } else {
                    "scenario task was cancelled".to_string()
                };
                error!(scenario = scenario.name, %message, "scenario failed");
                outcome.failed.push((scenario.name, message));
            }
        }
    }

    info!(
        passed = outcome.passed.len(),
        failed = outcome.failed.len(),
        "suite finished"
    );
    outcome
}

fn panic_message(payload: Box<dyn std::any::Any + Send>) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "scenario panicked".to_string()
    }
}

/// Lists a collection and returns the id of its first item, if any.
pub(crate) async fn first_id<T>(client: &ApiClient, url: &str, id_of: fn(&T) -> i64) -> Result<Option<i64>>
where
    T: DeserializeOwned,
{
    let items: Vec<T> = client.get(url).await?.json()?;
    Ok(items.first().map(id_of))
}
