//! Black-box HTTP checks for the FakeRestAPI book and author catalog.
//!
//! The crate is organised leaf-first: [`models`] and [`config`] are plain
//! values, [`client`] sends requests, [`assertions`] judges the responses,
//! and [`suites`] strings them together into the happy-path and edge-case
//! scenarios. [`testing`] provides a local stub of the service.

pub mod assertions;
pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod observability;
pub mod response;
pub mod scenario;
pub mod suites;
pub mod testing;

pub mod prelude {
    pub use crate::assertions::*;
    pub use crate::client::{ApiClient, log_response};
    pub use crate::config::ApiConfig;
    pub use crate::error::{Error, Result};
    pub use crate::models::{Author, Book};
    pub use crate::observability::TracingConfig;
    pub use crate::response::ApiResponse;
    pub use crate::scenario::Scenario;

    pub use http::StatusCode;
}
