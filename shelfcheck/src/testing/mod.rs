//! In-process stand-in for the catalog service.
//!
//! [`StubCatalog`] serves the same endpoints as the public service from a
//! background task on a random local port, so every scenario can run
//! without network access.

mod catalog;
mod server;

pub use catalog::{Catalog, Reply};
pub use server::{RecordedRequest, StubCatalog, StubOptions};
