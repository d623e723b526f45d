//! # qadash-client - Backend Client
//!
//! Async HTTP access to the QA backend's REST API.
//!
//! ## Public API
//!
//! - [`ApiClient`] - `reqwest` client bound to a base URL
//! - [`CollectionSource`] / [`LocalCollectionSource`] - the backend operations
//!   the app layer depends on (collection, detail, start test run)
//! - [`TestRunRequest`] - body of the start-test request
//!
//! With the `test-helpers` feature, [`test_utils`] provides a canned-response
//! HTTP server for tests.

pub mod client;
pub mod source;
pub mod test_run;

#[cfg(any(test, feature = "test-helpers"))]
pub mod test_utils;

pub use client::{ApiClient, DEFAULT_TIMEOUT, START_TEST_PATH};
pub use source::{CollectionSource, LocalCollectionSource};
pub use test_run::TestRunRequest;
