//! Collection source abstraction
//!
//! The app layer talks to the backend only through [`CollectionSource`], so
//! action tests can substitute an in-memory source for [`crate::ApiClient`].

use qadash_core::{Record, Result, ViewSchema};
use serde_json::Value;

use crate::test_run::TestRunRequest;

/// Backend operations used by the explorer views.
#[trait_variant::make(CollectionSource: Send)]
pub trait LocalCollectionSource {
    /// Fetch a view's whole collection, optionally narrowed to a scope id.
    async fn fetch_collection(
        &self,
        schema: &'static ViewSchema,
        scope: Option<String>,
    ) -> Result<Vec<Record>>;

    /// Fetch the detail document of one record.
    async fn fetch_detail(&self, schema: &'static ViewSchema, id: String) -> Result<Value>;

    /// Ask the backend to start a test run. Returns the acknowledgment text.
    async fn start_test_run(&self, request: TestRunRequest) -> Result<String>;
}
