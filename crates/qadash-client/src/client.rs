//! HTTP client for the QA backend
//!
//! Endpoint resolution, request dispatch, and mapping of every failure into
//! the load taxonomy of [`qadash_core::Error`]: connection and timeout
//! problems become `Transport`, non-2xx responses become `Http`, and bodies
//! that are not the expected JSON become `MalformedBody`.

use std::time::Duration;

use qadash_core::prelude::*;
use qadash_core::{decode_records, Record, ViewSchema};
use reqwest::{Response, StatusCode};
use serde_json::Value;
use url::Url;

use crate::source::CollectionSource;
use crate::test_run::TestRunRequest;

/// Path of the endpoint that starts a test run.
pub const START_TEST_PATH: &str = "api/v1/start-test/start";

/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

/// Async client bound to one backend base URL.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
    timeout: Duration,
}

impl ApiClient {
    /// Create a client for `base_url` (a trailing `/` is added when missing).
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let base_url = normalize_base_url(base_url)?;
        let http = reqwest::Client::builder()
            .user_agent(format!("qadash/{}", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()
            .map_err(|e| Error::transport(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            http,
            base_url,
            timeout,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// URL of a view's collection, optionally narrowed to `scope`.
    ///
    /// The scope id is appended as one escaped path segment. Views without a
    /// scoped endpoint ignore the scope.
    pub fn collection_url(&self, schema: &ViewSchema, scope: Option<&str>) -> Result<Url> {
        match (scope, schema.scoped_path) {
            (Some(scope), Some(path)) => self.url_with_segment(path, scope),
            (Some(scope), None) => {
                warn!(view = %schema.kind, scope, "view cannot be scoped, ignoring scope");
                self.join(schema.collection_path)
            }
            (None, _) => self.join(schema.collection_path),
        }
    }

    /// URL of one record's detail resource, if the view has one.
    pub fn detail_url(&self, schema: &ViewSchema, id: &str) -> Result<Url> {
        let path = schema.detail_path.ok_or_else(|| {
            Error::invalid_url(format!("{} has no detail endpoint", schema.title))
        })?;
        self.url_with_segment(path, id)
    }

    fn join(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path)
            .map_err(|e| Error::invalid_url(format!("{path}: {e}")))
    }

    fn url_with_segment(&self, path: &str, segment: &str) -> Result<Url> {
        let mut url = self.join(path)?;
        url.path_segments_mut()
            .map_err(|_| Error::invalid_url(format!("{path} cannot take path segments")))?
            .pop_if_empty()
            .push(segment);
        Ok(url)
    }

    async fn get_json(&self, url: Url) -> Result<Value> {
        debug!(%url, "GET");
        let response = self
            .http
            .get(url.clone())
            .send()
            .await
            .map_err(|e| self.transport_error(&url, e))?;
        let response = check_status(response).await?;
        let bytes = response
            .bytes()
            .await
            .map_err(|e| self.transport_error(&url, e))?;
        serde_json::from_slice(&bytes).map_err(|e| Error::malformed(format!("invalid JSON: {e}")))
    }

    fn transport_error(&self, url: &Url, err: reqwest::Error) -> Error {
        if err.is_timeout() {
            Error::transport(format!(
                "request to {url} timed out after {}s",
                self.timeout.as_secs()
            ))
        } else if err.is_connect() {
            Error::transport(format!("could not connect to {url}"))
        } else {
            Error::transport(err.to_string())
        }
    }
}

impl CollectionSource for ApiClient {
    async fn fetch_collection(
        &self,
        schema: &'static ViewSchema,
        scope: Option<String>,
    ) -> Result<Vec<Record>> {
        let url = self.collection_url(schema, scope.as_deref())?;
        let body = self.get_json(url).await?;
        let records = decode_records(body, schema.id_field)?;
        debug!(view = %schema.kind, count = records.len(), "collection decoded");
        Ok(records)
    }

    async fn fetch_detail(&self, schema: &'static ViewSchema, id: String) -> Result<Value> {
        let url = self.detail_url(schema, &id)?;
        self.get_json(url).await
    }

    async fn start_test_run(&self, request: TestRunRequest) -> Result<String> {
        let url = self.join(START_TEST_PATH)?;
        debug!(%url, run_id = %request.run_id, "POST");
        let response = self
            .http
            .post(url.clone())
            .json(&request)
            .send()
            .await
            .map_err(|e| self.transport_error(&url, e))?;
        let response = check_status(response).await?;
        let text = response
            .text()
            .await
            .map_err(|e| self.transport_error(&url, e))?;
        Ok(text.trim().to_string())
    }
}

/// Pass 2xx responses through; turn anything else into `Error::Http`.
async fn check_status(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(Error::http(status.as_u16(), failure_message(status, &body)))
}

/// The response body when it has text, otherwise the canonical reason.
fn failure_message(status: StatusCode, body: &str) -> String {
    if body.trim().is_empty() {
        status
            .canonical_reason()
            .unwrap_or("Unknown status")
            .to_string()
    } else {
        body.to_string()
    }
}

fn normalize_base_url(input: &str) -> Result<Url> {
    let trimmed = input.trim();
    let with_slash = if trimmed.ends_with('/') {
        trimmed.to_string()
    } else {
        format!("{trimmed}/")
    };
    let url =
        Url::parse(&with_slash).map_err(|e| Error::invalid_url(format!("{trimmed}: {e}")))?;
    if url.cannot_be_a_base() {
        return Err(Error::invalid_url(format!("{trimmed} cannot be a base URL")));
    }
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{CannedResponse, TestServer};
    use qadash_core::{DEVICES_SCHEMA, RESULTS_SCHEMA, RUNS_SCHEMA};

    fn client(base: &str) -> ApiClient {
        ApiClient::new(base, Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn test_base_url_gets_trailing_slash() {
        let c = client("http://localhost:8081");
        assert_eq!(c.base_url().as_str(), "http://localhost:8081/");
    }

    #[test]
    fn test_base_url_rejects_garbage() {
        assert!(matches!(
            ApiClient::new("not a url", DEFAULT_TIMEOUT),
            Err(Error::InvalidUrl { .. })
        ));
    }

    #[test]
    fn test_collection_urls() {
        let c = client("http://localhost:8081/");
        assert_eq!(
            c.collection_url(&RESULTS_SCHEMA, None).unwrap().as_str(),
            "http://localhost:8081/api/v1/test"
        );
        assert_eq!(
            c.collection_url(&RESULTS_SCHEMA, Some("HIS001")).unwrap().as_str(),
            "http://localhost:8081/api/v1/test/HIS001"
        );
        assert_eq!(
            c.collection_url(&RUNS_SCHEMA, Some("7")).unwrap().as_str(),
            "http://localhost:8081/api/v1/test/run/app/7"
        );
    }

    #[test]
    fn test_scope_is_escaped_as_one_segment() {
        let c = client("http://localhost:8081/");
        let url = c.collection_url(&RESULTS_SCHEMA, Some("a/b c")).unwrap();
        assert_eq!(url.as_str(), "http://localhost:8081/api/v1/test/a%2Fb%20c");
    }

    #[test]
    fn test_base_path_prefix_is_kept() {
        let c = client("http://example.com/qa");
        assert_eq!(
            c.collection_url(&DEVICES_SCHEMA, None).unwrap().as_str(),
            "http://example.com/qa/api/v1/device"
        );
    }

    #[test]
    fn test_unscopable_view_ignores_scope() {
        let c = client("http://localhost:8081/");
        assert_eq!(
            c.collection_url(&DEVICES_SCHEMA, Some("x")).unwrap().as_str(),
            "http://localhost:8081/api/v1/device"
        );
    }

    #[test]
    fn test_detail_url() {
        let c = client("http://localhost:8081/");
        assert_eq!(
            c.detail_url(&DEVICES_SCHEMA, "12").unwrap().as_str(),
            "http://localhost:8081/api/v1/device/12"
        );
        assert!(c.detail_url(&RESULTS_SCHEMA, "12").is_err());
    }

    #[test]
    fn test_failure_message_falls_back_to_reason() {
        assert_eq!(
            failure_message(StatusCode::INTERNAL_SERVER_ERROR, "  "),
            "Internal Server Error"
        );
        assert_eq!(failure_message(StatusCode::NOT_FOUND, "no run"), "no run");
    }

    #[tokio::test]
    async fn test_fetch_collection_decodes_records() {
        let server = TestServer::start(vec![(
            "GET /api/v1/test",
            CannedResponse::json(r#"[{"id":1,"status":"PASS"},{"id":2,"status":"FAIL","extra":[1]}]"#),
        )])
        .await
        .unwrap();

        let records = client(&server.base_url())
            .fetch_collection(&RESULTS_SCHEMA, None)
            .await
            .unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].display("status"), "FAIL");
    }

    #[tokio::test]
    async fn test_fetch_collection_http_error_carries_body() {
        let server = TestServer::start(vec![(
            "GET /api/v1/test/run",
            CannedResponse::status(500, "database unavailable\n"),
        )])
        .await
        .unwrap();

        let err = client(&server.base_url())
            .fetch_collection(&RUNS_SCHEMA, None)
            .await
            .unwrap_err();
        match err {
            Error::Http { status, message } => {
                assert_eq!(status, 500);
                assert_eq!(message, "database unavailable");
            }
            other => panic!("expected Http error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_fetch_collection_rejects_non_array() {
        let server = TestServer::start(vec![(
            "GET /api/v1/device",
            CannedResponse::json(r#"{"devices":[]}"#),
        )])
        .await
        .unwrap();

        let err = client(&server.base_url())
            .fetch_collection(&DEVICES_SCHEMA, None)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::MalformedBody { .. }));
    }

    #[tokio::test]
    async fn test_fetch_collection_rejects_invalid_json() {
        let server = TestServer::start(vec![(
            "GET /api/v1/device",
            CannedResponse::json("[{\"id\":1},"),
        )])
        .await
        .unwrap();

        let err = client(&server.base_url())
            .fetch_collection(&DEVICES_SCHEMA, None)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::MalformedBody { .. }));
    }

    #[tokio::test]
    async fn test_fetch_collection_missing_id_fails_whole_batch() {
        let server = TestServer::start(vec![(
            "GET /api/v1/test",
            CannedResponse::json(r#"[{"id":1},{"name":"no id"}]"#),
        )])
        .await
        .unwrap();

        let err = client(&server.base_url())
            .fetch_collection(&RESULTS_SCHEMA, None)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::MissingRecordId { index: 1, .. }));
    }

    #[tokio::test]
    async fn test_connection_refused_is_transport_error() {
        let base = {
            let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
            format!("http://{}/", listener.local_addr().unwrap())
        };
        let err = client(&base)
            .fetch_collection(&RESULTS_SCHEMA, None)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Transport { .. }));
    }

    #[tokio::test]
    async fn test_fetch_detail_returns_json() {
        let server = TestServer::start(vec![(
            "GET /api/v1/device/3",
            CannedResponse::json(r#"{"id":3,"history":[{"user":"amina"}]}"#),
        )])
        .await
        .unwrap();

        let detail = client(&server.base_url())
            .fetch_detail(&DEVICES_SCHEMA, "3".to_string())
            .await
            .unwrap();
        assert_eq!(detail["history"][0]["user"], "amina");
    }

    #[tokio::test]
    async fn test_start_test_run_posts_camel_case_body() {
        let server = TestServer::start(vec![(
            "POST /api/v1/start-test/start",
            CannedResponse::text("Run started successifully"),
        )])
        .await
        .unwrap();

        let request = TestRunRequest {
            run_id: "nightly-1".into(),
            include_tags: vec!["smoke".into()],
            ..Default::default()
        };
        let ack = client(&server.base_url())
            .start_test_run(request)
            .await
            .unwrap();
        assert_eq!(ack, "Run started successifully");

        let requests = server.requests();
        assert_eq!(requests.len(), 1);
        let body: Value = serde_json::from_str(&requests[0].body).unwrap();
        assert_eq!(body["runId"], "nightly-1");
        assert_eq!(body["includeTags"][0], "smoke");
    }
}
