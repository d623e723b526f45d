//! Start-test request body

use serde::{Deserialize, Serialize};

/// JSON body of `POST api/v1/start-test/start`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestRunRequest {
    pub run_id: String,
    pub environment: String,
    pub browser: String,
    pub dry_run: bool,
    pub log: bool,
    pub report: bool,
    pub output: bool,
    pub include_tags: Vec<String>,
    pub exclude_tags: Vec<String>,
    pub capture_screenshot: bool,
    pub video_recording: bool,
    pub script_path: String,
    pub headless: bool,
}
