//! Configuration types for qadash
//!
//! Defines:
//! - `Settings` - Global application settings
//! - `ServerSettings`, `ExplorerSettings`, `TestRunSettings` - its tables

use std::time::Duration;

use chrono::{DateTime, Local};
use qadash_client::TestRunRequest;
use serde::{Deserialize, Serialize};

/// Polling never runs faster than this.
pub const MIN_POLL_INTERVAL_SECS: u64 = 5;

/// Application settings (.qadash/config.toml)
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,

    #[serde(default)]
    pub explorer: ExplorerSettings,

    #[serde(default)]
    pub test_run: TestRunSettings,
}

/// Backend connection settings
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ServerSettings {
    /// Base URL every endpoint path is resolved against
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl ServerSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.max(1))
    }
}

fn default_base_url() -> String {
    "http://localhost:8081/".to_string()
}

fn default_timeout_secs() -> u64 {
    15
}

/// Explorer behavior settings
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ExplorerSettings {
    /// Rows per page
    #[serde(default = "default_page_size")]
    pub page_size: usize,

    /// Seconds between automatic reloads while polling
    #[serde(default = "default_poll_interval_secs")]
    pub poll_interval_secs: u64,

    /// Start polling the initial view at launch
    #[serde(default)]
    pub auto_poll: bool,
}

impl Default for ExplorerSettings {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            poll_interval_secs: default_poll_interval_secs(),
            auto_poll: false,
        }
    }
}

impl ExplorerSettings {
    /// Page size, never below 1.
    pub fn effective_page_size(&self) -> usize {
        self.page_size.max(1)
    }

    /// Poll interval, never below [`MIN_POLL_INTERVAL_SECS`].
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs.max(MIN_POLL_INTERVAL_SECS))
    }
}

fn default_page_size() -> usize {
    qadash_core::DEFAULT_PAGE_SIZE
}

fn default_poll_interval_secs() -> u64 {
    30
}

/// Parameters sent when starting a test run
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct TestRunSettings {
    /// Run id sent to the runner. Empty generates one from the clock.
    #[serde(default)]
    pub run_id: String,

    #[serde(default = "default_environment")]
    pub environment: String,

    #[serde(default = "default_browser")]
    pub browser: String,

    #[serde(default)]
    pub dry_run: bool,

    #[serde(default = "default_true")]
    pub log: bool,

    #[serde(default = "default_true")]
    pub report: bool,

    #[serde(default = "default_true")]
    pub output: bool,

    #[serde(default)]
    pub include_tags: Vec<String>,

    #[serde(default)]
    pub exclude_tags: Vec<String>,

    #[serde(default)]
    pub capture_screenshot: bool,

    #[serde(default)]
    pub video_recording: bool,

    /// Suite folder on the runner host
    #[serde(default)]
    pub script_path: String,

    #[serde(default = "default_true")]
    pub headless: bool,
}

impl Default for TestRunSettings {
    fn default() -> Self {
        Self {
            run_id: String::new(),
            environment: default_environment(),
            browser: default_browser(),
            dry_run: false,
            log: true,
            report: true,
            output: true,
            include_tags: Vec::new(),
            exclude_tags: Vec::new(),
            capture_screenshot: false,
            video_recording: false,
            script_path: String::new(),
            headless: true,
        }
    }
}

impl TestRunSettings {
    /// Build the request body. An empty `run_id` becomes `qadash-<timestamp>`.
    pub fn to_request(&self, now: DateTime<Local>) -> TestRunRequest {
        let run_id = if self.run_id.trim().is_empty() {
            format!("qadash-{}", now.format("%Y%m%d-%H%M%S"))
        } else {
            self.run_id.clone()
        };

        TestRunRequest {
            run_id,
            environment: self.environment.clone(),
            browser: self.browser.clone(),
            dry_run: self.dry_run,
            log: self.log,
            report: self.report,
            output: self.output,
            include_tags: self.include_tags.clone(),
            exclude_tags: self.exclude_tags.clone(),
            capture_screenshot: self.capture_screenshot,
            video_recording: self.video_recording,
            script_path: self.script_path.clone(),
            headless: self.headless,
        }
    }
}

fn default_environment() -> String {
    "staging".to_string()
}

fn default_browser() -> String {
    "chrome".to_string()
}

fn default_true() -> bool {
    true
}
