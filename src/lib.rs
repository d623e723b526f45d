//! qadash library
//!
//! A terminal dashboard for a QA backend's test results, test runs and
//! device inventory. The binary wires these entry points to the CLI.

pub mod headless;

pub use headless::{run_headless, Snapshot, SnapshotOptions};
pub use qadash_tui::run;
