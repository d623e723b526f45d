//! qadash - A terminal dashboard for QA test results, runs and devices
//!
//! This is the binary entry point. All logic lives in the library crates.

use std::path::PathBuf;

use clap::Parser;
use qadash::SnapshotOptions;
use qadash_app::config;
use qadash_core::prelude::*;
use qadash_core::{ViewKind, ViewRoute};

/// qadash - A terminal dashboard for QA test results, runs and devices
#[derive(Parser, Debug)]
#[command(name = "qadash")]
#[command(about = "A terminal dashboard for QA test results, runs and devices", long_about = None)]
struct Args {
    /// Config file (default: .qadash/config.toml, then the user config dir)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Backend base URL, overriding the config file
    #[arg(long, env = "QADASH_BASE_URL", value_name = "URL")]
    base_url: Option<String>,

    /// View to open: results, runs or devices
    #[arg(long, default_value = "results")]
    view: ViewKind,

    /// Scope the view to one id (run id for results, app id for runs)
    #[arg(long, value_name = "ID")]
    scope: Option<String>,

    /// Poll the opened view at the configured interval
    #[arg(long)]
    poll: bool,

    /// Print one JSON snapshot of the view instead of starting the TUI
    #[arg(long)]
    headless: bool,

    /// Free-text search (headless)
    #[arg(long, value_name = "TEXT")]
    search: Option<String>,

    /// Exact status value, or "all" (headless)
    #[arg(long, value_name = "VALUE")]
    status: Option<String>,

    /// First day of the date range, YYYY-MM-DD (headless)
    #[arg(long, value_name = "DATE")]
    from: Option<String>,

    /// Last day of the date range, YYYY-MM-DD (headless)
    #[arg(long, value_name = "DATE")]
    to: Option<String>,

    /// Sort field (headless)
    #[arg(long, value_name = "FIELD")]
    sort: Option<String>,

    /// Page number, clamped to the available pages (headless)
    #[arg(long, value_name = "N")]
    page: Option<usize>,
}

impl Args {
    fn route(&self) -> ViewRoute {
        match &self.scope {
            Some(scope) => ViewRoute::scoped(self.view, scope.clone()),
            None => ViewRoute::new(self.view),
        }
    }

    fn snapshot_options(&self) -> SnapshotOptions {
        SnapshotOptions {
            search: self.search.clone(),
            status: self.status.clone(),
            from: self.from.clone(),
            to: self.to.clone(),
            sort: self.sort.clone(),
            page: self.page,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    color_eyre::install().map_err(|e| Error::terminal(e.to_string()))?;
    qadash_core::logging::init()?;

    let working_dir = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let mut settings = config::load_settings(args.config.as_deref(), &working_dir)
        .context("Failed to load settings")?;
    if let Some(url) = &args.base_url {
        settings.server.base_url = url.clone();
    }
    if args.poll {
        settings.explorer.auto_poll = true;
    }

    let route = args.route();
    info!(route = %route, headless = args.headless, "qadash starting");

    if !args.headless {
        let result = qadash::run(settings, route).await;
        if let Err(ref e) = result {
            error!("Application error: {:?}", e);
        }
        info!("qadash exiting");
        return result;
    }

    settings.explorer.auto_poll = false;
    let snapshot = qadash::run_headless(settings, route, &args.snapshot_options()).await?;
    println!("{}", serde_json::to_string_pretty(&snapshot)?);

    if let Some(message) = &snapshot.error {
        eprintln!("load failed: {message}");
        std::process::exit(1);
    }
    Ok(())
}
