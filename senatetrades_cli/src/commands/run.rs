//! The `run` subcommand: execute the full analytics pipeline.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use chrono::Utc;
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};

use senatetrades_lib::{run_analytics, AnalyticsConfig, Db, PriceClient};

use crate::output::{print_run_summary, OutputFormat};

/// Arguments for the `run` subcommand.
///
/// Matches disclosed stock purchases against sales, prices them, and
/// rebuilds the senator and party analytics tables.
#[derive(Args)]
pub struct RunArgs {
    /// SQLite database path (required)
    #[arg(long)]
    pub db: PathBuf,

    /// TOML config file with run tuning (optional)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Price API token; falls back to SENATETRADES_API_TOKEN, then config
    #[arg(long)]
    pub token: Option<String>,

    /// Plain-text file of tickers to skip, one per line
    #[arg(long)]
    pub ignore_file: Option<PathBuf>,
}

pub async fn run(args: &RunArgs, format: &OutputFormat) -> Result<()> {
    let mut config = match &args.config {
        Some(path) => AnalyticsConfig::load(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => AnalyticsConfig::default(),
    };
    if let Some(path) = &args.ignore_file {
        config
            .load_ignore_file(path)
            .with_context(|| format!("loading ignore file from {}", path.display()))?;
    }

    let token = args
        .token
        .clone()
        .or_else(|| std::env::var("SENATETRADES_API_TOKEN").ok())
        .or_else(|| config.api_token.clone());
    let Some(token) = token else {
        bail!("no price API token: pass --token or set SENATETRADES_API_TOKEN");
    };

    let mut db = Db::open(&args.db)?;
    db.init()?;
    let client = PriceClient::new(&config.source_base_url, token)?;
    let today = Utc::now().date_naive();

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::with_template("{spinner} {msg}").expect("valid template"));
    spinner.set_message("running analytics...");
    spinner.enable_steady_tick(Duration::from_millis(100));

    let summary = run_analytics(&mut db, &client, &config, today).await?;
    spinner.finish_and_clear();

    print_run_summary(&summary, format)
}
