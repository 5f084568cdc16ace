use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{debug, info};

use leads_core::Coverage;
use leads_ui::{AppConfig, app, logging};

// ─── CLI definition ──────────────────────────────────────────────────────────

/// Lead funnel calculator.
///
/// Forecasts the monthly leads for a keyword and estimates the funnel and the
/// value generated at a given coverage. Without `--keyword` the calculator
/// runs interactively on stdin.
#[derive(Debug, Parser)]
#[command(name = "leads-calculator", version, about)]
struct Cli {
    /// Lead keyword to forecast (runs once and prints the report).
    #[arg(long, requires_all = ["hourly_rate", "project_value"])]
    keyword: Option<String>,

    /// Your hourly rate in dollars.
    #[arg(long)]
    hourly_rate: Option<String>,

    /// Average client project value in dollars.
    #[arg(long)]
    project_value: Option<String>,

    /// Coverage percentage, 0 to 100.
    #[arg(long, value_parser = clap::value_parser!(u8).range(0..=100))]
    coverage: Option<u8>,

    /// Seed for the lead volume simulator, for reproducible output.
    #[arg(long)]
    seed: Option<u64>,

    /// TOML configuration file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Log filter directive, overriding the config file (e.g. `debug`).
    #[arg(long)]
    log_level: Option<String>,

    /// Also append log records to this file.
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Suppress log output on the console.
    #[arg(long, short)]
    quiet: bool,
}

// ─── entry point ─────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    logging::init_logging();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => AppConfig::load(path)?,
        None => AppConfig::default(),
    };

    if let Some(level) = cli.log_level.as_deref().or(config.logging.level.as_deref()) {
        logging::set_log_level(level)?;
    }
    if let Some(path) = cli.log_file.as_ref().or(config.logging.file.as_ref()) {
        logging::enable_file_logging(path)?;
    }
    if cli.quiet {
        logging::set_console_enabled(false)?;
    }
    debug!(?cli, "starting");

    let coverage = cli
        .coverage
        .map(Coverage::new)
        .transpose()
        .context("Invalid coverage")?;
    let mut session = app::build_session(&config, coverage, cli.seed)?;

    match cli.keyword.as_deref() {
        Some(keyword) => {
            let report = app::run_once(
                &mut session,
                &config.pricing,
                keyword,
                cli.hourly_rate.as_deref().unwrap_or_default(),
                cli.project_value.as_deref().unwrap_or_default(),
            )?;
            print!("{report}");
        }
        None => {
            let stdin = io::stdin();
            app::run_interactive(&mut session, &config.pricing, stdin.lock(), io::stdout())?;
        }
    }

    info!("done");
    Ok(())
}
