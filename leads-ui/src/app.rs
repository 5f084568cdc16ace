//! Front ends driving a [`CalculatorSession`]: a one-shot run for scripted use
//! and a line-oriented interactive loop.

use std::cell::RefCell;
use std::io::{BufRead, Write};
use std::rc::Rc;

use anyhow::{Context, Result, bail};
use leads_core::format::format_count;
use leads_core::{
    CalculatorResult, Coverage, FunnelCalculator, LeadVolumeSource, PricingConfig,
    RandomLeadVolume,
};
use tracing::{debug, info, warn};

use crate::config::AppConfig;
use crate::logging;
use crate::report::{Report, render_report};
use crate::state::{CalculatorSession, SessionUpdate};

const HELP: &str = "\
Commands:
  keyword <text>              submit a lead keyword and open the rates dialog
  rates <hourly> <project>    enter hourly rate and average project value
  cancel                      close the rates dialog
  coverage <0-100>            move the coverage slider
  show                        print the calculator
  log <level>                 change the log filter (e.g. debug, info)
  help                        show this help
  quit                        exit";

const RATES_PROMPT: &str = "Enter your rates: rates <hourly rate> <average project value>";

/// Builds a session from configuration.
///
/// `coverage` overrides the configured default; `seed` makes the simulated
/// lead volumes reproducible.
pub fn build_session(
    config: &AppConfig,
    coverage: Option<Coverage>,
    seed: Option<u64>,
) -> Result<CalculatorSession> {
    let calculator =
        FunnelCalculator::new(config.funnel.clone()).context("Invalid funnel configuration")?;

    let lead_source: Box<dyn LeadVolumeSource> = match seed {
        Some(seed) => {
            debug!(seed, "using seeded lead volume simulator");
            Box::new(RandomLeadVolume::seeded(seed))
        }
        None => Box::new(RandomLeadVolume::new()),
    };

    let coverage = coverage.unwrap_or(config.session.default_coverage);
    Ok(CalculatorSession::new(calculator, lead_source, coverage))
}

/// Runs the whole flow once and returns the rendered report.
pub fn run_once(
    session: &mut CalculatorSession,
    pricing: &PricingConfig,
    keyword: &str,
    hourly_rate: &str,
    average_project_price: &str,
) -> Result<String> {
    if !matches!(
        session.submit_keyword(keyword),
        SessionUpdate::ModalOpened { .. }
    ) {
        bail!("a non-empty keyword is required");
    }

    match session.confirm_rates(hourly_rate, average_project_price) {
        SessionUpdate::Computed(_) => Ok(render_report(session, pricing)),
        _ => bail!(
            "hourly rate '{hourly_rate}' and project value '{average_project_price}' must both be positive numbers"
        ),
    }
}

/// A parsed line of interactive input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Keyword(String),
    Rates {
        hourly_rate: String,
        average_project_price: String,
    },
    Cancel,
    Coverage(String),
    Show,
    Log(String),
    Help,
    Quit,
    Unknown(String),
}

impl Command {
    pub fn parse(line: &str) -> Option<Self> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }

        let (verb, rest) = line
            .split_once(char::is_whitespace)
            .map(|(verb, rest)| (verb, rest.trim()))
            .unwrap_or((line, ""));

        let command = match verb.to_ascii_lowercase().as_str() {
            "keyword" | "search" => Self::Keyword(rest.to_string()),
            "rates" => {
                let mut parts = rest.split_whitespace();
                Self::Rates {
                    hourly_rate: parts.next().unwrap_or_default().to_string(),
                    average_project_price: parts.next().unwrap_or_default().to_string(),
                }
            }
            "cancel" => Self::Cancel,
            "coverage" => Self::Coverage(rest.to_string()),
            "show" => Self::Show,
            "log" => Self::Log(rest.to_string()),
            "help" | "?" => Self::Help,
            "quit" | "exit" => Self::Quit,
            _ => Self::Unknown(verb.to_string()),
        };
        Some(command)
    }
}

fn parse_coverage(text: &str) -> Option<Coverage> {
    text.trim_end_matches('%')
        .parse::<u8>()
        .ok()
        .and_then(|pct| Coverage::new(pct).ok())
}

/// Reads commands from `input` until `quit` or end of input.
///
/// Every recalculation published by the session is rendered to `output`.
pub fn run_interactive<R: BufRead, W: Write>(
    session: &mut CalculatorSession,
    pricing: &PricingConfig,
    input: R,
    mut output: W,
) -> Result<()> {
    let fresh: Rc<RefCell<Option<CalculatorResult>>> = Rc::new(RefCell::new(None));
    let sink = Rc::clone(&fresh);
    session.subscribe(move |result| {
        *sink.borrow_mut() = Some(result.clone());
    });

    info!("interactive calculator started");
    writeln!(output, "{HELP}")?;

    for line in input.lines() {
        let line = line.context("Failed to read input")?;
        let Some(command) = Command::parse(&line) else {
            continue;
        };

        match command {
            Command::Keyword(keyword) => {
                if let SessionUpdate::ModalOpened { total_jobs } = session.submit_keyword(&keyword)
                {
                    writeln!(
                        output,
                        "Monthly Forecast: {} leads",
                        format_count(u64::from(total_jobs))
                    )?;
                    writeln!(output, "{RATES_PROMPT}")?;
                }
            }
            Command::Rates {
                hourly_rate,
                average_project_price,
            } => match session.confirm_rates(&hourly_rate, &average_project_price) {
                SessionUpdate::RatesRejected => writeln!(output, "{RATES_PROMPT}")?,
                SessionUpdate::Ignored => {
                    writeln!(output, "Submit a keyword first: keyword <text>")?
                }
                _ => {}
            },
            Command::Cancel => {
                if session.cancel_modal() == SessionUpdate::ModalClosed {
                    writeln!(output, "Rates dialog closed.")?;
                }
            }
            Command::Coverage(text) => match parse_coverage(&text) {
                Some(coverage) => {
                    if let SessionUpdate::CoverageStored(coverage) = session.set_coverage(coverage)
                    {
                        writeln!(output, "Coverage: {coverage}")?;
                    }
                }
                None => writeln!(
                    output,
                    "Coverage must be a whole number between 0 and 100."
                )?,
            },
            Command::Show => write!(output, "{}", Report::new(session, pricing))?,
            Command::Log(directive) => match logging::set_log_level(&directive) {
                Ok(()) => writeln!(output, "Log level set to '{directive}'.")?,
                Err(error) => {
                    warn!(%error, "log level change failed");
                    writeln!(output, "Could not change log level: {error}")?;
                }
            },
            Command::Help => writeln!(output, "{HELP}")?,
            Command::Quit => break,
            Command::Unknown(verb) => {
                writeln!(output, "Unknown command '{verb}'. Type `help` for the list.")?
            }
        }

        if fresh.borrow_mut().take().is_some() {
            write!(output, "{}", Report::new(session, pricing))?;
        }
        output.flush()?;
    }

    info!("interactive calculator finished");
    Ok(())
}
