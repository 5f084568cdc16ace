//! Console and file logging for the calculator.
//!
//! Records go to stderr so they never mix with the rendered report on
//! stdout. The level filter can be changed at runtime and a log file can be
//! attached after startup.

use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard, OnceLock, PoisonError};

use chrono::Local;
use thiserror::Error;
use tracing::Subscriber;
use tracing_subscriber::filter::ParseError;
use tracing_subscriber::fmt::format::{FormatEvent, FormatFields, Writer};
use tracing_subscriber::fmt::{FmtContext, MakeWriter};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, reload};

/// Default directive when `RUST_LOG` is unset.
pub const DEFAULT_DIRECTIVE: &str = "warn,leads_ui=info,leads_core=info";

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("logging not yet initialized")]
    NotInitialized,

    #[error("invalid log level '{directive}': {source}")]
    InvalidDirective {
        directive: String,
        #[source]
        source: ParseError,
    },

    #[error("log filter reload failed: {0}")]
    Reload(#[from] reload::Error),

    #[error("cannot open log file '{}': {source}", path.display())]
    OpenFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// One record per line: timestamp, level, target, fields.
///
/// The console shows the time of day only; the log file keeps the date so
/// separate sessions appended to one file stay distinguishable.
struct LogLine {
    with_date: bool,
}

impl<S, N> FormatEvent<S, N> for LogLine
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &tracing::Event<'_>,
    ) -> std::fmt::Result {
        let meta = event.metadata();
        let pattern = if self.with_date {
            "%Y-%m-%d %H:%M:%S%.3f"
        } else {
            "%H:%M:%S%.3f"
        };

        write!(
            writer,
            "{} {:>5} {}: ",
            Local::now().format(pattern),
            meta.level(),
            meta.target()
        )?;
        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

type LogFileSlot = Arc<Mutex<Option<File>>>;

fn lock_slot(slot: &LogFileSlot) -> MutexGuard<'_, Option<File>> {
    slot.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Writer for the file layer; records are dropped while no file is attached.
#[derive(Clone)]
struct LogFile(LogFileSlot);

struct LogFileWriter<'a>(MutexGuard<'a, Option<File>>);

impl Write for LogFileWriter<'_> {
    fn write(
        &mut self,
        buf: &[u8],
    ) -> io::Result<usize> {
        self.0.as_mut().map_or(Ok(buf.len()), |file| file.write(buf))
    }

    fn flush(&mut self) -> io::Result<()> {
        self.0.as_mut().map_or(Ok(()), File::flush)
    }
}

impl<'a> MakeWriter<'a> for LogFile {
    type Writer = LogFileWriter<'a>;

    fn make_writer(&'a self) -> Self::Writer {
        LogFileWriter(lock_slot(&self.0))
    }
}

type Reloader = Box<dyn Fn(EnvFilter) -> Result<(), reload::Error> + Send + Sync>;

/// Runtime handles captured once the global subscriber is installed.
struct Controls {
    level: Reloader,
    console: Reloader,
    log_file: LogFileSlot,
}

static CONTROLS: OnceLock<Controls> = OnceLock::new();

fn controls() -> Result<&'static Controls, LoggingError> {
    CONTROLS.get().ok_or(LoggingError::NotInitialized)
}

fn parse_directive(directive: &str) -> Result<EnvFilter, LoggingError> {
    EnvFilter::try_new(directive).map_err(|source| LoggingError::InvalidDirective {
        directive: directive.to_string(),
        source,
    })
}

/// Changes the active log filter at runtime.
///
/// Accepts a bare level ("error", "warn", "info", "debug", "trace") or any
/// full `EnvFilter` directive.
pub fn set_log_level(directive: &str) -> Result<(), LoggingError> {
    let controls = controls()?;
    let filter = parse_directive(directive)?;
    (controls.level)(filter)?;
    Ok(())
}

/// Shows or hides console log output without affecting file logging.
pub fn set_console_enabled(enabled: bool) -> Result<(), LoggingError> {
    // The level filter remains the ceiling; this only gates stderr.
    let gate = if enabled { "trace" } else { "off" };
    (controls()?.console)(EnvFilter::new(gate))?;
    Ok(())
}

/// Starts appending log output to `path`, replacing any open log file.
/// The directory must already exist.
pub fn enable_file_logging(path: &Path) -> Result<(), LoggingError> {
    let controls = controls()?;
    let file = File::options()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|source| LoggingError::OpenFile {
            path: path.to_path_buf(),
            source,
        })?;

    *lock_slot(&controls.log_file) = Some(file);
    Ok(())
}

/// Installs the global subscriber. Call once at startup; later calls are
/// no-ops.
///
/// - Console: stderr, plain text.
/// - File: inactive until [`enable_file_logging`] is called.
/// - Level: [`DEFAULT_DIRECTIVE`], or `RUST_LOG` when set.
pub fn init_logging() {
    let log_file: LogFileSlot = Arc::new(Mutex::new(None));
    let initial = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE));

    let (level_filter, level_handle) = reload::Layer::new(initial);
    let (console_gate, console_handle) = reload::Layer::new(EnvFilter::new("trace"));

    let console_layer = tracing_subscriber::fmt::layer()
        .event_format(LogLine { with_date: false })
        .with_ansi(false)
        .with_writer(io::stderr)
        .with_filter(console_gate);

    let file_layer = tracing_subscriber::fmt::layer()
        .event_format(LogLine { with_date: true })
        .with_ansi(false)
        .with_writer(LogFile(Arc::clone(&log_file)));

    let installed = tracing_subscriber::registry()
        .with(level_filter)
        .with(console_layer)
        .with(file_layer)
        .try_init()
        .is_ok();

    if installed {
        let _ = CONTROLS.set(Controls {
            level: Box::new(move |filter| level_handle.reload(filter)),
            console: Box::new(move |filter| console_handle.reload(filter)),
            log_file,
        });
    }
}
