//! Logging configuration using tracing
//!
//! [`init`] installs a subscriber that writes one line per event to stderr:
//!
//! ```text
//! 12:34:56 DEBUG archive_file:52> stat = "done", dstdir = archives/
//! ```
//!
//! The level is INFO, or DEBUG when the program's debug flag is set.
//! `CLIUTILS_LOG` replaces the level with any `EnvFilter` directive.
//!
//! # Examples
//! ```bash
//! CLIUTILS_LOG=trace sample1-simple
//! CLIUTILS_LOG=archive_file=debug archive-file notes.txt
//! ```
//!
//! Loggers are named by target: the module path by default, or an explicit
//! `target:` on the macro.

use std::fmt::{self, Write as _};

use tracing::{Event, Level, Subscriber};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::time::{ChronoLocal, FormatTime};
use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields};
use tracing_subscriber::registry::LookupSpan;

use crate::error::{CliError, Result};

/// Environment variable that overrides the log level.
pub const LOG_ENV: &str = "CLIUTILS_LOG";

/// Timestamp format of each line.
const TIME_FORMAT: &str = "%H:%M:%S";

/// The level a program asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// A debug flag: `true` is DEBUG, `false` is INFO.
    Debug(bool),
    /// An explicit level.
    Level(Level),
}

impl LogLevel {
    /// The effective level.
    #[must_use]
    pub const fn level(self) -> Level {
        match self {
            Self::Debug(true) => Level::DEBUG,
            Self::Debug(false) => Level::INFO,
            Self::Level(level) => level,
        }
    }
}

impl From<bool> for LogLevel {
    fn from(debug: bool) -> Self {
        Self::Debug(debug)
    }
}

impl From<Level> for LogLevel {
    fn from(level: Level) -> Self {
        Self::Level(level)
    }
}

/// Install the stderr logger.
///
/// Returns `Ok(false)` if a global subscriber was already installed; the
/// existing one stays in place.
///
/// # Errors
///
/// Returns [`CliError::LogFilter`] if `CLIUTILS_LOG` holds an invalid
/// directive.
pub fn init(debug: impl Into<LogLevel>) -> Result<bool> {
    let level = debug.into().level();

    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::from_level(level).into())
        .with_env_var(LOG_ENV)
        .from_env()
        .map_err(|source| CliError::LogFilter { var: LOG_ENV, source })?;

    let installed = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .event_format(LineFormat::default())
        .try_init()
        .is_ok();

    Ok(installed)
}

/// `HH:MM:SS LEVEL target:line> message`
#[derive(Debug, Clone)]
pub struct LineFormat {
    timer: ChronoLocal,
}

impl Default for LineFormat {
    fn default() -> Self {
        Self {
            timer: ChronoLocal::new(TIME_FORMAT.to_string()),
        }
    }
}

impl<S, N> FormatEvent<S, N> for LineFormat
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(&self, ctx: &FmtContext<'_, S, N>, mut writer: Writer<'_>, event: &Event<'_>) -> fmt::Result {
        let meta = event.metadata();

        self.timer.format_time(&mut writer)?;
        write!(writer, " {} {}", meta.level(), meta.target())?;
        if let Some(line) = meta.line() {
            write!(writer, ":{line}")?;
        }
        writer.write_str("> ")?;

        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}
