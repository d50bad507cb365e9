//! Error types for cliutils-test.
//!
//! A missing executable is a *skip* condition for the test that asked for
//! it; everything else is a failure. [`HarnessError::is_skip`] tells the two
//! apart.

use std::time::Duration;

use cliutils_pty::PtyError;
use thiserror::Error;

/// The error type for harness operations.
#[derive(Debug, Error)]
pub enum HarnessError {
    /// The program to run does not exist.
    #[error("command not found: {command}")]
    CommandNotFound {
        /// The program name that was looked up.
        command: String,
    },

    /// A non-interactive run did not finish in time.
    #[error("timed out after {}s: {command}", timeout.as_secs_f64())]
    Timeout {
        /// The timeout that elapsed.
        timeout: Duration,
        /// The full command line.
        command: String,
    },

    /// The command line had no tokens.
    #[error("empty command line")]
    EmptyCommand,

    /// An I/O error occurred with additional context.
    #[error("{context}: {source}")]
    IoWithContext {
        /// What operation was being performed.
        context: String,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// An error from the PTY layer.
    #[error(transparent)]
    Pty(PtyError),
}

impl HarnessError {
    /// Create an I/O error with context.
    pub fn io_context(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::IoWithContext {
            context: context.into(),
            source,
        }
    }

    /// Whether the calling test should be skipped rather than failed.
    #[must_use]
    pub const fn is_skip(&self) -> bool {
        matches!(self, Self::CommandNotFound { .. })
    }

    /// Map a spawn failure for `program` into a harness error.
    pub(crate) fn from_spawn(program: &str, source: std::io::Error) -> Self {
        if source.kind() == std::io::ErrorKind::NotFound {
            Self::CommandNotFound {
                command: program.to_string(),
            }
        } else {
            Self::io_context(format!("spawning {program}"), source)
        }
    }

    /// Map a PTY spawn failure for `program` into a harness error.
    pub(crate) fn from_pty(program: &str, source: PtyError) -> Self {
        if source.is_not_found() {
            Self::CommandNotFound {
                command: program.to_string(),
            }
        } else {
            Self::Pty(source)
        }
    }
}

impl From<PtyError> for HarnessError {
    fn from(err: PtyError) -> Self {
        Self::Pty(err)
    }
}

/// Result type for harness operations.
pub type Result<T> = std::result::Result<T, HarnessError>;
