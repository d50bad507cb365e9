//! Error types for cliutils.

use thiserror::Error;

/// Errors from setting up a command-line program.
#[derive(Debug, Error)]
pub enum CliError {
    /// The log filter in the environment could not be parsed.
    #[error("invalid log filter in {var}: {source}")]
    LogFilter {
        /// The variable that held the filter.
        var: &'static str,
        /// The parse failure.
        #[source]
        source: tracing_subscriber::filter::FromEnvError,
    },
}

/// Result type for cliutils operations.
pub type Result<T> = std::result::Result<T, CliError>;
