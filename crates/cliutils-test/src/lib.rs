//! cliutils-test: drive command-line programs from tests
//!
//! Two ways to run a program under test:
//!
//! - [`run_command`] runs it to completion with captured stdout/stderr, an
//!   optional stdin payload, and a timeout.
//! - [`run_interactive_command`] starts it on a pseudo-terminal and returns
//!   an [`InteractiveSession`] for sending keys and waiting on output.
//!
//! [`CliRunner`] wraps both with assertion helpers. A missing executable is
//! reported as [`HarnessError::CommandNotFound`], which tests treat as a skip.
//!
//! Unix only.
//!
//! # Example
//!
//! ```ignore
//! use cliutils_test::{CliRunner, Exchange, InteractiveScript, keys::*};
//!
//! let runner = CliRunner::new();
//! let script = InteractiveScript::new()
//!     .stdout(["> Item A", "Item B", "Item C"])
//!     .exchanges([
//!         Exchange::new(KEY_DOWN, ""),
//!         Exchange::new(KEY_DOWN, ""),
//!         Exchange::new(KEY_ENTER, ["You selected", "Item C"]),
//!     ])
//!     .terminate(false)
//!     .exit_code(0);
//! runner.test_interactive("test-menu", "", &script);
//! ```

pub mod assertions;
pub mod cmdline;
pub mod config;
pub mod error;
pub mod keys;
pub mod patterns;
pub mod run;
pub mod runner;
pub mod session;

pub use assertions::OutputAssertions;
pub use cliutils_pty::ExitStatus;
pub use cmdline::CommandLine;
pub use config::{EnvConfig, HarnessConfig};
pub use error::{HarnessError, Result};
pub use patterns::{Exchange, Exchanges, Patterns};
pub use run::{RunOptions, RunResult, run_command};
pub use runner::{CliRunner, Expected, InteractiveScript};
pub use session::{ExpectOutcome, InteractiveSession, run_interactive_command};

use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter for tests.
pub const LOG_ENV: &str = "CLIUTILS_LOG";

/// Route `tracing` output through the test harness's captured writer.
///
/// The filter comes from `CLIUTILS_LOG` and defaults to `debug`. Calling
/// this more than once is harmless.
pub fn init_test_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("debug"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .try_init();
}
