//! cliutils: common options and logging for clap programs
//!
//! Every program in this workspace gets the same `--version/-V`,
//! `--debug/-d`, and `--help/-h` options from [`CommonOpts`], and sets up
//! its logger with [`logging::init`], passing the parsed debug flag.
//!
//! # Example
//!
//! ```no_run
//! use clap::Command;
//! use cliutils::{CommonOpts, is_debug, logging};
//!
//! let matches = CommonOpts::new("0.0.1").apply(Command::new("hello")).get_matches();
//! logging::init(is_debug(&matches))?;
//! tracing::debug!("starting");
//! println!("Hello, world!");
//! # Ok::<(), cliutils::CliError>(())
//! ```

pub mod common_opts;
pub mod error;
pub mod logging;
pub mod version;

pub use common_opts::{CommonOpts, is_debug};
pub use error::{CliError, Result};
pub use logging::LogLevel;
pub use version::{PACKAGE, VERSION};
