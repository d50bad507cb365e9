//! cliutils-pty: blocking pseudo-terminals for CLI tests
//!
//! [`UnixPtySystem::spawn`] allocates a terminal pair, starts a program on
//! the slave side, and returns the master together with a child handle.
//! Nothing here is async. [`UnixPtyMaster::wait_readable`] bounds each wait
//! so callers can enforce their own deadlines.
//!
//! ```ignore
//! use std::io::{Read, Write};
//! use std::time::Duration;
//! use cliutils_pty::{PtyConfig, PtySignal, UnixPtySystem};
//!
//! let (mut master, mut child) = UnixPtySystem::spawn("cat", [] as [&str; 0], &PtyConfig::new())?;
//! master.write_all(b"hello\n")?;
//! if master.wait_readable(Duration::from_millis(100))? {
//!     let mut buf = [0u8; 1024];
//!     let n = master.read(&mut buf)?;
//!     print!("{}", String::from_utf8_lossy(&buf[..n]));
//! }
//! child.signal(PtySignal::Terminate)?;
//! child.wait()?;
//! ```
//!
//! Unix only.

#![cfg(unix)]

pub mod config;
pub mod error;
pub mod signal;
pub mod status;
mod unix;

pub use config::{PtyConfig, SessionMode, WindowSize};
pub use error::{PtyError, Result};
pub use signal::PtySignal;
pub use status::ExitStatus;
pub use unix::{UnixPtyChild, UnixPtyMaster, UnixPtySystem};
