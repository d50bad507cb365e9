//! Terminal allocation and child startup on Unix.

mod child;
mod pty;

use std::ffi::OsStr;

pub use child::UnixPtyChild;
pub use pty::UnixPtyMaster;

use crate::config::PtyConfig;
use crate::error::Result;

/// Entry point for starting programs on a fresh terminal.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnixPtySystem;

impl UnixPtySystem {
    /// Allocate a terminal and start `program` on it.
    ///
    /// Only the master stays open in this process. Every slave descriptor
    /// is closed before this returns, so the master reads EOF/EIO once the
    /// child and its descendants let go of the terminal.
    pub fn spawn<S, I>(program: S, args: I, config: &PtyConfig) -> Result<(UnixPtyMaster, UnixPtyChild)>
    where
        S: AsRef<OsStr>,
        I: IntoIterator,
        I::Item: AsRef<OsStr>,
    {
        let (master, slave_path) = UnixPtyMaster::open()?;
        master.set_window_size(config.window)?;

        let slave = pty::open_slave(&slave_path)?;
        let child = child::spawn_child(slave, program, args, config)?;

        Ok((master, child))
    }
}
