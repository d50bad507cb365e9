//! The master side of a terminal pair.

use std::ffi::OsString;
use std::io::{self, Read, Write};
use std::os::unix::ffi::OsStringExt;
use std::os::unix::io::{AsFd, AsRawFd, BorrowedFd, OwnedFd, RawFd};
use std::path::{Path, PathBuf};
use std::time::Duration;

use rustix::io::{FdFlags, fcntl_setfd};
use rustix::pty::{OpenptFlags, grantpt, openpt, ptsname, unlockpt};
use rustix::termios::{Winsize, tcgetwinsize, tcsetwinsize};

use crate::config::WindowSize;
use crate::error::{PtyError, Result};

fn create_error(errno: rustix::io::Errno) -> PtyError {
    PtyError::Create(errno.into())
}

/// Unix PTY master implementation.
///
/// Owns the master descriptor. Reading yields the child's interleaved
/// stdout/stderr as processed by the terminal line discipline; writing
/// feeds the child's stdin. The descriptor is closed exactly once, either
/// by [`UnixPtyMaster::close`] or on drop.
pub struct UnixPtyMaster {
    fd: OwnedFd,
}

impl std::fmt::Debug for UnixPtyMaster {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UnixPtyMaster")
            .field("fd", &self.fd.as_raw_fd())
            .finish()
    }
}

impl UnixPtyMaster {
    /// Open a new PTY master.
    ///
    /// Returns the master and the filesystem path of its slave.
    ///
    /// # Errors
    ///
    /// Returns an error if PTY allocation fails.
    pub fn open() -> Result<(Self, PathBuf)> {
        let fd = openpt(OpenptFlags::RDWR | OpenptFlags::NOCTTY).map_err(create_error)?;

        // Children must never inherit the master.
        fcntl_setfd(&fd, FdFlags::CLOEXEC).map_err(create_error)?;

        grantpt(&fd).map_err(create_error)?;
        unlockpt(&fd).map_err(create_error)?;

        let slave_name = ptsname(&fd, Vec::new()).map_err(create_error)?;
        let slave_path = PathBuf::from(OsString::from_vec(slave_name.into_bytes()));

        tracing::trace!(fd = fd.as_raw_fd(), slave = %slave_path.display(), "opened PTY master");

        Ok((Self { fd }, slave_path))
    }

    /// Set the window size.
    pub fn set_window_size(&self, size: WindowSize) -> Result<()> {
        let winsize = Winsize {
            ws_col: size.cols,
            ws_row: size.rows,
            ws_xpixel: 0,
            ws_ypixel: 0,
        };

        tcsetwinsize(&self.fd, winsize).map_err(|e| PtyError::Resize(e.into()))
    }

    /// Get the current window size.
    pub fn window_size(&self) -> Result<WindowSize> {
        let winsize = tcgetwinsize(&self.fd)?;
        Ok(WindowSize::new(winsize.ws_col, winsize.ws_row))
    }

    /// Wait up to `timeout` for the master to become readable.
    ///
    /// Returns `Ok(true)` when a read will not block. A hung-up slave also
    /// counts as readable; the following read then reports the error.
    /// An interrupted wait returns `Ok(false)`.
    pub fn wait_readable(&self, timeout: Duration) -> Result<bool> {
        let mut pfd = libc::pollfd {
            fd: self.fd.as_raw_fd(),
            events: libc::POLLIN,
            revents: 0,
        };
        let millis = timeout.as_millis().min(i32::MAX as u128) as libc::c_int;

        // SAFETY: `pfd` is a valid, exclusively borrowed pollfd and nfds is 1.
        #[allow(unsafe_code)]
        let rc = unsafe { libc::poll(&raw mut pfd, 1, millis) };

        if rc < 0 {
            let err = io::Error::last_os_error();
            if err.kind() == io::ErrorKind::Interrupted {
                return Ok(false);
            }
            return Err(PtyError::Io(err));
        }

        Ok(rc > 0)
    }

    /// Close the PTY master, consuming it.
    pub fn close(self) {
        tracing::trace!(fd = self.fd.as_raw_fd(), "closing PTY master");
        drop(self.fd);
    }
}

impl AsFd for UnixPtyMaster {
    fn as_fd(&self) -> BorrowedFd<'_> {
        self.fd.as_fd()
    }
}

impl AsRawFd for UnixPtyMaster {
    fn as_raw_fd(&self) -> RawFd {
        self.fd.as_raw_fd()
    }
}

impl Read for UnixPtyMaster {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        rustix::io::read(&self.fd, buf).map_err(io::Error::from)
    }
}

impl Write for UnixPtyMaster {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        rustix::io::write(&self.fd, buf).map_err(io::Error::from)
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Open the slave side of a PTY.
///
/// The descriptor is close-on-exec; the spawn code duplicates it onto the
/// child's standard streams.
pub fn open_slave(path: &Path) -> Result<OwnedFd> {
    use rustix::fs::{Mode, OFlags, open};

    open(path, OFlags::RDWR | OFlags::NOCTTY | OFlags::CLOEXEC, Mode::empty()).map_err(create_error)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_pty() {
        let (master, slave_path) = UnixPtyMaster::open().unwrap();
        assert!(master.as_raw_fd() >= 0);
        let path = slave_path.to_string_lossy();
        assert!(path.starts_with("/dev/pts/") || path.starts_with("/dev/tty") || path.starts_with("/dev/pty"));
    }

    #[test]
    fn window_size_operations() {
        let (master, _) = UnixPtyMaster::open().unwrap();

        let size = WindowSize::new(120, 40);
        master.set_window_size(size).unwrap();

        let retrieved = master.window_size().unwrap();
        assert_eq!(retrieved, size);
    }

    #[test]
    fn idle_master_is_not_readable() {
        let (master, slave_path) = UnixPtyMaster::open().unwrap();
        let _slave = open_slave(&slave_path).unwrap();
        assert!(!master.wait_readable(Duration::from_millis(20)).unwrap());
    }

    #[test]
    fn slave_writes_become_readable() {
        let (mut master, slave_path) = UnixPtyMaster::open().unwrap();
        let slave = open_slave(&slave_path).unwrap();
        rustix::io::write(&slave, b"ping").unwrap();

        assert!(master.wait_readable(Duration::from_secs(1)).unwrap());
        let mut buf = [0u8; 16];
        let n = master.read(&mut buf).unwrap();
        assert_eq!(&buf[..n], b"ping");
    }
}
