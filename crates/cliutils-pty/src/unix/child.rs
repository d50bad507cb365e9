//! The child process running on the slave side.

use std::ffi::OsStr;
use std::io;
use std::os::unix::io::OwnedFd;
use std::os::unix::process::CommandExt;
use std::process::{Child, Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use rustix::io::Errno;
use rustix::process::{Pid, Signal, kill_process, kill_process_group};

use crate::config::{PtyConfig, SessionMode};
use crate::error::{PtyError, Result};
use crate::signal::PtySignal;
use crate::status::ExitStatus;

/// Interval between `try_wait` checks in [`UnixPtyChild::wait_timeout`].
const WAIT_POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Handle to a PTY child.
///
/// A child started with its own session leads a process group, and
/// [`UnixPtyChild::signal`] then targets the whole group.
pub struct UnixPtyChild {
    child: Child,
    pid: u32,
    group: bool,
    /// Set once reaped.
    exit_status: Option<ExitStatus>,
}

impl std::fmt::Debug for UnixPtyChild {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UnixPtyChild")
            .field("pid", &self.pid)
            .field("group", &self.group)
            .field("exit_status", &self.exit_status)
            .finish()
    }
}

impl UnixPtyChild {
    #[must_use]
    fn new(child: Child, group: bool) -> Self {
        let pid = child.id();
        Self {
            child,
            pid,
            group,
            exit_status: None,
        }
    }

    /// Process ID.
    #[must_use]
    pub const fn pid(&self) -> u32 {
        self.pid
    }

    /// Whether the child has not been reaped yet.
    #[must_use]
    pub const fn is_running(&self) -> bool {
        self.exit_status.is_none()
    }

    /// The exit status, if the child has been reaped.
    #[must_use]
    pub const fn exit_status(&self) -> Option<ExitStatus> {
        self.exit_status
    }

    /// Block until the child exits.
    pub fn wait(&mut self) -> Result<ExitStatus> {
        if let Some(status) = self.exit_status {
            return Ok(status);
        }

        let status = ExitStatus::from(self.child.wait().map_err(PtyError::Wait)?);
        self.exit_status = Some(status);
        tracing::debug!(pid = self.pid, %status, "child reaped");
        Ok(status)
    }

    /// Try to get the exit status without blocking.
    pub fn try_wait(&mut self) -> Result<Option<ExitStatus>> {
        if let Some(status) = self.exit_status {
            return Ok(Some(status));
        }

        match self.child.try_wait().map_err(PtyError::Wait)? {
            Some(status) => {
                let status = ExitStatus::from(status);
                self.exit_status = Some(status);
                tracing::debug!(pid = self.pid, %status, "child reaped");
                Ok(Some(status))
            }
            None => Ok(None),
        }
    }

    /// Wait up to `timeout` for the child to exit.
    ///
    /// Returns `Ok(None)` if the child is still running at the deadline.
    pub fn wait_timeout(&mut self, timeout: Duration) -> Result<Option<ExitStatus>> {
        let deadline = Instant::now() + timeout;
        loop {
            if let Some(status) = self.try_wait()? {
                return Ok(Some(status));
            }
            let now = Instant::now();
            if now >= deadline {
                return Ok(None);
            }
            thread::sleep(WAIT_POLL_INTERVAL.min(deadline - now));
        }
    }

    /// Send `signal` to the child, or to its whole group when it leads one.
    ///
    /// A reaped child, or a group with no members left, makes this a no-op.
    pub fn signal(&self, signal: PtySignal) -> Result<()> {
        if !self.is_running() {
            return Ok(());
        }
        self.deliver(signal, self.group)
    }

    /// SIGKILL whatever is left of the child's process group.
    ///
    /// Unlike [`UnixPtyChild::signal`] this also works after the leader has
    /// been reaped: members that ignored SIGTERM or SIGHUP outlive it.
    /// Does nothing for a child without its own group.
    pub fn kill_group(&self) -> Result<()> {
        if !self.group {
            return Ok(());
        }
        self.deliver(PtySignal::Kill, true)
    }

    fn deliver(&self, signal: PtySignal, group: bool) -> Result<()> {
        let invalid = |what: &str| PtyError::Signal {
            signal,
            source: io::Error::new(io::ErrorKind::InvalidInput, format!("invalid {what}")),
        };
        let pid = Pid::from_raw(self.pid as i32).ok_or_else(|| invalid("pid"))?;
        let sig = Signal::from_named_raw(signal.number()).ok_or_else(|| invalid("signal"))?;

        tracing::debug!(pid = self.pid, %signal, group, "sending signal");

        let sent = if group {
            kill_process_group(pid, sig)
        } else {
            kill_process(pid, sig)
        };

        match sent {
            Ok(()) | Err(Errno::SRCH) => Ok(()),
            Err(e) => Err(PtyError::Signal {
                signal,
                source: e.into(),
            }),
        }
    }

    /// SIGKILL.
    pub fn kill(&self) -> Result<()> {
        self.signal(PtySignal::Kill)
    }
}

/// Start `program` with the slave as its stdin, stdout, and stderr.
///
/// Consumes `slave`; no copy of it is left open in this process.
pub fn spawn_child<S, I>(slave: OwnedFd, program: S, args: I, config: &PtyConfig) -> Result<UnixPtyChild>
where
    S: AsRef<OsStr>,
    I: IntoIterator,
    I::Item: AsRef<OsStr>,
{
    let program = program.as_ref();
    let spawn_error = |e| PtyError::spawn(program.to_string_lossy(), e);

    let stdin = slave.try_clone().map_err(spawn_error)?;
    let stdout = slave.try_clone().map_err(spawn_error)?;

    let mut cmd = Command::new(program);
    cmd.args(args)
        .env_clear()
        .envs(config.child_env())
        .stdin(Stdio::from(stdin))
        .stdout(Stdio::from(stdout))
        .stderr(Stdio::from(slave));

    if let Some(ref dir) = config.cwd {
        cmd.current_dir(dir);
    }

    if config.session.leads_group() {
        let controlling_terminal = config.session == SessionMode::ControllingTerminal;
        // SAFETY: only async-signal-safe calls. The slave is already on
        // fds 0-2 when this runs.
        #[allow(unsafe_code)]
        unsafe {
            cmd.pre_exec(move || {
                if libc::setsid() == -1 {
                    return Err(io::Error::last_os_error());
                }
                if controlling_terminal && libc::ioctl(libc::STDIN_FILENO, libc::TIOCSCTTY, 0) == -1 {
                    return Err(io::Error::last_os_error());
                }
                Ok(())
            });
        }
    }

    let child = cmd.spawn().map_err(spawn_error)?;

    // The command still holds the parent's slave copies.
    drop(cmd);

    tracing::debug!(pid = child.id(), ?program, session = ?config.session, "spawned PTY child");

    Ok(UnixPtyChild::new(child, config.session.leads_group()))
}
