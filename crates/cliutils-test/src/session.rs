//! Interactive sessions on a pseudo-terminal.
//!
//! An [`InteractiveSession`] owns one child process attached to a PTY. Tests
//! alternate between [`InteractiveSession::expect`] and
//! [`InteractiveSession::send_key`], then consume the session with
//! [`InteractiveSession::close`].
//!
//! # Example
//!
//! ```ignore
//! use cliutils_test::keys::{KEY_DOWN, KEY_ENTER};
//! use cliutils_test::run_interactive_command;
//!
//! let mut session = run_interactive_command("test-menu", "")?;
//! assert!(session.expect("> Item A"));
//! session.send_key(KEY_DOWN)?;
//! assert!(session.expect("> Item B"));
//! session.send_key(KEY_ENTER)?;
//! assert!(session.expect(["You selected", "Item B"]));
//! let status = session.close_with(false, std::time::Duration::from_secs(3))?;
//! assert_eq!(status.returncode(), 0);
//! ```

use std::io::{ErrorKind, Read, Write};
use std::thread;
use std::time::{Duration, Instant};

use cliutils_pty::{ExitStatus, PtyConfig, PtySignal, UnixPtyChild, UnixPtyMaster, UnixPtySystem};

use crate::cmdline::CommandLine;
use crate::config::{HarnessConfig, READ_CHUNK, STEP_PAUSE};
use crate::error::{HarnessError, Result};
use crate::patterns::{Exchanges, Patterns};

/// How an [`InteractiveSession::expect_outcome`] call ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpectOutcome {
    /// Every pattern was seen.
    Matched,
    /// The deadline passed first.
    Timeout,
    /// The terminal reported end of output (the child closed its side).
    Closed,
}

/// A live child process under test, attached to a PTY.
pub struct InteractiveSession {
    master: UnixPtyMaster,
    child: UnixPtyChild,
    command: CommandLine,
    config: HarnessConfig,
    /// Raw bytes read since the current `expect` began.
    raw: Vec<u8>,
    /// Lossy UTF-8 view of `raw`.
    output: String,
}

impl std::fmt::Debug for InteractiveSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InteractiveSession")
            .field("command", &self.command.to_string())
            .field("pid", &self.child.pid())
            .field("output_len", &self.output.len())
            .finish_non_exhaustive()
    }
}

impl InteractiveSession {
    /// Start `command` on a new PTY.
    ///
    /// The child runs in its own session with the PTY as controlling
    /// terminal; this process keeps only the master side.
    ///
    /// # Errors
    ///
    /// [`HarnessError::CommandNotFound`] if the program does not exist,
    /// [`HarnessError::EmptyCommand`] for an empty command line.
    pub fn spawn(command: impl Into<CommandLine>, config: HarnessConfig) -> Result<Self> {
        Self::spawn_with_pty(command, config, &PtyConfig::new())
    }

    /// Start `command` with explicit PTY settings (cwd, env, window size).
    pub fn spawn_with_pty(command: impl Into<CommandLine>, config: HarnessConfig, pty: &PtyConfig) -> Result<Self> {
        let command = command.into();
        let program = command.program().ok_or(HarnessError::EmptyCommand)?;

        tracing::debug!(command = %command, "spawning interactive command");

        let (master, child) =
            UnixPtySystem::spawn(program, command.args(), pty).map_err(|e| HarnessError::from_pty(program, e))?;

        Ok(Self {
            master,
            child,
            command,
            config,
            raw: Vec::new(),
            output: String::new(),
        })
    }

    /// The command line this session runs.
    #[must_use]
    pub const fn command(&self) -> &CommandLine {
        &self.command
    }

    /// The child's process ID.
    #[must_use]
    pub const fn pid(&self) -> u32 {
        self.child.pid()
    }

    /// Output captured by the most recent `expect` call.
    #[must_use]
    pub fn output(&self) -> &str {
        &self.output
    }

    /// Write the bytes of `key` to the terminal.
    ///
    /// No acknowledgement is awaited.
    pub fn send_key(&mut self, key: &str) -> Result<()> {
        tracing::debug!(key = ?key, "key input");
        self.master
            .write_all(key.as_bytes())
            .map_err(|e| HarnessError::io_context("writing to terminal", e))
    }

    /// Wait for all `patterns` with the configured default timeout.
    pub fn expect(&mut self, patterns: impl Into<Patterns>) -> bool {
        let timeout = self.config.expect_timeout;
        self.expect_within(patterns, timeout)
    }

    /// Wait up to `timeout` for all `patterns`.
    ///
    /// Returns `false` on timeout and also when the terminal closes before
    /// the patterns are seen.
    pub fn expect_within(&mut self, patterns: impl Into<Patterns>, timeout: Duration) -> bool {
        self.expect_outcome(patterns, timeout) == ExpectOutcome::Matched
    }

    /// Wait up to `timeout` for all `patterns` and report how the wait ended.
    ///
    /// The output buffer is reset first, so only output produced after this
    /// call begins can satisfy it. An empty pattern set matches immediately.
    pub fn expect_outcome(&mut self, patterns: impl Into<Patterns>, timeout: Duration) -> ExpectOutcome {
        let patterns = patterns.into();
        if patterns.is_empty() {
            return ExpectOutcome::Matched;
        }

        tracing::debug!(patterns = ?patterns.items(), ?timeout, "expect");

        self.raw.clear();
        self.output.clear();

        let deadline = Instant::now() + timeout;
        let mut buf = [0u8; READ_CHUNK];

        loop {
            let now = Instant::now();
            if now >= deadline {
                tracing::debug!(output = ?self.output, "expect timed out");
                return ExpectOutcome::Timeout;
            }

            match self.master.wait_readable(self.config.poll_interval.min(deadline - now)) {
                Ok(true) => {}
                Ok(false) => continue,
                Err(e) => {
                    tracing::debug!(error = %e, "terminal wait failed");
                    return ExpectOutcome::Closed;
                }
            }

            match self.master.read(&mut buf) {
                Ok(0) => return ExpectOutcome::Closed,
                Ok(n) => {
                    self.raw.extend_from_slice(&buf[..n]);
                    self.output = String::from_utf8_lossy(&self.raw).into_owned();

                    let matched = patterns.count_matched(&self.output);
                    tracing::trace!(
                        data = ?String::from_utf8_lossy(&buf[..n]),
                        matched,
                        total = patterns.items().len(),
                        "read"
                    );
                    if matched == patterns.items().len() {
                        return ExpectOutcome::Matched;
                    }
                }
                Err(e) if e.kind() == ErrorKind::Interrupted => {}
                Err(e) => {
                    // EIO once every slave descriptor is closed.
                    tracing::debug!(error = %e, "terminal closed");
                    return ExpectOutcome::Closed;
                }
            }
        }
    }

    /// Assert the output right after start-up.
    ///
    /// Both streams share the terminal, so `stdout` is expected first and
    /// then `stderr`. Empty sets are skipped.
    ///
    /// # Panics
    ///
    /// Panics with the captured output if a pattern set is not seen.
    pub fn assert_out(&mut self, stdout: impl Into<Patterns>, stderr: impl Into<Patterns>) {
        for (label, patterns) in [("stdout", stdout.into()), ("stderr", stderr.into())] {
            if patterns.is_empty() {
                continue;
            }
            assert!(
                self.expect(patterns.clone()),
                "{label}: expected {:?} from `{}`, got:\n{}",
                patterns.items(),
                self.command,
                self.output
            );
        }
    }

    /// Send `input`, then assert `output` appears.
    ///
    /// # Panics
    ///
    /// Panics if the write fails or the output is not seen.
    pub fn assert_in_out(&mut self, input: &str, output: impl Into<Patterns>) {
        if let Err(e) = self.send_key(input) {
            panic!("sending {input:?} to `{}` failed: {e}", self.command);
        }
        thread::sleep(STEP_PAUSE);

        let output = output.into();
        assert!(
            self.expect(output.clone()),
            "after {input:?}: expected {:?} from `{}`, got:\n{}",
            output.items(),
            self.command,
            self.output
        );
        thread::sleep(STEP_PAUSE);
    }

    /// Run scripted exchanges in order.
    pub fn assert_in_out_list(&mut self, exchanges: impl Into<Exchanges>) {
        let exchanges: Exchanges = exchanges.into();
        for step in &exchanges {
            self.assert_in_out(&step.input, step.output.clone());
        }
    }

    /// Terminate the child with the configured grace period.
    pub fn close(self) -> Result<ExitStatus> {
        let timeout = self.config.close_timeout;
        self.close_with(true, timeout)
    }

    /// Tear the session down.
    ///
    /// If `terminate`, SIGTERM goes to the child's process group. After
    /// `timeout` without an exit the group gets SIGKILL and the child is
    /// reaped without a deadline. Anything still in the group once the
    /// child has exited is killed. The terminal is closed last, on every
    /// path.
    pub fn close_with(mut self, terminate: bool, timeout: Duration) -> Result<ExitStatus> {
        if terminate {
            tracing::debug!(pid = self.child.pid(), "terminating");
            self.child.signal(PtySignal::Terminate)?;
        }

        let status = match self.child.wait_timeout(timeout)? {
            Some(status) => status,
            None => {
                tracing::warn!(pid = self.child.pid(), ?timeout, command = %self.command, "no exit in time, killing");
                self.child.kill()?;
                self.child.wait()?
            }
        };

        // Members of the group that survived the leader would keep the slave open.
        if let Err(e) = self.child.kill_group() {
            tracing::warn!(error = %e, "failed to kill remaining process group");
        }

        tracing::debug!(%status, "session closed");
        // `self` drops on return, closing the master.
        Ok(status)
    }
}

impl Drop for InteractiveSession {
    fn drop(&mut self) {
        if self.child.is_running() {
            if let Err(e) = self.child.kill() {
                tracing::warn!(error = %e, "failed to kill unclosed session");
            }
            if let Err(e) = self.child.wait() {
                tracing::warn!(error = %e, "failed to reap unclosed session");
            }
        }
        if let Err(e) = self.child.kill_group() {
            tracing::warn!(error = %e, "failed to kill remaining process group");
        }
    }
}

/// Start `command` with `args` appended on a new PTY, using the
/// environment-derived [`HarnessConfig`].
pub fn run_interactive_command(
    command: impl Into<CommandLine>,
    args: impl Into<CommandLine>,
) -> Result<InteractiveSession> {
    InteractiveSession::spawn(command.into().with_args(args), HarnessConfig::from_env())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fast() -> HarnessConfig {
        HarnessConfig::default().poll_interval(Duration::from_millis(20))
    }

    #[test]
    fn empty_patterns_return_immediately() {
        let mut session = InteractiveSession::spawn("sleep 5", fast()).unwrap();
        let start = Instant::now();
        assert_eq!(session.expect_outcome("", Duration::from_secs(5)), ExpectOutcome::Matched);
        assert!(start.elapsed() < Duration::from_millis(50));
        session.close().unwrap();
    }

    #[test]
    fn closed_terminal_is_reported() {
        let mut session = InteractiveSession::spawn("true", fast()).unwrap();
        let outcome = session.expect_outcome("never printed", Duration::from_secs(5));
        assert_eq!(outcome, ExpectOutcome::Closed);
        let status = session.close_with(false, Duration::from_secs(3)).unwrap();
        assert!(status.success());
    }

    #[test]
    fn cat_echoes_keys() {
        let mut session = InteractiveSession::spawn("cat", fast()).unwrap();
        session.send_key("ping\n").unwrap();
        assert!(session.expect("ping"));
        let status = session.close().unwrap();
        assert_eq!(status.signal(), Some(15));
    }

    #[test]
    fn pty_settings_reach_child() {
        let pty = PtyConfig::new().env("CLIUTILS_SESSION_MARKER", "marker-value").window(100, 30);
        let mut session =
            InteractiveSession::spawn_with_pty(["sh", "-c", "echo $CLIUTILS_SESSION_MARKER; stty size"], fast(), &pty)
                .unwrap();
        assert!(session.expect(["marker-value", "30 100"]));
        session.close_with(false, Duration::from_secs(3)).unwrap();
    }

    #[test]
    fn missing_program_is_skip() {
        let err = InteractiveSession::spawn("definitely-not-a-command-4242", fast()).unwrap_err();
        assert!(err.is_skip());
    }

    /// Pid printed by the script as `gc=<pid>`.
    #[cfg(target_os = "linux")]
    fn grandchild_pid(session: &mut InteractiveSession) -> i32 {
        assert!(session.expect(["gc=", "\n"]), "got {:?}", session.output());
        let re = regex::Regex::new(r"gc=(\d+)").unwrap();
        re.captures(session.output()).unwrap()[1].parse().unwrap()
    }

    /// Running or stopped; a zombie or a vanished pid is not.
    #[cfg(target_os = "linux")]
    fn is_live(pid: i32) -> bool {
        std::fs::read_to_string(format!("/proc/{pid}/stat"))
            .ok()
            .and_then(|stat| stat.rsplit_once(") ").map(|(_, rest)| !rest.starts_with('Z')))
            .unwrap_or(false)
    }

    /// Orphans are reaped by init, so give them a moment.
    #[cfg(target_os = "linux")]
    fn dies_soon(pid: i32) -> bool {
        let deadline = Instant::now() + Duration::from_secs(2);
        while is_live(pid) {
            if Instant::now() >= deadline {
                return false;
            }
            thread::sleep(Duration::from_millis(20));
        }
        true
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn close_terminates_whole_process_group() {
        let mut session =
            InteractiveSession::spawn(["sh", "-c", "sleep 100 & echo gc=$!; wait"], fast()).unwrap();
        let pid = grandchild_pid(&mut session);
        assert!(is_live(pid));

        let status = session.close().unwrap();
        assert_eq!(status.signal(), Some(15));
        assert!(dies_soon(pid), "grandchild {pid} survived close");
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn close_kills_group_members_ignoring_term_and_hup() {
        let script = "(trap '' TERM HUP; exec sleep 100) & echo gc=$!; wait";
        let mut session = InteractiveSession::spawn(["sh", "-c", script], fast()).unwrap();
        let pid = grandchild_pid(&mut session);

        let status = session.close_with(true, Duration::from_secs(3)).unwrap();
        assert_eq!(status.signal(), Some(15));
        assert!(dies_soon(pid), "grandchild {pid} survived close");
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn dropping_unclosed_session_reaps_child() {
        let session = InteractiveSession::spawn("sleep 30", fast()).unwrap();
        let pid = session.pid();
        drop(session);
        assert!(!std::path::Path::new(&format!("/proc/{pid}")).exists());
    }
}
