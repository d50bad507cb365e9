//! Non-interactive command runs with captured output.
//!
//! The run is driven on a current-thread tokio runtime so the stdin payload
//! is written while stdout and stderr are drained, and the whole run is
//! bounded by a timeout. Callers stay synchronous.

use std::ffi::OsString;
use std::path::PathBuf;
use std::process::Stdio;
use std::time::Duration;

use cliutils_pty::ExitStatus;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tokio::runtime::Builder;

use crate::cmdline::CommandLine;
use crate::config::HarnessConfig;
use crate::error::{HarnessError, Result};

/// Options for [`run_command`].
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// Extra arguments appended to the command line.
    pub args: CommandLine,
    /// Data written to the child's stdin. Without it stdin is `/dev/null`.
    pub input: Option<String>,
    /// Run timeout; `None` uses [`HarnessConfig::run_timeout`].
    pub timeout: Option<Duration>,
    /// Working directory.
    pub cwd: Option<PathBuf>,
    /// Variables added to the environment.
    pub env: Vec<(OsString, OsString)>,
    /// Start from an empty environment instead of inheriting.
    pub env_clear: bool,
}

impl RunOptions {
    /// Default options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append arguments (a string is split on whitespace).
    #[must_use]
    pub fn args(mut self, args: impl Into<CommandLine>) -> Self {
        self.args = std::mem::take(&mut self.args).with_args(args);
        self
    }

    /// Feed `input` to stdin.
    #[must_use]
    pub fn input(mut self, input: impl Into<String>) -> Self {
        self.input = Some(input.into());
        self
    }

    /// Set the run timeout.
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set the working directory.
    #[must_use]
    pub fn cwd(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cwd = Some(dir.into());
        self
    }

    /// Add an environment variable.
    #[must_use]
    pub fn env(mut self, key: impl Into<OsString>, value: impl Into<OsString>) -> Self {
        self.env.push((key.into(), value.into()));
        self
    }

    /// Do not inherit the parent's environment.
    #[must_use]
    pub const fn env_clear(mut self) -> Self {
        self.env_clear = true;
        self
    }
}

/// Captured result of a finished run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunResult {
    /// Everything the child wrote to stdout (lossy UTF-8).
    pub stdout: String,
    /// Everything the child wrote to stderr (lossy UTF-8).
    pub stderr: String,
    /// Exit code, or the negated signal number if the child was killed.
    pub exit_code: i32,
}

impl RunResult {
    /// Whether the child exited with code 0.
    #[must_use]
    pub const fn success(&self) -> bool {
        self.exit_code == 0
    }
}

impl From<std::process::Output> for RunResult {
    fn from(output: std::process::Output) -> Self {
        Self {
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            exit_code: ExitStatus::from(output.status).returncode(),
        }
    }
}

/// Run `command` to completion and capture its output.
///
/// # Errors
///
/// - [`HarnessError::CommandNotFound`] if the program does not exist (a
///   skip condition for the caller).
/// - [`HarnessError::Timeout`] if the run outlives its timeout; the child is
///   killed.
/// - [`HarnessError::EmptyCommand`] for an empty command line.
pub fn run_command(command: impl Into<CommandLine>, options: &RunOptions) -> Result<RunResult> {
    let cmdline = command.into().with_args(options.args.clone());
    let timeout = options
        .timeout
        .unwrap_or_else(|| HarnessConfig::from_env().run_timeout);

    let runtime = Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| HarnessError::io_context("creating tokio runtime", e))?;

    runtime.block_on(run_async(&cmdline, options, timeout))
}

async fn run_async(cmdline: &CommandLine, options: &RunOptions, timeout: Duration) -> Result<RunResult> {
    let program = cmdline.program().ok_or(HarnessError::EmptyCommand)?;

    let mut cmd = Command::new(program);
    cmd.args(cmdline.args())
        .stdin(if options.input.is_some() {
            Stdio::piped()
        } else {
            Stdio::null()
        })
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);

    if options.env_clear {
        cmd.env_clear();
    }
    cmd.envs(options.env.iter().map(|(k, v)| (k, v)));

    if let Some(ref dir) = options.cwd {
        cmd.current_dir(dir);
    }

    tracing::debug!(command = %cmdline, ?timeout, "running command");
    if let Some(ref input) = options.input {
        tracing::debug!(input = ?input, "stdin payload");
    }

    let mut child = cmd.spawn().map_err(|e| HarnessError::from_spawn(program, e))?;

    let stdin = child.stdin.take();
    let input = options.input.clone();
    let feed = async move {
        if let (Some(mut stdin), Some(input)) = (stdin, input) {
            match stdin.write_all(input.as_bytes()).await {
                // The child may exit without reading everything.
                Err(e) if e.kind() != std::io::ErrorKind::BrokenPipe => return Err(e),
                _ => {}
            }
        }
        Ok(())
    };

    let run = async {
        let (fed, output) = tokio::join!(feed, child.wait_with_output());
        fed?;
        output
    };

    match tokio::time::timeout(timeout, run).await {
        Ok(Ok(output)) => {
            let result = RunResult::from(output);
            tracing::debug!(exit_code = result.exit_code, "command finished");
            Ok(result)
        }
        Ok(Err(e)) => Err(HarnessError::io_context(format!("running {cmdline}"), e)),
        Err(_) => Err(HarnessError::Timeout {
            timeout,
            command: cmdline.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn options_builder() {
        let options = RunOptions::new()
            .args("-n hi")
            .args(["a b"])
            .input("x\n")
            .timeout(Duration::from_secs(2))
            .env("K", "V");
        assert_eq!(options.args.tokens(), ["-n", "hi", "a b"]);
        assert_eq!(options.input.as_deref(), Some("x\n"));
        assert_eq!(options.timeout, Some(Duration::from_secs(2)));
        assert_eq!(options.env.len(), 1);
    }

    #[test]
    fn captures_both_streams() {
        let result = run_command(["sh", "-c", "echo out; echo err >&2; exit 3"], &RunOptions::new()).unwrap();
        assert_eq!(result.stdout, "out\n");
        assert_eq!(result.stderr, "err\n");
        assert_eq!(result.exit_code, 3);
        assert!(!result.success());
    }

    #[test]
    fn env_and_cwd_apply() {
        let dir = tempfile::tempdir().unwrap();
        let result = run_command(
            ["sh", "-c", "pwd; echo $CLIUTILS_RUN_MARKER"],
            &RunOptions::new().cwd(dir.path()).env("CLIUTILS_RUN_MARKER", "marker-value"),
        )
        .unwrap();
        let mut lines = result.stdout.lines();
        let pwd = std::path::PathBuf::from(lines.next().unwrap());
        assert_eq!(pwd.canonicalize().unwrap(), dir.path().canonicalize().unwrap());
        assert_eq!(lines.next(), Some("marker-value"));
    }

    #[test]
    fn empty_command_is_rejected() {
        let err = run_command("", &RunOptions::new()).unwrap_err();
        assert!(matches!(err, HarnessError::EmptyCommand));
    }

    #[test]
    fn timeout_is_hard_failure() {
        let err = run_command("sleep 5", &RunOptions::new().timeout(Duration::from_millis(200))).unwrap_err();
        assert!(matches!(err, HarnessError::Timeout { .. }), "unexpected: {err}");
        assert!(!err.is_skip());
        assert!(err.to_string().contains("sleep 5"));
    }
}
