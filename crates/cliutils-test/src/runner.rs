//! Fixture-style front end for CLI tests.
//!
//! [`CliRunner`] bundles the non-interactive runner, interactive sessions,
//! and the assertion helpers used with both. Helpers named `test_*` run and
//! assert in one call; a missing executable makes them return `None` so the
//! calling test can end early instead of failing.

use cliutils_pty::ExitStatus;

use crate::cmdline::CommandLine;
use crate::config::HarnessConfig;
use crate::error::Result;
use crate::patterns::{Exchanges, Patterns};
use crate::run::{RunOptions, RunResult, run_command};
use crate::session::InteractiveSession;

/// Expected outcome of a non-interactive run.
#[derive(Debug, Clone, Default)]
pub struct Expected {
    /// Substrings required in stdout.
    pub stdout: Patterns,
    /// Substrings required in stderr.
    pub stderr: Patterns,
    /// Required exit code, if checked.
    pub exit_code: Option<i32>,
}

impl Expected {
    /// Nothing checked.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Require substrings in stdout.
    #[must_use]
    pub fn stdout(mut self, patterns: impl Into<Patterns>) -> Self {
        self.stdout = patterns.into();
        self
    }

    /// Require substrings in stderr.
    #[must_use]
    pub fn stderr(mut self, patterns: impl Into<Patterns>) -> Self {
        self.stderr = patterns.into();
        self
    }

    /// Require an exit code.
    #[must_use]
    pub const fn exit_code(mut self, code: i32) -> Self {
        self.exit_code = Some(code);
        self
    }
}

/// Script for [`CliRunner::test_interactive`].
#[derive(Debug, Clone)]
pub struct InteractiveScript {
    /// Output required right after start-up (stdout part).
    pub stdout: Patterns,
    /// Output required right after start-up (stderr part).
    pub stderr: Patterns,
    /// Input/output steps after start-up.
    pub exchanges: Exchanges,
    /// Whether closing sends SIGTERM first.
    pub terminate: bool,
    /// Required return code (negative for a signal), if checked.
    pub exit_code: Option<i32>,
}

impl Default for InteractiveScript {
    fn default() -> Self {
        Self {
            stdout: Patterns::none(),
            stderr: Patterns::none(),
            exchanges: Exchanges::none(),
            terminate: true,
            exit_code: None,
        }
    }
}

impl InteractiveScript {
    /// Empty script that terminates the child at the end.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Require start-up output.
    #[must_use]
    pub fn stdout(mut self, patterns: impl Into<Patterns>) -> Self {
        self.stdout = patterns.into();
        self
    }

    /// Require start-up error output.
    #[must_use]
    pub fn stderr(mut self, patterns: impl Into<Patterns>) -> Self {
        self.stderr = patterns.into();
        self
    }

    /// Set the input/output steps.
    #[must_use]
    pub fn exchanges(mut self, exchanges: impl Into<Exchanges>) -> Self {
        self.exchanges = exchanges.into();
        self
    }

    /// Whether to send SIGTERM when closing.
    #[must_use]
    pub const fn terminate(mut self, terminate: bool) -> Self {
        self.terminate = terminate;
        self
    }

    /// Require a return code.
    #[must_use]
    pub const fn exit_code(mut self, code: i32) -> Self {
        self.exit_code = Some(code);
        self
    }
}

/// Runs command-line programs for tests.
#[derive(Debug, Clone, Copy)]
pub struct CliRunner {
    config: HarnessConfig,
}

impl Default for CliRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl CliRunner {
    /// A runner using [`HarnessConfig::from_env`].
    #[must_use]
    pub fn new() -> Self {
        Self {
            config: HarnessConfig::from_env(),
        }
    }

    /// A runner with explicit timing.
    #[must_use]
    pub const fn with_config(config: HarnessConfig) -> Self {
        Self { config }
    }

    /// The timing configuration.
    #[must_use]
    pub const fn config(&self) -> &HarnessConfig {
        &self.config
    }

    /// Run a command and capture its output.
    ///
    /// A missing timeout in `options` takes the runner's run timeout.
    pub fn run_command(&self, command: impl Into<CommandLine>, options: &RunOptions) -> Result<RunResult> {
        if options.timeout.is_some() {
            run_command(command, options)
        } else {
            run_command(command, &options.clone().timeout(self.config.run_timeout))
        }
    }

    /// Run a command and assert on the result.
    ///
    /// Returns `None` when the program does not exist.
    ///
    /// # Panics
    ///
    /// Panics on any other error (a timeout included) or a failed check.
    pub fn test_command(
        &self,
        command: impl Into<CommandLine>,
        options: &RunOptions,
        expected: &Expected,
    ) -> Option<RunResult> {
        let command = command.into();
        match self.run_command(command.clone(), options) {
            Ok(result) => {
                self.assert_result(&result, expected);
                Some(result)
            }
            Err(e) if e.is_skip() => {
                tracing::warn!(command = %command, "skipping: {e}");
                None
            }
            Err(e) => panic!("`{command}` failed: {e}"),
        }
    }

    /// Start an interactive session.
    pub fn run_interactive_command(
        &self,
        command: impl Into<CommandLine>,
        args: impl Into<CommandLine>,
    ) -> Result<InteractiveSession> {
        InteractiveSession::spawn(command.into().with_args(args), self.config)
    }

    /// Start a session, check its start-up output, run the exchanges, and
    /// close it.
    ///
    /// Returns the final status, or `None` when the program does not exist.
    ///
    /// # Panics
    ///
    /// Panics on any other error or a failed check.
    pub fn test_interactive(
        &self,
        command: impl Into<CommandLine>,
        args: impl Into<CommandLine>,
        script: &InteractiveScript,
    ) -> Option<ExitStatus> {
        let command = command.into().with_args(args);
        let mut session = match InteractiveSession::spawn(command.clone(), self.config) {
            Ok(session) => session,
            Err(e) if e.is_skip() => {
                tracing::warn!(command = %command, "skipping: {e}");
                return None;
            }
            Err(e) => panic!("`{command}` failed to start: {e}"),
        };

        session.assert_out(script.stdout.clone(), script.stderr.clone());
        session.assert_in_out_list(script.exchanges.clone());

        let status = match session.close_with(script.terminate, self.config.close_timeout) {
            Ok(status) => status,
            Err(e) => panic!("closing `{command}` failed: {e}"),
        };

        if let Some(code) = script.exit_code {
            assert_eq!(status.returncode(), code, "`{command}` {status}");
        }
        Some(status)
    }

    /// Check a result against `expected`.
    ///
    /// # Panics
    ///
    /// Panics with the full stream on the first missing substring or on an
    /// exit code mismatch.
    pub fn assert_result(&self, result: &RunResult, expected: &Expected) {
        for (label, out, patterns) in [
            ("stdout", &result.stdout, &expected.stdout),
            ("stderr", &result.stderr, &expected.stderr),
        ] {
            for p in patterns.items() {
                assert!(out.contains(p.as_str()), "expected {p:?} in {label}, got:\n{out}");
            }
        }
        if let Some(code) = expected.exit_code {
            self.assert_return_code(result, code);
        }
    }

    /// Assert that stdout and/or stderr contain a substring.
    ///
    /// # Panics
    ///
    /// Panics if a given substring is missing.
    pub fn assert_output_contains(&self, result: &RunResult, stdout: Option<&str>, stderr: Option<&str>) {
        if let Some(s) = stdout {
            assert!(result.stdout.contains(s), "expected {s:?} in stdout, got: {:?}", result.stdout);
        }
        if let Some(s) = stderr {
            assert!(result.stderr.contains(s), "expected {s:?} in stderr, got: {:?}", result.stderr);
        }
    }

    /// Assert that stdout and/or stderr are exactly the given text.
    ///
    /// # Panics
    ///
    /// Panics on a mismatch.
    pub fn assert_output_equals(&self, result: &RunResult, stdout: Option<&str>, stderr: Option<&str>) {
        if let Some(s) = stdout {
            assert_eq!(result.stdout, s, "stdout mismatch");
        }
        if let Some(s) = stderr {
            assert_eq!(result.stderr, s, "stderr mismatch");
        }
    }

    /// Assert the exit code.
    ///
    /// # Panics
    ///
    /// Panics with both streams if the code differs.
    pub fn assert_return_code(&self, result: &RunResult, expected: i32) {
        assert_eq!(
            result.exit_code, expected,
            "expected return code {expected}, got {}\nstdout: {}\nstderr: {}",
            result.exit_code, result.stdout, result.stderr
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> RunResult {
        RunResult {
            stdout: "Hello World\n".into(),
            stderr: String::new(),
            exit_code: 0,
        }
    }

    #[test]
    fn result_checks_pass() {
        let runner = CliRunner::with_config(HarnessConfig::default());
        let result = sample();
        runner.assert_result(&result, &Expected::new().stdout(["Hello", "World"]).exit_code(0));
        runner.assert_output_contains(&result, Some("World"), None);
        runner.assert_output_equals(&result, Some("Hello World\n"), Some(""));
    }

    #[test]
    #[should_panic(expected = "expected \"Bye\" in stdout")]
    fn missing_substring_panics() {
        let runner = CliRunner::with_config(HarnessConfig::default());
        runner.assert_result(&sample(), &Expected::new().stdout("Bye"));
    }

    #[test]
    #[should_panic(expected = "expected return code 2")]
    fn wrong_code_panics() {
        let runner = CliRunner::with_config(HarnessConfig::default());
        runner.assert_return_code(&sample(), 2);
    }

    #[test]
    fn interactive_script_defaults_to_terminate() {
        let script = InteractiveScript::new();
        assert!(script.terminate);
        assert!(script.exchanges.is_empty());
        assert_eq!(script.exit_code, None);
    }

    #[test]
    fn test_command_skips_missing_program() {
        let runner = CliRunner::with_config(HarnessConfig::default());
        let outcome = runner.test_command("definitely-not-a-command-4242", &RunOptions::new(), &Expected::new());
        assert!(outcome.is_none());
    }
}
