//! Non-interactive runs against the test programs.

use std::time::{Duration, Instant};

use cliutils_test::{CliRunner, Expected, HarnessError, OutputAssertions, RunOptions, run_command};

const ECHO: &str = env!("CARGO_BIN_EXE_test-echo");
const HANG: &str = env!("CARGO_BIN_EXE_test-hang");
const MENU: &str = env!("CARGO_BIN_EXE_test-menu");

#[test]
fn stdin_payload_reaches_program() {
    let result = run_command([ECHO], &RunOptions::new().input("World\n")).unwrap();
    assert_eq!(result.stdout, "Hello World\n");
    assert!(result.stderr.is_empty());
    assert!(result.success());
}

#[test]
fn no_payload_reads_end_of_input() {
    let result = run_command([ECHO], &RunOptions::new()).unwrap();
    assert_eq!(result.stdout, "Hello \n");
}

#[test]
fn menu_without_terminal() {
    let runner = CliRunner::new();
    runner.test_command(
        [MENU],
        &RunOptions::new().input("\x1b[B\n"),
        &Expected::new().stdout(["> Item A", "You selected Item B"]).exit_code(0),
    );

    let result = runner.run_command([MENU], &RunOptions::new()).unwrap();
    runner.assert_return_code(&result, 1);
    result.assert_line_count(3);
}

#[test]
fn hang_times_out() {
    let start = Instant::now();
    let err = run_command([HANG], &RunOptions::new().timeout(Duration::from_millis(500))).unwrap_err();
    assert!(matches!(err, HarnessError::Timeout { .. }), "unexpected: {err}");
    assert!(!err.is_skip());
    assert!(start.elapsed() < Duration::from_secs(3));
}

#[test]
fn missing_executable_is_skip() {
    let err = run_command("no-such-program-4242 --flag", &RunOptions::new()).unwrap_err();
    assert!(err.is_skip());
    assert!(matches!(err, HarnessError::CommandNotFound { .. }));

    let outcome = CliRunner::new().test_command("no-such-program-4242", &RunOptions::new(), &Expected::new());
    assert!(outcome.is_none());
}
