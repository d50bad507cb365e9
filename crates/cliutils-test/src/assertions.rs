//! Assertion helpers for captured output.

use regex::Regex;

use crate::run::RunResult;
use crate::session::InteractiveSession;

/// Assertions over a block of captured text.
pub trait OutputAssertions {
    /// The text under test.
    fn output_text(&self) -> &str;

    /// Assert that the text contains `needle`.
    fn assert_contains(&self, needle: &str) {
        let output = self.output_text();
        assert!(
            output.contains(needle),
            "Expected output to contain {needle:?}, but got:\n{output}"
        );
    }

    /// Assert that the text does not contain `needle`.
    fn assert_not_contains(&self, needle: &str) {
        let output = self.output_text();
        assert!(
            !output.contains(needle),
            "Expected output NOT to contain {needle:?}, but found it in:\n{output}"
        );
    }

    /// Assert that the text matches a regex.
    fn assert_matches(&self, pattern: &str) {
        let output = self.output_text();
        let re = match Regex::new(pattern) {
            Ok(re) => re,
            Err(e) => panic!("invalid regex {pattern:?}: {e}"),
        };
        assert!(
            re.is_match(output),
            "Expected output to match pattern {pattern:?}, but got:\n{output}"
        );
    }

    /// Assert the number of lines.
    fn assert_line_count(&self, expected: usize) {
        let output = self.output_text();
        let count = output.lines().count();
        assert_eq!(count, expected, "Expected {expected} lines, but got {count} in:\n{output}");
    }
}

impl OutputAssertions for str {
    fn output_text(&self) -> &str {
        self
    }
}

impl OutputAssertions for String {
    fn output_text(&self) -> &str {
        self
    }
}

/// Checks stdout.
impl OutputAssertions for RunResult {
    fn output_text(&self) -> &str {
        &self.stdout
    }
}

/// Checks the output captured by the last `expect`.
impl OutputAssertions for InteractiveSession {
    fn output_text(&self) -> &str {
        self.output()
    }
}
