//! Command line normalization.
//!
//! Tests name the program to run either as one string (`"echo -n hi"`) or
//! as a list of tokens (`["echo", "-n", "hi there"]`). Both forms become a
//! [`CommandLine`] at the API boundary.

use std::fmt;

/// A canonical token sequence: program followed by its arguments.
///
/// A string is split on whitespace; a list is taken verbatim.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandLine {
    tokens: Vec<String>,
}

impl CommandLine {
    /// Build from tokens taken verbatim.
    #[must_use]
    pub fn from_tokens<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            tokens: tokens.into_iter().map(Into::into).collect(),
        }
    }

    /// Split `line` on whitespace.
    #[must_use]
    pub fn parse(line: &str) -> Self {
        Self::from_tokens(line.split_whitespace())
    }

    /// Append extra arguments, normalized the same way.
    #[must_use]
    pub fn with_args(mut self, args: impl Into<Self>) -> Self {
        self.tokens.extend(args.into().tokens);
        self
    }

    /// The program, if any.
    #[must_use]
    pub fn program(&self) -> Option<&str> {
        self.tokens.first().map(String::as_str)
    }

    /// Everything after the program.
    #[must_use]
    pub fn args(&self) -> &[String] {
        self.tokens.get(1..).unwrap_or_default()
    }

    /// All tokens, program included.
    #[must_use]
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    /// Whether there are no tokens at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

impl fmt::Display for CommandLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.tokens.join(" "))
    }
}

impl From<&str> for CommandLine {
    fn from(line: &str) -> Self {
        Self::parse(line)
    }
}

impl From<String> for CommandLine {
    fn from(line: String) -> Self {
        Self::parse(&line)
    }
}

impl From<&String> for CommandLine {
    fn from(line: &String) -> Self {
        Self::parse(line)
    }
}

impl From<Vec<String>> for CommandLine {
    fn from(tokens: Vec<String>) -> Self {
        Self { tokens }
    }
}

impl From<Vec<&str>> for CommandLine {
    fn from(tokens: Vec<&str>) -> Self {
        Self::from_tokens(tokens)
    }
}

impl From<&[&str]> for CommandLine {
    fn from(tokens: &[&str]) -> Self {
        Self::from_tokens(tokens.iter().copied())
    }
}

impl From<&[String]> for CommandLine {
    fn from(tokens: &[String]) -> Self {
        Self::from_tokens(tokens.iter().cloned())
    }
}

impl<const N: usize> From<[&str; N]> for CommandLine {
    fn from(tokens: [&str; N]) -> Self {
        Self::from_tokens(tokens)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn string_is_split() {
        let cmd = CommandLine::from("echo  -n\thi");
        assert_eq!(cmd.tokens(), ["echo", "-n", "hi"]);
        assert_eq!(cmd.program(), Some("echo"));
        assert_eq!(cmd.args(), ["-n", "hi"]);
        assert_eq!(cmd.to_string(), "echo -n hi");
    }

    #[test]
    fn list_is_verbatim() {
        let cmd = CommandLine::from(["sh", "-c", "echo a b"]);
        assert_eq!(cmd.tokens(), ["sh", "-c", "echo a b"]);
    }

    #[test]
    fn extra_args_are_appended() {
        let cmd = CommandLine::from("sample3-subs").with_args("sub subsub");
        assert_eq!(cmd.tokens(), ["sample3-subs", "sub", "subsub"]);

        let cmd = CommandLine::from(["printf"]).with_args(["%s\n", "a b"]);
        assert_eq!(cmd.tokens(), ["printf", "%s\n", "a b"]);

        let cmd = CommandLine::from("true").with_args("");
        assert_eq!(cmd.tokens(), ["true"]);
    }

    #[test]
    fn empty_line() {
        let cmd = CommandLine::from("   ");
        assert!(cmd.is_empty());
        assert_eq!(cmd.program(), None);
        assert!(cmd.args().is_empty());
    }

    proptest! {
        #[test]
        fn parse_matches_split_whitespace(line in "[a-z \\t-]{0,40}") {
            let cmd = CommandLine::parse(&line);
            let expected: Vec<&str> = line.split_whitespace().collect();
            prop_assert_eq!(cmd.tokens(), expected.as_slice());
        }

        #[test]
        fn list_tokens_survive(tokens in proptest::collection::vec(".{0,8}", 0..6)) {
            let cmd = CommandLine::from(tokens.clone());
            prop_assert_eq!(cmd.tokens(), tokens.as_slice());
        }
    }
}
