//! Signals sent to PTY children.

use std::fmt;

/// A signal the harness can deliver to a child.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum PtySignal {
    /// SIGTERM, the polite stop used when closing a session.
    Terminate,
    /// SIGKILL, the escalation after the grace period.
    Kill,
}

impl PtySignal {
    /// The platform signal number.
    #[must_use]
    pub const fn number(self) -> i32 {
        match self {
            Self::Terminate => libc::SIGTERM,
            Self::Kill => libc::SIGKILL,
        }
    }

    /// The conventional name, e.g. `SIGTERM`.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Terminate => "SIGTERM",
            Self::Kill => "SIGKILL",
        }
    }
}

impl fmt::Display for PtySignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers_match_libc() {
        assert_eq!(PtySignal::Terminate.number(), 15);
        assert_eq!(PtySignal::Kill.number(), 9);
        assert_eq!(PtySignal::Terminate.to_string(), "SIGTERM");
    }
}
