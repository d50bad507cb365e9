//! How a child ended.

use std::fmt;
use std::os::unix::process::ExitStatusExt;

/// Final state of a reaped child.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitStatus {
    /// Normal exit with a code.
    Exited(i32),
    /// Killed by a signal.
    Signaled(i32),
}

impl ExitStatus {
    /// Exit code 0.
    #[must_use]
    pub const fn success(&self) -> bool {
        matches!(self, Self::Exited(0))
    }

    /// The exit code of a normal exit.
    #[must_use]
    pub const fn code(&self) -> Option<i32> {
        if let Self::Exited(code) = *self { Some(code) } else { None }
    }

    /// The signal that killed the child.
    #[must_use]
    pub const fn signal(&self) -> Option<i32> {
        if let Self::Signaled(sig) = *self { Some(sig) } else { None }
    }

    /// Exit code, or minus the signal number (`-15` after SIGTERM).
    #[must_use]
    pub const fn returncode(&self) -> i32 {
        match *self {
            Self::Exited(code) => code,
            Self::Signaled(sig) => -sig,
        }
    }
}

impl From<std::process::ExitStatus> for ExitStatus {
    fn from(status: std::process::ExitStatus) -> Self {
        match (status.code(), status.signal()) {
            (Some(code), _) => Self::Exited(code),
            (None, Some(sig)) => Self::Signaled(sig),
            (None, None) => Self::Exited(-1),
        }
    }
}

impl fmt::Display for ExitStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exited(code) => write!(f, "exit code {code}"),
            Self::Signaled(sig) => write!(f, "killed by signal {sig}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn returncode_negates_signal() {
        assert_eq!(ExitStatus::Exited(3).returncode(), 3);
        assert_eq!(ExitStatus::Signaled(9).returncode(), -9);
        assert_eq!(ExitStatus::Signaled(9).code(), None);
        assert!(ExitStatus::Exited(0).success());
        assert!(!ExitStatus::Signaled(15).success());
    }

    #[test]
    fn from_std_status() {
        let exited = std::process::ExitStatus::from_raw(2 << 8);
        assert_eq!(ExitStatus::from(exited), ExitStatus::Exited(2));

        let killed = std::process::ExitStatus::from_raw(libc::SIGTERM);
        assert_eq!(ExitStatus::from(killed), ExitStatus::Signaled(libc::SIGTERM));
        assert_eq!(ExitStatus::Signaled(15).to_string(), "killed by signal 15");
    }
}
