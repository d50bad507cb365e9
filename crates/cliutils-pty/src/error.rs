//! Errors from allocating a terminal and driving its child.

use std::io;

use crate::signal::PtySignal;

/// Error type of this crate.
#[derive(Debug, thiserror::Error)]
pub enum PtyError {
    /// Allocating the master/slave pair failed.
    #[error("cannot allocate a pseudo-terminal: {0}")]
    Create(#[source] io::Error),

    /// The child could not be started.
    #[error("cannot start {program}: {source}")]
    Spawn {
        /// Program as given by the caller.
        program: String,
        #[source]
        source: io::Error,
    },

    /// Reading, writing, or polling the master failed.
    #[error("terminal I/O: {0}")]
    Io(#[from] io::Error),

    /// Setting the window size failed.
    #[error("cannot resize terminal: {0}")]
    Resize(#[source] io::Error),

    /// Delivering a signal failed.
    #[error("cannot send {signal}: {source}")]
    Signal {
        /// The signal being sent.
        signal: PtySignal,
        #[source]
        source: io::Error,
    },

    /// Waiting for the child failed.
    #[error("cannot wait for child: {0}")]
    Wait(#[source] io::Error),
}

impl PtyError {
    /// True when the program to start does not exist.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Spawn { source, .. } if source.kind() == io::ErrorKind::NotFound)
    }

    /// A spawn failure for `program`.
    pub fn spawn(program: impl Into<String>, source: io::Error) -> Self {
        Self::Spawn {
            program: program.into(),
            source,
        }
    }
}

/// Result alias for this crate.
pub type Result<T> = std::result::Result<T, PtyError>;

impl From<rustix::io::Errno> for PtyError {
    fn from(errno: rustix::io::Errno) -> Self {
        Self::Io(errno.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_only_for_spawn() {
        let missing = PtyError::spawn("nope", io::ErrorKind::NotFound.into());
        assert!(missing.is_not_found());
        assert_eq!(missing.to_string(), "cannot start nope: entity not found");

        assert!(!PtyError::Io(io::ErrorKind::NotFound.into()).is_not_found());
        assert!(!PtyError::spawn("x", io::ErrorKind::PermissionDenied.into()).is_not_found());
    }

    #[test]
    fn signal_error_names_signal() {
        let err = PtyError::Signal {
            signal: PtySignal::Kill,
            source: io::ErrorKind::PermissionDenied.into(),
        };
        assert!(err.to_string().starts_with("cannot send SIGKILL"));
    }
}
