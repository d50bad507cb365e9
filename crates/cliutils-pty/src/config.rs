//! How a child is started on the slave side of a PTY.
//!
//! ```
//! use cliutils_pty::{PtyConfig, SessionMode};
//!
//! let config = PtyConfig::new()
//!     .cwd("/tmp")
//!     .env("LANG", "C")
//!     .env_remove("TERM")
//!     .window(120, 40)
//!     .session(SessionMode::NewSession);
//! assert_eq!(config.window.to_string(), "120x40");
//! ```

use std::collections::BTreeMap;
use std::ffi::OsString;
use std::fmt;
use std::path::PathBuf;

/// Process-group placement of a PTY child.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionMode {
    /// Stay in the caller's session and process group.
    Inherit,
    /// `setsid` without acquiring a controlling terminal.
    NewSession,
    /// `setsid`, then make the slave the controlling terminal.
    #[default]
    ControllingTerminal,
}

impl SessionMode {
    /// Whether the child leads its own process group.
    #[must_use]
    pub const fn leads_group(self) -> bool {
        !matches!(self, Self::Inherit)
    }
}

/// Terminal dimensions in character cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowSize {
    /// Columns.
    pub cols: u16,
    /// Rows.
    pub rows: u16,
}

impl WindowSize {
    /// A `cols` by `rows` window.
    #[must_use]
    pub const fn new(cols: u16, rows: u16) -> Self {
        Self { cols, rows }
    }
}

impl Default for WindowSize {
    fn default() -> Self {
        Self::new(80, 24)
    }
}

impl fmt::Display for WindowSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.cols, self.rows)
    }
}

/// Spawn settings for a PTY child.
#[derive(Debug, Clone, Default)]
pub struct PtyConfig {
    /// Working directory; `None` keeps the caller's.
    pub cwd: Option<PathBuf>,
    /// Start from an empty environment instead of the caller's.
    pub clear_env: bool,
    /// Per-variable overrides. `None` removes the variable.
    pub env: BTreeMap<OsString, Option<OsString>>,
    /// Initial window size.
    pub window: WindowSize,
    /// Session placement.
    pub session: SessionMode,
}

impl PtyConfig {
    /// Inherit everything, 80x24, own session with controlling terminal.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Run in `dir`.
    #[must_use]
    pub fn cwd(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cwd = Some(dir.into());
        self
    }

    /// Set a variable.
    #[must_use]
    pub fn env(mut self, key: impl Into<OsString>, value: impl Into<OsString>) -> Self {
        self.env.insert(key.into(), Some(value.into()));
        self
    }

    /// Remove a variable, whether inherited or set earlier.
    #[must_use]
    pub fn env_remove(mut self, key: impl Into<OsString>) -> Self {
        self.env.insert(key.into(), None);
        self
    }

    /// Drop the inherited environment.
    #[must_use]
    pub const fn env_clear(mut self) -> Self {
        self.clear_env = true;
        self
    }

    /// Set the initial window size.
    #[must_use]
    pub const fn window(mut self, cols: u16, rows: u16) -> Self {
        self.window = WindowSize::new(cols, rows);
        self
    }

    /// Set the session placement.
    #[must_use]
    pub const fn session(mut self, mode: SessionMode) -> Self {
        self.session = mode;
        self
    }

    /// The complete environment the child starts with.
    #[must_use]
    pub fn child_env(&self) -> BTreeMap<OsString, OsString> {
        let mut env: BTreeMap<_, _> = if self.clear_env {
            BTreeMap::new()
        } else {
            std::env::vars_os().collect()
        };

        for (key, value) in &self.env {
            match value {
                Some(value) => env.insert(key.clone(), value.clone()),
                None => env.remove(key),
            };
        }
        env
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn defaults() {
        let config = PtyConfig::new();
        assert_eq!(config.window, WindowSize::new(80, 24));
        assert_eq!(config.session, SessionMode::ControllingTerminal);
        assert!(config.session.leads_group());
        assert!(!SessionMode::Inherit.leads_group());
    }

    #[test]
    fn cleared_env_holds_only_overrides() {
        let env = PtyConfig::new().env_clear().env("ONLY", "1").child_env();
        assert_eq!(env.len(), 1);
        assert_eq!(env.get(&OsString::from("ONLY")), Some(&OsString::from("1")));
    }

    #[test]
    fn later_override_wins() {
        let env = PtyConfig::new()
            .env_clear()
            .env_remove("K")
            .env("K", "v")
            .child_env();
        assert_eq!(env.get(&OsString::from("K")), Some(&OsString::from("v")));
    }

    proptest! {
        #[test]
        fn removed_keys_never_survive(key in "[A-Z_]{1,12}", value in "[a-z0-9]{0,8}") {
            let env = PtyConfig::new()
                .env(key.clone(), value)
                .env_remove(key.clone())
                .child_env();
            prop_assert!(!env.contains_key(&OsString::from(key)));
        }
    }
}
