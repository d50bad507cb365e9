//! Settings read from `CLIUTILS_*` environment variables.

use std::collections::BTreeMap;
use std::str::FromStr;
use std::time::Duration;

/// Prefix of every variable the harness reads.
pub const DEFAULT_PREFIX: &str = "CLIUTILS";

/// Reads `<PREFIX>_<NAME>` variables.
///
/// Values set with [`EnvConfig::with_var`] take precedence over the process
/// environment and never modify it, so tests can use them freely.
#[derive(Debug, Clone)]
pub struct EnvConfig {
    prefix: String,
    overrides: BTreeMap<String, String>,
}

impl Default for EnvConfig {
    fn default() -> Self {
        Self::new(DEFAULT_PREFIX)
    }
}

impl EnvConfig {
    /// A reader for `prefix`. An empty prefix reads bare names.
    #[must_use]
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            overrides: BTreeMap::new(),
        }
    }

    /// Pretend `name` is set to `value`.
    #[must_use]
    pub fn with_var(mut self, name: &str, value: impl Into<String>) -> Self {
        self.overrides.insert(self.key(name), value.into());
        self
    }

    fn key(&self, name: &str) -> String {
        let name = name.to_uppercase();
        if self.prefix.is_empty() {
            name
        } else {
            format!("{}_{name}", self.prefix)
        }
    }

    /// The raw value of `name`.
    #[must_use]
    pub fn raw(&self, name: &str) -> Option<String> {
        let key = self.key(name);
        match self.overrides.get(&key) {
            Some(value) => Some(value.clone()),
            None => std::env::var(&key).ok(),
        }
    }

    /// The value of `name` parsed as `T`; a value that does not parse is
    /// logged and treated as unset.
    #[must_use]
    pub fn parse<T: FromStr>(&self, name: &str) -> Option<T> {
        let raw = self.raw(name)?;
        let parsed = raw.trim().parse().ok();
        if parsed.is_none() {
            tracing::warn!(var = %self.key(name), value = %raw, "ignoring unparseable value");
        }
        parsed
    }

    /// Seconds, fractions allowed. Negative values count as unset.
    #[must_use]
    pub fn secs(&self, name: &str) -> Option<Duration> {
        Duration::try_from_secs_f64(self.parse(name)?).ok()
    }

    /// Whole milliseconds.
    #[must_use]
    pub fn millis(&self, name: &str) -> Option<Duration> {
        self.parse(name).map(Duration::from_millis)
    }
}

/// Names read by [`crate::HarnessConfig::from_env`].
pub mod vars {
    /// `run_command` timeout in seconds.
    pub const RUN_TIMEOUT: &str = "RUN_TIMEOUT";
    /// `expect` timeout in seconds.
    pub const EXPECT_TIMEOUT: &str = "EXPECT_TIMEOUT";
    /// `close` grace period in seconds.
    pub const CLOSE_TIMEOUT: &str = "CLOSE_TIMEOUT";
    /// Poll interval in milliseconds.
    pub const POLL_INTERVAL_MS: &str = "POLL_INTERVAL_MS";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_are_prefixed_and_uppercased() {
        assert_eq!(EnvConfig::new("TEST").key("bar_baz"), "TEST_BAR_BAZ");
        assert_eq!(EnvConfig::new("").key("path"), "PATH");
    }

    #[test]
    fn overrides_shadow_process_env() {
        let config = EnvConfig::new("").with_var("PATH", "/nowhere");
        assert_eq!(config.raw("PATH").as_deref(), Some("/nowhere"));
        assert_eq!(config.raw("CLIUTILS_SURELY_UNSET_4242"), None);
    }

    #[test]
    fn durations() {
        let config = EnvConfig::new("T").with_var("WAIT", " 1.5 ").with_var("POLL", "20");
        assert_eq!(config.secs("WAIT"), Some(Duration::from_millis(1500)));
        assert_eq!(config.millis("POLL"), Some(Duration::from_millis(20)));
    }

    #[test]
    fn bad_values_are_unset() {
        let config = EnvConfig::new("T").with_var("WAIT", "soon").with_var("NEG", "-1");
        assert_eq!(config.secs("WAIT"), None);
        assert_eq!(config.secs("NEG"), None);
        assert_eq!(config.millis("NEG"), None);
    }
}
