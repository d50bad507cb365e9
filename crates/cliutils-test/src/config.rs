//! Configuration types for cliutils-test.
//!
//! [`HarnessConfig`] carries the timing defaults shared by the runner and
//! interactive sessions. Every value can be overridden from the environment
//! (see [`env::vars`]).

pub mod env;

use std::time::Duration;

pub use env::EnvConfig;

/// Default timeout for a non-interactive run.
pub const DEFAULT_RUN_TIMEOUT: Duration = Duration::from_secs(10);

/// Default timeout for one `expect` call.
pub const DEFAULT_EXPECT_TIMEOUT: Duration = Duration::from_secs(5);

/// Default grace period when closing a session.
pub const DEFAULT_CLOSE_TIMEOUT: Duration = Duration::from_secs(3);

/// Default bounded wait per readiness check.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Maximum bytes read from the terminal per readiness event.
pub const READ_CHUNK: usize = 1024;

/// Pause around each step of a scripted exchange.
pub const STEP_PAUSE: Duration = Duration::from_millis(100);

/// Timing configuration for the harness.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HarnessConfig {
    /// Timeout for non-interactive runs.
    pub run_timeout: Duration,
    /// Timeout used by `expect` when none is given.
    pub expect_timeout: Duration,
    /// Grace period used by `close` when none is given.
    pub close_timeout: Duration,
    /// Bounded wait per readiness check in `expect`.
    pub poll_interval: Duration,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            run_timeout: DEFAULT_RUN_TIMEOUT,
            expect_timeout: DEFAULT_EXPECT_TIMEOUT,
            close_timeout: DEFAULT_CLOSE_TIMEOUT,
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }
}

impl HarnessConfig {
    /// Defaults overridden by `CLIUTILS_*` environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_env_config(&EnvConfig::default())
    }

    /// Defaults overridden by the variables visible through `env`.
    #[must_use]
    pub fn from_env_config(env: &EnvConfig) -> Self {
        let defaults = Self::default();
        let poll_interval = env
            .millis(env::vars::POLL_INTERVAL_MS)
            .filter(|d| !d.is_zero())
            .unwrap_or(defaults.poll_interval);

        Self {
            run_timeout: env.secs(env::vars::RUN_TIMEOUT).unwrap_or(defaults.run_timeout),
            expect_timeout: env
                .secs(env::vars::EXPECT_TIMEOUT)
                .unwrap_or(defaults.expect_timeout),
            close_timeout: env
                .secs(env::vars::CLOSE_TIMEOUT)
                .unwrap_or(defaults.close_timeout),
            poll_interval,
        }
    }

    /// Set the run timeout.
    #[must_use]
    pub const fn run_timeout(mut self, timeout: Duration) -> Self {
        self.run_timeout = timeout;
        self
    }

    /// Set the default expect timeout.
    #[must_use]
    pub const fn expect_timeout(mut self, timeout: Duration) -> Self {
        self.expect_timeout = timeout;
        self
    }

    /// Set the default close timeout.
    #[must_use]
    pub const fn close_timeout(mut self, timeout: Duration) -> Self {
        self.close_timeout = timeout;
        self
    }

    /// Set the readiness poll interval.
    #[must_use]
    pub const fn poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }
}
