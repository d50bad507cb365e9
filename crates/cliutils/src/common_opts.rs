//! Common options for clap commands.
//!
//! [`CommonOpts::apply`] gives a command the same three options every
//! program in this workspace has:
//!
//! ```text
//!   -d, --debug    debug flag
//!   -h, --help     Show this message and exit.
//!   -V, --version  Show the version and exit.
//! ```
//!
//! The short forms `-d` and `-h` can be switched off for programs that need
//! those letters, and `-v` can be added as a second short form of
//! `--version`.
//!
//! # Example
//!
//! ```
//! use clap::Command;
//! use cliutils::{CommonOpts, is_debug};
//!
//! let cmd = CommonOpts::new("0.0.1").apply(Command::new("sample"));
//! let matches = cmd.try_get_matches_from(["sample", "-d"]).unwrap();
//! assert!(is_debug(&matches));
//! ```

use clap::{Arg, ArgAction, ArgMatches, Command};

use crate::version::placeholder_version;

/// Argument id of the debug flag.
pub const DEBUG_ID: &str = "debug";

/// Argument id of the version flag.
pub const VERSION_ID: &str = "version";

/// Argument id of the help flag.
pub const HELP_ID: &str = "help";

/// The common option set and its switches.
#[derive(Debug, Clone)]
pub struct CommonOpts {
    version: String,
    use_h: bool,
    use_d: bool,
    use_v: bool,
}

impl CommonOpts {
    /// Options showing `version`. An empty string shows a placeholder
    /// naming this library.
    pub fn new(version: impl Into<String>) -> Self {
        Self {
            version: version.into(),
            use_h: true,
            use_d: true,
            use_v: false,
        }
    }

    /// Whether `-h` is a short form of `--help` (default: yes).
    #[must_use]
    pub const fn use_h(mut self, value: bool) -> Self {
        self.use_h = value;
        self
    }

    /// Whether `-d` is a short form of `--debug` (default: yes).
    #[must_use]
    pub const fn use_d(mut self, value: bool) -> Self {
        self.use_d = value;
        self
    }

    /// Whether `-v` is a second short form of `--version` (default: no).
    #[must_use]
    pub const fn use_v(mut self, value: bool) -> Self {
        self.use_v = value;
        self
    }

    /// The version text `--version` prints after the program name.
    #[must_use]
    pub fn version(&self) -> String {
        if self.version.is_empty() {
            placeholder_version()
        } else {
            self.version.clone()
        }
    }

    /// Add the common options to `cmd`.
    ///
    /// A command that already declares a version keeps it. Subcommands
    /// that do not carry the options yet get them as well, along with this
    /// version unless they declare their own. Give a
    /// subcommand its own version by applying a separate `CommonOpts` to it
    /// before adding it to the group.
    #[must_use]
    pub fn apply(&self, cmd: Command) -> Command {
        let mut cmd = self.apply_one(cmd);

        let pending: Vec<String> = cmd
            .get_subcommands()
            .filter(|sub| !has_common_opts(sub))
            .map(|sub| sub.get_name().to_string())
            .collect();

        for name in pending {
            cmd = cmd.mut_subcommand(name, |sub| self.apply(sub));
        }
        cmd
    }

    fn apply_one(&self, cmd: Command) -> Command {
        let cmd = if cmd.get_version().is_some() {
            cmd
        } else {
            cmd.version(self.version())
        };

        let mut version_arg = Arg::new(VERSION_ID)
            .long("version")
            .short('V')
            .action(ArgAction::Version)
            .help("Show the version and exit.");
        if self.use_v {
            version_arg = version_arg.visible_short_alias('v');
        }

        let mut debug_arg = Arg::new(DEBUG_ID)
            .long("debug")
            .action(ArgAction::SetTrue)
            .help("debug flag");
        if self.use_d {
            debug_arg = debug_arg.short('d');
        }

        let mut help_arg = Arg::new(HELP_ID)
            .long("help")
            .action(ArgAction::Help)
            .help("Show this message and exit.");
        if self.use_h {
            help_arg = help_arg.short('h');
        }

        cmd.disable_version_flag(true)
            .disable_help_flag(true)
            .disable_help_subcommand(true)
            .arg(version_arg)
            .arg(debug_arg)
            .arg(help_arg)
    }
}

fn has_common_opts(cmd: &Command) -> bool {
    cmd.get_arguments().any(|arg| arg.get_id() == DEBUG_ID)
}

/// Whether `--debug` was given at this command level.
///
/// Returns `false` for matches of a command without the common options.
#[must_use]
pub fn is_debug(matches: &ArgMatches) -> bool {
    matches
        .try_get_one::<bool>(DEBUG_ID)
        .ok()
        .flatten()
        .copied()
        .unwrap_or(false)
}
