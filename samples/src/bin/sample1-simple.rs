//! The smallest program using the common options.
//!
//! ```text
//! Options:
//!   -V, --version  Show the version and exit.
//!   -d, --debug    debug flag
//!   -h, --help     Show this message and exit.
//! ```

use clap::Command;
use cliutils::{CommonOpts, is_debug};

fn main() {
    let cmd = CommonOpts::new("0.0.1").apply(Command::new("sample1-simple"));
    let name = cmd.get_name().to_string();
    let matches = cmd.get_matches();

    if is_debug(&matches) {
        println!("[DEBUG] command.name = '{name}'");
    }

    println!("Hello, world!");
}
