//! Nested subcommands, each with its own version and debug flag.
//!
//! e.g. `sample3-subs -d sub -d subsub -d`

use clap::Command;
use cliutils::{CommonOpts, is_debug};

fn cli() -> Command {
    let subsub = CommonOpts::new("3.3.3").apply(Command::new("subsub"));

    let sub = CommonOpts::new("2.2.2").apply(
        Command::new("sub")
            .subcommand_required(true)
            .arg_required_else_help(true)
            .subcommand(subsub),
    );

    CommonOpts::new("1.1.1").apply(
        Command::new("sample3-subs")
            .subcommand_required(true)
            .arg_required_else_help(true)
            .subcommand(sub),
    )
}

fn main() {
    let matches = cli().get_matches();
    if is_debug(&matches) {
        println!("[DEBUG] command.name = 'sample3-subs'");
    }

    if let Some(("sub", sub)) = matches.subcommand() {
        if is_debug(sub) {
            println!("[DEBUG] command.name =   'sub'");
        }

        if let Some(("subsub", subsub)) = sub.subcommand() {
            if is_debug(subsub) {
                println!("[DEBUG] command.name =     'subsub'");
            }

            println!("Hello, world");
        }
    }
}
