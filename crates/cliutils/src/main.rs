//! `cliutils`: demo command tree built on the common options.

use std::process::ExitCode;

use clap::{ArgMatches, Command};
use cliutils::{CommonOpts, VERSION, is_debug, logging};

fn cli() -> Command {
    let opts = CommonOpts::new(VERSION);

    let sub2 = Command::new("sub2")
        .about("Subcommand #2 (command group).")
        .subcommand(Command::new("sub2sub").about("Subcommand of `sub2`."));

    opts.apply(
        Command::new("cliutils")
            .about("CLI top.")
            .subcommand(Command::new("sub1").about("Subcommand #1."))
            .subcommand(sub2),
    )
}

/// Whether any level of the invocation asked for debug output.
/// There is one global subscriber, so `-d` at any level turns on DEBUG for the whole run.
fn any_debug(matches: &ArgMatches) -> bool {
    is_debug(matches) || matches.subcommand().is_some_and(|(_, sub)| any_debug(sub))
}

fn main() -> ExitCode {
    let mut cmd = cli();
    let matches = cmd.get_matches_mut();

    if let Err(e) = logging::init(any_debug(&matches)) {
        eprintln!("{e}");
        return ExitCode::from(2);
    }

    tracing::debug!(command = cmd.get_name(), "command name");
    println!("{}", cmd.get_name());

    let printed = match matches.subcommand() {
        Some(("sub1", _)) => {
            tracing::debug!(command = "sub1", "command name");
            println!("  sub1");
            Ok(())
        }
        Some(("sub2", sub)) => {
            tracing::debug!(command = "sub2", "command name");
            println!("  sub2");
            match sub.subcommand() {
                Some(("sub2sub", _)) => {
                    tracing::debug!(command = "sub2sub", "command name");
                    println!("    sub2sub");
                    Ok(())
                }
                _ => cmd
                    .find_subcommand_mut("sub2")
                    .map_or(Ok(()), Command::print_help),
            }
        }
        _ => cmd.print_help(),
    };

    match printed {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e}");
            ExitCode::FAILURE
        }
    }
}
