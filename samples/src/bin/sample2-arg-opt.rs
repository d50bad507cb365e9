//! Own arguments and options next to the common ones.

use clap::{CommandFactory, FromArgMatches, Parser};
use cliutils::{CommonOpts, is_debug};

#[derive(Debug, Parser)]
#[command(name = "sample2-arg-opt")]
struct Args {
    /// Any number of positional arguments.
    arg1: Vec<String>,

    /// An option with a value.
    #[arg(short, long)]
    opt1: Option<String>,
}

fn main() {
    let cmd = CommonOpts::new("0.0.2").apply(Args::command());
    let name = cmd.get_name().to_string();
    let matches = cmd.get_matches();
    let args = Args::from_arg_matches(&matches).unwrap_or_else(|e| e.exit());

    if is_debug(&matches) {
        println!("[DEBUG] command.name = '{name}'");
    }

    println!("arg1 = '{:?}'", args.arg1);
    println!("opt1 = '{}'", args.opt1.as_deref().unwrap_or("None"));
}
