//! Prints `hanging` and never exits on its own.

use std::io::{self, Write};
use std::sync::Arc;
use std::sync::atomic::AtomicBool;
use std::thread;
use std::time::Duration;

use clap::Parser;
use signal_hook::consts::SIGTERM;

#[derive(Debug, Parser)]
#[command(name = "test-hang", about = "Hang until killed")]
struct Args {
    /// Keep running after SIGTERM.
    #[arg(long)]
    ignore_term: bool,
}

fn main() -> io::Result<()> {
    let args = Args::parse();

    // A registered handler replaces the default action, so TERM only sets the flag.
    let terminated = Arc::new(AtomicBool::new(false));
    if args.ignore_term {
        signal_hook::flag::register(SIGTERM, Arc::clone(&terminated))?;
    }

    let mut out = io::stdout();
    writeln!(out, "hanging")?;
    out.flush()?;

    loop {
        thread::sleep(Duration::from_secs(60));
    }
}
