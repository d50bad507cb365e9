//! `archive-file SRC_FILE`: move a file into an archive directory.

use std::path::PathBuf;
use std::process::ExitCode;

use archive_file::archive;
use chrono::Local;
use clap::{CommandFactory, FromArgMatches, Parser};
use cliutils::{CommonOpts, is_debug, logging};

/// Move a file into the archive directory, renamed with a timestamp and
/// status.
#[derive(Debug, Parser)]
#[command(name = "archive-file")]
struct Args {
    /// File to archive.
    src_file: PathBuf,

    /// status
    #[arg(short, long, default_value = "done")]
    stat: String,

    /// destination directory
    #[arg(short, long, default_value = "archives")]
    dstdir: PathBuf,
}

fn main() -> ExitCode {
    let matches = CommonOpts::new(env!("CARGO_PKG_VERSION"))
        .use_d(false)
        .apply(Args::command())
        .get_matches();
    let args = match Args::from_arg_matches(&matches) {
        Ok(args) => args,
        Err(e) => e.exit(),
    };

    if let Err(e) = logging::init(is_debug(&matches)) {
        eprintln!("warning: {e}");
    }
    tracing::debug!(stat = %args.stat, dstdir = %format!("{}/", args.dstdir.display()), "options");

    println!("file: {}", args.src_file.display());

    match archive(&args.src_file, &args.dstdir, &args.stat, Local::now().naive_local()) {
        Ok(new_path) => {
            println!("Archived '{}' to '{}'", args.src_file.display(), new_path.display());
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!("{e}");
            ExitCode::from(e.exit_code())
        }
    }
}
