//! Calling async code from a synchronous entry point.
//!
//! ```text
//!  func1()
//!    |    func2()
//!    |      |    func3()
//!    |      |      |
//!  2 sec  1 sec  1.5 sec
//!    |      |      |
//!    |     done    |
//!    |            done
//!   done
//! ```

use std::process::ExitCode;
use std::time::Duration;

use clap::Command;
use cliutils::{CommonOpts, is_debug, logging};
use tokio::runtime::Builder;
use tokio::time::sleep;

async fn func1() {
    println!(" func1 start ..");
    sleep(Duration::from_secs(2)).await;
    println!(" func1 done.");
}

async fn func2() {
    println!("  func2 start ..");
    sleep(Duration::from_secs(1)).await;
    println!("  func2 done.");
}

async fn func3() {
    println!("    func3 start ..");
    sleep(Duration::from_millis(1500)).await;
    println!("    func3 done.");
}

async fn async_main(name: &str, debug: bool) -> &'static str {
    if debug {
        println!("[DEBUG] async_main> command.name = '{name}'");
        println!("[DEBUG] async_main> call async functions ..");
    }

    tokio::join!(func1(), func2(), func3());
    tracing::debug!("all tasks joined");

    if debug {
        println!("[DEBUG] async_main> all done.");
    }
    "done"
}

fn main() -> ExitCode {
    let cmd = CommonOpts::new("4.0.0")
        .apply(Command::new("sample4-async").about("Run three async tasks and wait for all of them."));
    let name = cmd.get_name().to_string();
    let matches = cmd.get_matches();
    let debug = is_debug(&matches);

    if let Err(e) = logging::init(debug) {
        eprintln!("warning: {e}");
    }

    println!("main> call async_main()");

    let runtime = match Builder::new_current_thread().enable_all().build() {
        Ok(runtime) => runtime,
        Err(e) => {
            tracing::error!("creating tokio runtime: {e}");
            return ExitCode::FAILURE;
        }
    };
    let result = runtime.block_on(async_main(&name, debug));

    println!("main> result from async_main(): {result}");
    ExitCode::SUCCESS
}
