//! A plain clap command that awaits one external async call.

use std::process::ExitCode;
use std::time::Duration;

use clap::Command;

async fn fetch_data() -> String {
    tokio::time::sleep(Duration::from_secs(1)).await;
    "data fetched".to_string()
}

fn main() -> ExitCode {
    let _matches = Command::new("sample5")
        .about("Call an external async function from the command line.")
        .get_matches();

    let runtime = match tokio::runtime::Runtime::new() {
        Ok(runtime) => runtime,
        Err(e) => {
            eprintln!("creating tokio runtime: {e}");
            return ExitCode::FAILURE;
        }
    };

    println!("{}", runtime.block_on(fetch_data()));
    ExitCode::SUCCESS
}
