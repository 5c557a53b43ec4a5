use std::process::ExitCode;

use clap::Parser;
use sp_onboard::{cli::Cli, logging};

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = logging::init(cli.verbose) {
        eprintln!("Failed to initialize logging: {e}");
        return ExitCode::FAILURE;
    }

    match cli.execute() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            // Alternate form prints the whole context chain
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
