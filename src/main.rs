//! KioskView hosts one full-screen web view pointed at a fixed page.
//!
//! Entry point: parses the command line, sets up logging and hands over to
//! the shell. When built without the `gui` feature, prints the resolved
//! configuration instead of opening a window.

use std::process::ExitCode;

use clap::Parser;
use kioskview::cli::{self, Cli};

fn main() -> ExitCode {
    let args = Cli::parse();
    kioskview::logging::init(args.verbose);

    match cli::dispatch(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
