//! Interactive inventory tracker entry point.
//!
//! # Responsibility
//! - Resolve configuration and start logging.
//! - Hand the items file and stdin/stdout to the core session.
//!
//! # Invariants
//! - Exit code `0` after `exit` or end of input, including sessions whose
//!   startup load failed.
//! - A nonzero exit only happens when the terminal itself cannot be used.

mod args;
mod terminal;

use args::Args;
use clap::Parser;
use inventory_core::{init_logging, run_session};
use log::{error, info};
use std::io;
use std::process::ExitCode;
use terminal::TerminalScreen;

fn main() -> ExitCode {
    let args = Args::parse();
    start_logging(&args);

    match run_session(
        &args.file,
        io::stdin().lock(),
        io::stdout().lock(),
        TerminalScreen,
    ) {
        Ok(end) => {
            info!("event=app_exit module=cli status=ok reason={end:?}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!("event=app_exit module=cli status=error error_code=terminal_io error={err}");
            eprintln!("Error: terminal I/O failed: {err}");
            ExitCode::FAILURE
        }
    }
}

fn start_logging(args: &Args) {
    let cwd = match std::env::current_dir() {
        Ok(cwd) => cwd,
        Err(err) => {
            eprintln!("Warning: file logging disabled: cannot resolve working directory: {err}");
            return;
        }
    };
    if let Err(err) = init_logging(args.log_level(), &args.resolved_log_dir(&cwd)) {
        eprintln!("Warning: file logging disabled: {err}");
    }
}
