//! Full interactive session over one items file.
//!
//! # Invariants
//! - A failed startup load is reported and logged, and the loop still starts
//!   with an empty store bound to the same path.

use super::interpreter::{Interpreter, SessionEnd};
use super::presentation;
use super::ClearScreen;
use crate::store::{CsvRecordStore, RecordStore};
use log::error;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

/// Prints the banner, loads `path`, prints help and runs the command loop.
///
/// # Errors
/// - Returns an error only when the output sink or `input` fails; store
///   errors are shown to the user instead.
pub fn run_session<R, W, C>(
    path: impl Into<PathBuf>,
    input: R,
    mut out: W,
    screen: C,
) -> io::Result<SessionEnd>
where
    R: BufRead,
    W: Write,
    C: ClearScreen,
{
    presentation::write_banner(&mut out)?;

    let mut store = CsvRecordStore::new(path);
    match store.load() {
        Ok(report) => presentation::write_load_report(&mut out, &report)?,
        Err(err) => {
            error!(
                "event=startup_load module=shell status=error error_code={} recovered=true",
                err.code()
            );
            presentation::write_error(&mut out, &err)?;
            writeln!(out, "{}", presentation::LOAD_FAILED_NOTICE)?;
        }
    }
    presentation::write_help(&mut out)?;

    Interpreter::new(store, out, screen).run(input)
}
