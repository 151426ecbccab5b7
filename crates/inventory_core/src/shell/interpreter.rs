//! Interpreter loop over line-oriented input.
//!
//! # Invariants
//! - One input line maps to at most one store operation.
//! - Only output-sink failures escape as `io::Error`.

use super::presentation::{self, EXITING, INVALID_COMMAND, ITEM_SAVED, PROMPT};
use super::ClearScreen;
use crate::command::parse::{parse_command, Command};
use crate::store::RecordStore;
use log::{debug, info, warn};
use std::io::{self, BufRead, Write};

/// What the caller should do after one executed line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// Why [`Interpreter::run`] returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    /// The user typed `exit`.
    ExitCommand,
    /// The input stream closed.
    EndOfInput,
}

/// Read-parse-dispatch loop bound to one store, output sink and display.
pub struct Interpreter<S, W, C> {
    store: S,
    out: W,
    screen: C,
}

impl<S: RecordStore, W: Write, C: ClearScreen> Interpreter<S, W, C> {
    pub fn new(store: S, out: W, screen: C) -> Self {
        Self { store, out, screen }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Prompts, reads and executes lines until `exit` or end of input.
    ///
    /// # Errors
    /// - Returns an error only when writing to the output sink or reading
    ///   from `input` fails for a reason other than undecodable text.
    pub fn run<R: BufRead>(&mut self, mut input: R) -> io::Result<SessionEnd> {
        info!("event=session_start module=shell status=ok");
        let mut line = String::new();

        loop {
            write!(self.out, "{PROMPT}")?;
            self.out.flush()?;

            line.clear();
            match input.read_line(&mut line) {
                Ok(0) => {
                    writeln!(self.out)?;
                    info!("event=session_end module=shell status=ok reason=end_of_input");
                    return Ok(SessionEnd::EndOfInput);
                }
                Ok(_) => {}
                Err(err) if err.kind() == io::ErrorKind::InvalidData => {
                    warn!("event=read_line module=shell status=rejected error_code=invalid_utf8");
                    presentation::write_error(&mut self.out, &err)?;
                    continue;
                }
                Err(err) => return Err(err),
            }

            if self.execute(&line)? == Flow::Exit {
                info!("event=session_end module=shell status=ok reason=exit_command");
                return Ok(SessionEnd::ExitCommand);
            }
        }
    }

    /// Parses and dispatches a single input line.
    pub fn execute(&mut self, line: &str) -> io::Result<Flow> {
        match parse_command(line) {
            Ok(command) => self.dispatch(command),
            Err(err) => {
                warn!(
                    "event=command module=shell status=rejected error_code={}",
                    err.code()
                );
                presentation::write_error(&mut self.out, &err)?;
                Ok(Flow::Continue)
            }
        }
    }

    fn dispatch(&mut self, command: Command) -> io::Result<Flow> {
        match command {
            Command::ItemAdd(record) => match self.store.add(record) {
                Ok(()) => writeln!(self.out, "{ITEM_SAVED}")?,
                Err(err) => {
                    warn!(
                        "event=command module=shell status=error command=itemadd error_code={}",
                        err.code()
                    );
                    presentation::write_error(&mut self.out, &err)?;
                }
            },
            Command::ItemsList => {
                debug!(
                    "event=command module=shell status=ok command=itemslist records={}",
                    self.store.len()
                );
                presentation::write_listing(&mut self.out, &self.store.list())?;
            }
            Command::Help => presentation::write_help(&mut self.out)?,
            Command::Clear => self.screen.clear(&mut self.out)?,
            Command::Exit => {
                writeln!(self.out, "{EXITING}")?;
                return Ok(Flow::Exit);
            }
            Command::Empty => {}
            Command::Unknown(_) => {
                debug!("event=command module=shell status=unknown");
                writeln!(self.out, "{INVALID_COMMAND}")?;
            }
        }
        Ok(Flow::Continue)
    }
}
