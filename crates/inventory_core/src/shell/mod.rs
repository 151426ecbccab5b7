//! Interactive read-parse-dispatch session.
//!
//! # Responsibility
//! - Drive a [`RecordStore`](crate::store::RecordStore) from textual input.
//! - Render results and recoverable errors for the user.
//!
//! # Invariants
//! - Command and store errors never end a session.
//! - Terminal control goes through [`ClearScreen`], never a host shell.

use std::io::{self, Write};

mod interpreter;
pub mod presentation;
mod session;

pub use interpreter::{Flow, Interpreter, SessionEnd};
pub use session::run_session;

/// Capability to wipe the user's display.
///
/// Implementations write control sequences to `out`; they must not touch
/// inventory data.
pub trait ClearScreen {
    fn clear<W: Write>(&mut self, out: &mut W) -> io::Result<()>;
}
