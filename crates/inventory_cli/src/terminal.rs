//! Terminal implementation of the clear-screen capability.

use crossterm::cursor::MoveTo;
use crossterm::terminal::{Clear, ClearType};
use crossterm::QueueableCommand;
use inventory_core::ClearScreen;
use std::io::{self, Write};

/// Clears the visible screen with terminal control sequences and homes the cursor.
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalScreen;

impl ClearScreen for TerminalScreen {
    fn clear<W: Write>(&mut self, out: &mut W) -> io::Result<()> {
        out.queue(Clear(ClearType::All))?.queue(MoveTo(0, 0))?;
        out.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::TerminalScreen;
    use inventory_core::ClearScreen;

    #[test]
    fn clear_emits_erase_and_home_sequences() {
        let mut out = Vec::new();
        TerminalScreen.clear(&mut out).expect("writing to a Vec cannot fail");

        let written = String::from_utf8(out).expect("control sequences are ASCII");
        assert!(written.contains("\x1b[2J"));
        assert!(written.contains("\x1b[1;1H"));
    }
}
