//! Fixed user-facing text for the interactive session.

use crate::command::parse::ITEMADD_USAGE;
use crate::model::record::Record;
use crate::store::{Listing, LoadReport};
use std::io::{self, Write};

const RULE: &str = "--------------------------------------";

pub const PROMPT: &str = "\nEnter a command> ";
pub const NO_RECORDS: &str = "No items are recorded yet.";
pub const ITEM_SAVED: &str = "Item saved successfully!";
pub const INVALID_COMMAND: &str = "Invalid command. Please try again.";
pub const EXITING: &str = "Exiting the program...";

pub const LOAD_FAILED_NOTICE: &str =
    "Continuing with an empty inventory; new items are still appended to the file.";

// Title row framed by `*`, exactly as wide as the rule.
fn write_boxed_title<W: Write>(out: &mut W, title: &str) -> io::Result<()> {
    let inner = RULE.len() - 2;
    writeln!(out, "{RULE}")?;
    writeln!(out, "*{title:^inner$}*")?;
    writeln!(out, "{RULE}")
}

pub fn write_banner<W: Write>(out: &mut W) -> io::Result<()> {
    write_boxed_title(out, "INVENTORY SYSTEM")?;
    writeln!(out, "Version {}", env!("CARGO_PKG_VERSION"))
}

pub fn write_help<W: Write>(out: &mut W) -> io::Result<()> {
    write_boxed_title(out, "Commands syntaxes")?;
    writeln!(out, "{ITEMADD_USAGE}")?;
    writeln!(out, "itemslist")?;
    writeln!(out, "help")?;
    writeln!(out, "clear | cls")?;
    writeln!(out, "exit")
}

/// Confirms a startup load, noting lines that were dropped.
pub fn write_load_report<W: Write>(out: &mut W, report: &LoadReport) -> io::Result<()> {
    writeln!(out, "Stored Items have been loaded successfully!")?;
    if report.skipped > 0 {
        writeln!(
            out,
            "Warning: skipped {} malformed line(s) in the items file.",
            report.skipped
        )?;
    }
    Ok(())
}

pub fn write_listing<W: Write>(out: &mut W, listing: &Listing) -> io::Result<()> {
    match listing {
        Listing::NoRecords => writeln!(out, "{NO_RECORDS}"),
        Listing::Records(records) => records
            .iter()
            .try_for_each(|record: &Record| writeln!(out, "{record}")),
    }
}

pub fn write_error<W: Write>(out: &mut W, err: &dyn std::error::Error) -> io::Result<()> {
    writeln!(out, "Error: {err}")
}
