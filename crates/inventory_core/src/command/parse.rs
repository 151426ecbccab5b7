//! Command line tokenizer and argument validation.
//!
//! # Responsibility
//! - Turn one input line into a typed [`Command`].
//! - Validate `itemadd` arguments before the store sees them.
//!
//! # Invariants
//! - Tokens are split on runs of whitespace; no quoting is recognized.
//! - `itemadd` takes exactly four positional arguments:
//!   `<id> <name> <quantity> <date>`. A name therefore cannot hold spaces.
//! - Keywords match case-insensitively; arguments are taken verbatim.

use crate::model::record::{
    parse_registration_date, validate_name, Record, RecordId, RecordValidationError,
};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Usage line for the add command, shared by help text and format errors.
pub const ITEMADD_USAGE: &str = "itemadd <item_id> <item_name> <quantity> <registration_date>";

/// One parsed interpreter intent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Fully validated add request.
    ItemAdd(Record),
    ItemsList,
    Help,
    Clear,
    Exit,
    /// Blank input line.
    Empty,
    /// Anything not recognized, with the keyword as typed.
    Unknown(String),
}

/// Argument errors for recognized commands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    /// `itemadd` was given the wrong number of arguments.
    Usage,
    InvalidId(String),
    InvalidName(RecordValidationError),
    InvalidQuantity(String),
    InvalidDate(String),
}

impl CommandError {
    /// Stable short code used in log events.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Usage => "usage",
            Self::InvalidId(_) => "invalid_id",
            Self::InvalidName(_) => "invalid_name",
            Self::InvalidQuantity(_) => "invalid_quantity",
            Self::InvalidDate(_) => "invalid_date",
        }
    }
}

impl Display for CommandError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Usage => write!(
                f,
                "Invalid format. Enter data in the following format:\n{ITEMADD_USAGE}"
            ),
            Self::InvalidId(value) => {
                write!(f, "Invalid ID `{value}`. Must be a non-negative integer.")
            }
            Self::InvalidName(err) => write!(f, "Invalid item name: {err}."),
            Self::InvalidQuantity(value) => write!(
                f,
                "Invalid quantity `{value}`. Must be a non-negative integer."
            ),
            Self::InvalidDate(value) => write!(
                f,
                "Invalid date `{value}`. Please enter the date in the format YYYY-MM-DD."
            ),
        }
    }
}

impl Error for CommandError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidName(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RecordValidationError> for CommandError {
    fn from(value: RecordValidationError) -> Self {
        Self::InvalidName(value)
    }
}

/// Parses one input line.
///
/// # Errors
/// - [`CommandError::Usage`] when `itemadd` does not get exactly four arguments.
/// - A field-specific variant when an `itemadd` argument fails validation;
///   fields are checked in id, name, quantity, date order.
pub fn parse_command(line: &str) -> Result<Command, CommandError> {
    let mut tokens = line.split_whitespace();
    let Some(keyword) = tokens.next() else {
        return Ok(Command::Empty);
    };
    let args: Vec<&str> = tokens.collect();

    let command = match keyword.to_ascii_lowercase().as_str() {
        "itemadd" => return parse_item_add(&args),
        "itemslist" if args.is_empty() => Command::ItemsList,
        "help" if args.is_empty() => Command::Help,
        "clear" | "cls" if args.is_empty() => Command::Clear,
        "exit" if args.is_empty() => Command::Exit,
        _ => Command::Unknown(keyword.to_string()),
    };
    Ok(command)
}

fn parse_item_add(args: &[&str]) -> Result<Command, CommandError> {
    let [id, name, quantity, date] = args else {
        return Err(CommandError::Usage);
    };

    let id = id
        .parse::<RecordId>()
        .map_err(|_| CommandError::InvalidId((*id).to_string()))?;
    validate_name(name)?;
    let quantity = quantity
        .parse::<u64>()
        .map_err(|_| CommandError::InvalidQuantity((*quantity).to_string()))?;
    let date =
        parse_registration_date(date).ok_or_else(|| CommandError::InvalidDate((*date).to_string()))?;

    Ok(Command::ItemAdd(Record::new(id, *name, quantity, date)?))
}
