//! Inventory record domain model.
//!
//! # Responsibility
//! - Define the immutable value stored for one inventory entry.
//! - Own field-level rules shared by command input and file loading.
//!
//! # Invariants
//! - `name` is non-empty and contains neither whitespace nor `,`.
//! - `registration_date` is a real calendar date rendered as `YYYY-MM-DD`.
//! - A `Record` cannot be mutated after construction.

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Numeric key of an inventory entry.
///
/// Uniqueness is enforced by the owning store, not by this type.
pub type RecordId = u64;

/// Field delimiter of the backing file.
pub const FIELD_DELIMITER: char = ',';

/// Textual form of registration dates, for both input and storage.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

static DATE_SHAPE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("valid date shape regex"));

/// Field-level validation errors for [`Record`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordValidationError {
    EmptyName,
    NameContainsWhitespace(String),
    NameContainsDelimiter(String),
}

impl Display for RecordValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyName => write!(f, "item name must not be empty"),
            Self::NameContainsWhitespace(name) => {
                write!(f, "item name `{name}` must not contain whitespace")
            }
            Self::NameContainsDelimiter(name) => {
                write!(f, "item name `{name}` must not contain `{FIELD_DELIMITER}`")
            }
        }
    }
}

impl Error for RecordValidationError {}

/// One inventory entry.
///
/// Field order matters: the serialized form is the on-disk column order
/// `id,name,quantity,date`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Record {
    id: RecordId,
    name: String,
    quantity: u64,
    registration_date: NaiveDate,
}

impl Record {
    /// Creates a record after checking the name rules.
    ///
    /// # Errors
    /// - Returns [`RecordValidationError`] when `name` is empty or contains
    ///   whitespace or the file delimiter.
    pub fn new(
        id: RecordId,
        name: impl Into<String>,
        quantity: u64,
        registration_date: NaiveDate,
    ) -> Result<Self, RecordValidationError> {
        let name = name.into();
        validate_name(&name)?;
        Ok(Self {
            id,
            name,
            quantity,
            registration_date,
        })
    }

    pub fn id(&self) -> RecordId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn quantity(&self) -> u64 {
        self.quantity
    }

    pub fn registration_date(&self) -> NaiveDate {
        self.registration_date
    }
}

impl Display for Record {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Item ID: {}    Item Name: {}    Quantity: {}    Reg Date: {}",
            self.id,
            self.name,
            self.quantity,
            self.registration_date.format(DATE_FORMAT)
        )
    }
}

/// Checks the free-text name rules without building a record.
pub fn validate_name(name: &str) -> Result<(), RecordValidationError> {
    if name.is_empty() {
        return Err(RecordValidationError::EmptyName);
    }
    if name.chars().any(char::is_whitespace) {
        return Err(RecordValidationError::NameContainsWhitespace(
            name.to_string(),
        ));
    }
    if name.contains(FIELD_DELIMITER) {
        return Err(RecordValidationError::NameContainsDelimiter(
            name.to_string(),
        ));
    }
    Ok(())
}

/// Parses a strict `YYYY-MM-DD` calendar date.
///
/// Returns `None` for any other shape (`2024-1-5`, surrounding spaces) and for
/// dates that do not exist (`2024-02-30`, `2024-13-40`).
pub fn parse_registration_date(value: &str) -> Option<NaiveDate> {
    if !DATE_SHAPE_RE.is_match(value) {
        return None;
    }
    NaiveDate::parse_from_str(value, DATE_FORMAT).ok()
}
