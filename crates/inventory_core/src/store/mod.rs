//! Record store contracts and the file-backed implementation.
//!
//! # Responsibility
//! - Define the add/list/load/save contract the interpreter depends on.
//! - Keep file format details inside the persistence boundary.
//!
//! # Invariants
//! - In-memory records are the only authority for duplicate checks; the
//!   backing file is a persisted snapshot and is never queried ad hoc.
//! - Every failed operation leaves the in-memory set unchanged.

use crate::model::record::{Record, RecordId};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

mod csv_store;

pub use csv_store::CsvRecordStore;

pub type StoreResult<T> = Result<T, StoreError>;

/// Store error for persistence and insertion operations.
#[derive(Debug)]
pub enum StoreError {
    /// A record with this id is already known.
    DuplicateId(RecordId),
    /// The backing file could not be opened, read, or written.
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    /// The backing file could not be decoded as delimited text.
    Csv { path: PathBuf, source: csv::Error },
    /// A well-shaped line carried a value that cannot be a record field.
    InvalidData { line: u64, message: String },
}

impl StoreError {
    /// Stable short code used in log events.
    pub fn code(&self) -> &'static str {
        match self {
            Self::DuplicateId(_) => "duplicate_id",
            Self::Io { .. } => "io",
            Self::Csv { .. } => "csv",
            Self::InvalidData { .. } => "invalid_data",
        }
    }
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DuplicateId(id) => write!(f, "Item with ID {id} already exists."),
            Self::Io { path, source } => {
                write!(f, "unable to access `{}`: {source}", path.display())
            }
            Self::Csv { path, source } => {
                write!(f, "malformed delimited data in `{}`: {source}", path.display())
            }
            Self::InvalidData { line, message } => {
                write!(f, "invalid stored item on line {line}: {message}")
            }
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Csv { source, .. } => Some(source),
            Self::DuplicateId(_) | Self::InvalidData { .. } => None,
        }
    }
}

/// Result of [`RecordStore::list`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Listing {
    /// The store holds nothing; callers print a dedicated message.
    NoRecords,
    /// All records sorted by name (case-sensitive), then by id.
    Records(Vec<Record>),
}

/// Counters produced by a successful [`RecordStore::load`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadReport {
    pub loaded: usize,
    /// Lines dropped because they did not have exactly four fields.
    pub skipped: usize,
}

/// Store interface driven by the command interpreter.
pub trait RecordStore {
    /// Inserts a record and persists it.
    fn add(&mut self, record: Record) -> StoreResult<()>;
    fn list(&self) -> Listing;
    /// Replaces in-memory records with the backing file contents.
    fn load(&mut self) -> StoreResult<LoadReport>;
    /// Rewrites the backing file from in-memory records.
    fn save(&self) -> StoreResult<()>;
    fn get(&self, id: RecordId) -> Option<&Record>;
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
