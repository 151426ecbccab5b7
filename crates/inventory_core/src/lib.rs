//! Core logic for the inventory tracker.
//! This crate owns record rules, file persistence and the command session.

pub mod command;
pub mod logging;
pub mod model;
pub mod shell;
pub mod store;

pub use command::parse::{parse_command, Command, CommandError, ITEMADD_USAGE};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::record::{
    parse_registration_date, Record, RecordId, RecordValidationError, DATE_FORMAT,
    FIELD_DELIMITER,
};
pub use shell::{run_session, ClearScreen, Flow, Interpreter, SessionEnd};
pub use store::{CsvRecordStore, Listing, LoadReport, RecordStore, StoreError, StoreResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
