//! Inventory domain model.
//!
//! # Responsibility
//! - Define the record shape shared by the store and the interpreter.
//!
//! # Invariants
//! - Records are values; identity and uniqueness belong to the store.

pub mod record;
