//! Textual command parsing for the interactive interpreter.
//!
//! # Responsibility
//! - Own the tokenizer contract and per-field validation of user input.
//! - Keep parsing free of I/O so it can be tested line by line.

pub mod parse;
