//! Error types for the `rollcall` crate.
//!
//! Every fallible operation returns [`Error`] through the [`Result`] alias.
//! None of them are fatal: a failed operation leaves the repository exactly as
//! it was before the call.

use std::io;

/// Errors raised by repository, persistence and parsing operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A list position outside the bounds of the listing was selected.
    #[error("position {index} is out of range (there are {len} entries)")]
    IndexOutOfRange {
        /// The rejected zero-based position.
        index: usize,
        /// Number of entries at the time of the call.
        len: usize,
    },

    /// The named field is not an editable event field.
    #[error("unknown event field: {0:?}")]
    InvalidField(String),

    /// The text does not name any event category.
    #[error("unknown category: {0:?} (expected one of party, show, sports, cultural, other)")]
    InvalidCategory(String),

    /// The text is not a date-time in `dd/MM/yyyy HH:mm` form.
    #[error("invalid date-time {input:?}, expected dd/MM/yyyy HH:mm")]
    InvalidDateTime {
        /// The rejected input.
        input: String,
        /// Parser diagnostics.
        #[source]
        source: chrono::ParseError,
    },

    /// Reading or writing the data file failed.
    #[error("i/o error: {0}")]
    Io(#[from] io::Error),

    /// The data file exists but does not describe a valid event collection.
    #[error("corrupt data file: {0}")]
    CorruptData(String),
}

/// Shorthand for results carrying [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
