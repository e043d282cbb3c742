//! Rollcall keeps a list of events and tracks who confirmed attendance.
//!
//! Everything lives in memory while the program runs and is written to a
//! single file when it stops, see [`Database`]. The file is plain [`.ron`],
//! human readable but not meant to be edited by hand: a file whose attendee
//! links don't match is rejected as corrupt.
//!
//! [`EventRepository`] holds the events in registration order and lists them
//! by start time. Positions passed to its operations are positions in that
//! chronological listing, the same numbers a user is shown.
//!
//! The [`ledger`] module keeps attendance symmetric: an attendee's confirmed
//! events and an event's attendees always change together.
//!
//! [`AppState`] ties a repository to its data file and is what a front end
//! such as the `rollcall` console shell drives.
//!
//! To see it in action look at `examples/basic_usage.rs` in this crate.
//!
//! [`Database`]: crate::models::Database
//! [`EventRepository`]: crate::models::EventRepository
//! [`ledger`]: crate::models::ledger
//! [`AppState`]: crate::app::AppState
//! [`.ron`]: https://github.com/ron-rs/ron

pub mod app;
pub mod config;
mod error;
/// Events, attendees and the collection that holds them.
pub mod models;

pub use self::error::{Error, Result};
