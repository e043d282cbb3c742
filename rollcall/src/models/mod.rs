mod attendee;
mod database;
pub mod event;
mod id;
pub mod ledger;
mod repository;

pub use self::attendee::Attendee;
pub use self::database::Database;
pub use self::event::{Category, Event, EventBuilder, EventField, EventStatus};
pub use self::id::{AttendeeId, EventId};
pub use self::repository::{EventRepository, ListOrder};
