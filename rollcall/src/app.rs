//! The application state a front end drives.
//!
//! [`AppState`] owns the repository and the [`Database`] it came from, and
//! exposes every operation in terms of the positions a user sees on screen.
//! Nothing here is global; front ends hold an `AppState` and pass it around.

use chrono::{Local, NaiveDateTime};
use tracing::{info, warn};

use crate::{
    error::{Error, Result},
    models::{
        event::parse_date_time, ledger, Attendee, AttendeeId, Category, Database, Event,
        EventBuilder, EventId, EventRepository, EventStatus, ListOrder,
    },
};

/// One row of the event listing.
#[derive(Debug, Clone, Copy)]
pub struct Listing<'a> {
    /// Zero-based chronological position, the index other operations take.
    pub position: usize,
    pub event: &'a Event,
    pub status: EventStatus,
}

/// Event fields as typed by a user, before validation.
#[derive(Debug, Default, Clone)]
pub struct EventForm {
    pub name: String,
    pub address: String,
    pub category: String,
    pub start_time: String,
    pub description: String,
}
impl EventForm {
    fn into_builder(self) -> Result<EventBuilder> {
        let category: Category = self.category.parse()?;
        let start_time = parse_date_time(&self.start_time)?;
        Ok(EventBuilder::new(&self.name, start_time)
            .address(&self.address)
            .category(category)
            .description(&self.description))
    }
}

#[derive(Debug)]
pub struct AppState {
    repo: EventRepository,
    db: Database,
}
impl AppState {
    pub fn new(db: Database, repo: EventRepository) -> Self {
        Self { repo, db }
    }

    /// Loads the data file behind `db`. Load failures are logged and leave
    /// the application with an empty collection.
    pub fn load(db: Database) -> Self {
        let repo = match db.load() {
            Ok(repo) => repo,
            Err(e @ Error::CorruptData(_)) => {
                warn!(path = %db.path().display(), error = %e, "ignoring unreadable data file");
                EventRepository::new()
            }
            Err(e) => {
                warn!(path = %db.path().display(), error = %e, "could not read data file");
                EventRepository::new()
            }
        };
        Self::new(db, repo)
    }

    pub fn save(&self) -> Result<()> {
        self.db.save(&self.repo)
    }

    pub fn repository(&self) -> &EventRepository {
        &self.repo
    }

    /// Resumes the attendee with this name and email if one was saved,
    /// otherwise creates a new one.
    pub fn sign_in(&mut self, name: &str, email: &str, city: &str) -> AttendeeId {
        if let Some(known) = self.repo.find_attendee(name, email) {
            info!(attendee = %known.id, "welcome back");
            return known.id;
        }
        self.repo.register_attendee(name, email, city)
    }
    pub fn attendee(&self, id: AttendeeId) -> Option<&Attendee> {
        self.repo.attendee(id)
    }

    pub fn list_events(&self) -> Vec<Listing<'_>> {
        self.list_events_at(Local::now().naive_local())
    }
    pub fn list_events_at(&self, now: NaiveDateTime) -> Vec<Listing<'_>> {
        self.repo
            .list(ListOrder::Chronological)
            .into_iter()
            .enumerate()
            .map(|(position, event)| Listing {
                position,
                event,
                status: event.status(now),
            })
            .collect()
    }
    pub fn event_at(&self, index: usize) -> Result<&Event> {
        let id = self.repo.resolve(index)?;
        self.repo.get(id).ok_or(Error::IndexOutOfRange {
            index,
            len: self.repo.len(),
        })
    }

    pub fn add_event(&mut self, form: EventForm) -> Result<EventId> {
        let builder = form.into_builder()?;
        Ok(self.repo.add(builder))
    }
    pub fn update_event(&mut self, index: usize, field: &str, value: &str) -> Result<()> {
        self.repo.update(index, field, value)
    }
    pub fn remove_event(&mut self, index: usize) -> Result<Event> {
        self.repo.remove(index)
    }

    /// Confirms `attendee` for the event at chronological position `index`.
    /// Returns `false` if the confirmation already existed.
    pub fn confirm_attendance(&mut self, attendee: AttendeeId, index: usize) -> Result<bool> {
        let event = self.repo.resolve(index)?;
        Ok(ledger::confirm(&mut self.repo, attendee, event))
    }
    /// Cancels the `index`-th entry of [`my_events`](Self::my_events).
    pub fn cancel_attendance(&mut self, attendee: AttendeeId, index: usize) -> Result<Event> {
        let mine = self.my_events(attendee);
        let event = mine.get(index).map(|e| (*e).clone()).ok_or(Error::IndexOutOfRange {
            index,
            len: mine.len(),
        })?;
        ledger::cancel(&mut self.repo, attendee, event.id);
        Ok(event)
    }
    pub fn my_events(&self, attendee: AttendeeId) -> Vec<&Event> {
        ledger::confirmed_events(&self.repo, attendee)
    }
}
