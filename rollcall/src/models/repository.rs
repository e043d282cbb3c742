use std::collections::BTreeMap;

use chrono::NaiveDateTime;
use tracing::{debug, info};

use super::{
    event::{Event, EventBuilder, EventField, EventStatus},
    id::IdCounter,
    ledger, Attendee, AttendeeId, EventId,
};
use crate::error::{Error, Result};

/// Order in which [`EventRepository::list`] yields events.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum ListOrder {
    /// Ascending start time, ties kept in registration order.
    #[default]
    Chronological,
    /// Registration order.
    Insertion,
}

/// The in-memory event collection together with every attendee that holds a
/// confirmation on one of its events.
///
/// Positions taken by [`update`](Self::update), [`remove`](Self::remove) and
/// [`resolve`](Self::resolve) are zero-based indices into the chronological
/// listing, the same one a user is shown.
#[derive(Debug, Default, Clone)]
pub struct EventRepository {
    pub(crate) events: Vec<Event>,
    pub(crate) attendees: BTreeMap<AttendeeId, Attendee>,
    pub(crate) event_ids: IdCounter,
    pub(crate) attendee_ids: IdCounter,
}
impl EventRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Registers a new event. Registration never deduplicates: two identical
    /// builders produce two events with distinct ids.
    pub fn add(&mut self, event: EventBuilder) -> EventId {
        let id = EventId(self.event_ids.next());
        let event = event.build(id);
        info!(event = %id, name = %event.name, "registered event");
        self.events.push(event);
        id
    }

    pub fn list(&self, order: ListOrder) -> Vec<&Event> {
        let mut events: Vec<&Event> = self.events.iter().collect();
        if order == ListOrder::Chronological {
            // stable, so equal start times keep registration order
            events.sort_by_key(|e| e.start_time);
        }
        events
    }

    /// Events whose status at `now` is `status`, chronologically.
    pub fn filter_by_status(&self, status: EventStatus, now: NaiveDateTime) -> Vec<&Event> {
        self.list(ListOrder::Chronological)
            .into_iter()
            .filter(|e| e.status(now) == status)
            .collect()
    }

    pub fn get(&self, id: EventId) -> Option<&Event> {
        self.events.iter().find(|e| e.id == id)
    }
    pub fn get_mut(&mut self, id: EventId) -> Option<&mut Event> {
        self.events.iter_mut().find(|e| e.id == id)
    }

    /// Maps a chronological position to the id of the event shown there.
    pub fn resolve(&self, index: usize) -> Result<EventId> {
        self.list(ListOrder::Chronological)
            .get(index)
            .map(|e| e.id)
            .ok_or(Error::IndexOutOfRange {
                index,
                len: self.events.len(),
            })
    }
    /// Chronological position of an event, if it is still registered.
    pub fn position_of(&self, id: EventId) -> Option<usize> {
        self.list(ListOrder::Chronological)
            .iter()
            .position(|e| e.id == id)
    }

    /// Changes a single field of the event at `index`.
    ///
    /// The position is checked first, then the field name, then the value;
    /// the event is only written once all three are valid.
    pub fn update(&mut self, index: usize, field: &str, value: &str) -> Result<()> {
        let id = self.resolve(index)?;
        let field: EventField = field.parse()?;
        let len = self.events.len();
        let event = self
            .get_mut(id)
            .ok_or(Error::IndexOutOfRange { index, len })?;
        event.set_field(field, value)?;
        debug!(event = %id, %field, "updated event");
        Ok(())
    }

    /// Deletes the event at `index` and drops it from every attendee that
    /// had confirmed it.
    pub fn remove(&mut self, index: usize) -> Result<Event> {
        let id = self.resolve(index)?;
        let attendees = self
            .get(id)
            .map(|e| e.attendees.clone())
            .unwrap_or_default();
        for attendee in attendees {
            ledger::detach(self, attendee, id);
        }
        let position = self
            .events
            .iter()
            .position(|e| e.id == id)
            .ok_or(Error::IndexOutOfRange {
                index,
                len: self.events.len(),
            })?;
        let event = self.events.remove(position);
        info!(event = %id, name = %event.name, "removed event");
        Ok(event)
    }

    /// Creates an attendee record with a fresh id.
    pub fn register_attendee(&mut self, name: &str, email: &str, city: &str) -> AttendeeId {
        let id = AttendeeId(self.attendee_ids.next());
        self.attendees
            .insert(id, Attendee::new(id, name, email, city));
        debug!(attendee = %id, "registered attendee");
        id
    }
    /// Looks up a known attendee by name and email.
    pub fn find_attendee(&self, name: &str, email: &str) -> Option<&Attendee> {
        self.attendees
            .values()
            .find(|a| a.is_same_person(name, email))
    }
    pub fn attendee(&self, id: AttendeeId) -> Option<&Attendee> {
        self.attendees.get(&id)
    }
    pub fn attendees(&self) -> impl Iterator<Item = &Attendee> {
        self.attendees.values()
    }
}
