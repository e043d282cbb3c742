use serde::{Deserialize, Serialize};

use super::{AttendeeId, EventId};

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Attendee {
    pub id: AttendeeId,
    pub name: String,
    pub email: String,
    pub city: String,
    pub(crate) confirmed_events: Vec<EventId>,
}
impl Attendee {
    pub fn new(id: AttendeeId, name: &str, email: &str, city: &str) -> Self {
        Self {
            id,
            name: String::from(name),
            email: String::from(email),
            city: String::from(city),
            confirmed_events: Vec::new(),
        }
    }
    /// Events this attendee confirmed, in the order they were confirmed.
    pub fn confirmed_events(&self) -> &[EventId] {
        &self.confirmed_events
    }
    /// Whether this record belongs to the person identified by `name` and `email`.
    /// Emails compare case-insensitively, names exactly (after trimming).
    pub fn is_same_person(&self, name: &str, email: &str) -> bool {
        self.name.trim() == name.trim() && self.email.trim().eq_ignore_ascii_case(email.trim())
    }

    pub(crate) fn add_event(&mut self, event: EventId) -> bool {
        if self.confirmed_events.contains(&event) {
            return false;
        }
        self.confirmed_events.push(event);
        true
    }
    pub(crate) fn remove_event(&mut self, event: EventId) -> bool {
        let before = self.confirmed_events.len();
        self.confirmed_events.retain(|e| *e != event);
        before != self.confirmed_events.len()
    }
}
impl PartialEq for Attendee {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}
impl Eq for Attendee {}
