//! Attendance bookkeeping between attendees and events.
//!
//! Membership is stored twice, once on each side, and every function here
//! updates both sides together. Nothing in this module fails: asking for a
//! membership that already exists, or removing one that doesn't, is a no-op.

use tracing::debug;

use super::{repository::EventRepository, AttendeeId, Event, EventId};

/// Records that `attendee` will attend `event`. Returns whether anything
/// changed.
pub fn confirm(repo: &mut EventRepository, attendee: AttendeeId, event: EventId) -> bool {
    let Some(ev) = repo.events.iter_mut().find(|e| e.id == event) else {
        debug!(%attendee, %event, "confirm on unknown event ignored");
        return false;
    };
    let Some(person) = repo.attendees.get_mut(&attendee) else {
        debug!(%attendee, %event, "confirm by unknown attendee ignored");
        return false;
    };
    let changed = person.add_event(event) | ev.add_attendee(attendee);
    if changed {
        debug!(%attendee, %event, "attendance confirmed");
    }
    changed
}

/// Withdraws `attendee` from `event`. Returns whether anything changed.
pub fn cancel(repo: &mut EventRepository, attendee: AttendeeId, event: EventId) -> bool {
    let mut changed = false;
    if let Some(ev) = repo.events.iter_mut().find(|e| e.id == event) {
        changed |= ev.remove_attendee(attendee);
    }
    if let Some(person) = repo.attendees.get_mut(&attendee) {
        changed |= person.remove_event(event);
    }
    if changed {
        debug!(%attendee, %event, "attendance cancelled");
    }
    changed
}

/// Cuts the link between `attendee` and an event that is about to be deleted.
pub fn detach(repo: &mut EventRepository, attendee: AttendeeId, event: EventId) -> bool {
    cancel(repo, attendee, event)
}

pub fn is_confirmed(repo: &EventRepository, attendee: AttendeeId, event: EventId) -> bool {
    repo.attendee(attendee)
        .is_some_and(|a| a.confirmed_events.contains(&event))
}

/// The events `attendee` confirmed, in confirmation order.
pub fn confirmed_events(repo: &EventRepository, attendee: AttendeeId) -> Vec<&Event> {
    repo.attendee(attendee)
        .map(|a| {
            a.confirmed_events
                .iter()
                .filter_map(|id| repo.get(*id))
                .collect()
        })
        .unwrap_or_default()
}
