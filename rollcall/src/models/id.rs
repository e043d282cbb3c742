use std::fmt::Display;

use serde::{Deserialize, Serialize};

#[derive(
    Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct AttendeeId(pub u64);

impl Display for AttendeeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
#[derive(
    Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct EventId(pub u64);

impl Display for EventId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Hands out fresh ids, never reusing one it has given out or been told about.
#[derive(Debug, Default, Clone, Copy)]
pub(crate) struct IdCounter {
    next: u64,
}
impl IdCounter {
    pub(crate) fn next(&mut self) -> u64 {
        self.next += 1;
        self.next
    }
    pub(crate) fn observe(&mut self, id: u64) {
        self.next = self.next.max(id);
    }
}
