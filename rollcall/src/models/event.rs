use std::{fmt, str::FromStr};

use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};

use super::{AttendeeId, EventId};
use crate::error::{Error, Result};

/// Pattern used to read and print start times, e.g. `25/12/2026 19:30`.
pub const DATE_TIME_FORMAT: &str = "%d/%m/%Y %H:%M";

/// How long an event counts as ongoing after it starts.
pub const ONGOING_WINDOW_HOURS: i64 = 2;

/// Parses a start time written as `dd/MM/yyyy HH:mm`.
pub fn parse_date_time(input: &str) -> Result<NaiveDateTime> {
    NaiveDateTime::parse_from_str(input.trim(), DATE_TIME_FORMAT).map_err(|source| {
        Error::InvalidDateTime {
            input: String::from(input),
            source,
        }
    })
}

/// Formats a start time as `dd/MM/yyyy HH:mm`.
pub fn format_date_time(time: &NaiveDateTime) -> String {
    time.format(DATE_TIME_FORMAT).to_string()
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Event {
    pub id: EventId,
    pub name: String,
    pub address: String,
    pub category: Category,
    pub start_time: NaiveDateTime,
    pub description: String,
    pub(crate) attendees: Vec<AttendeeId>,
}
impl Event {
    /// Attendees who confirmed, in the order they confirmed.
    pub fn attendees(&self) -> &[AttendeeId] {
        &self.attendees
    }
    pub fn status(&self, now: NaiveDateTime) -> EventStatus {
        EventStatus::classify(self.start_time, now)
    }

    /// Overwrites one field from its textual form. The value is parsed before
    /// anything is assigned, so a failure leaves the event untouched.
    pub fn set_field(&mut self, field: EventField, value: &str) -> Result<()> {
        match field {
            EventField::Name => self.name = String::from(value),
            EventField::Address => self.address = String::from(value),
            EventField::Category => self.category = value.parse()?,
            EventField::StartTime => self.start_time = parse_date_time(value)?,
            EventField::Description => self.description = String::from(value),
        }
        Ok(())
    }

    pub(crate) fn add_attendee(&mut self, attendee: AttendeeId) -> bool {
        if self.attendees.contains(&attendee) {
            return false;
        }
        self.attendees.push(attendee);
        true
    }
    pub(crate) fn remove_attendee(&mut self, attendee: AttendeeId) -> bool {
        let before = self.attendees.len();
        self.attendees.retain(|a| *a != attendee);
        before != self.attendees.len()
    }
}
impl PartialEq for Event {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}
impl Eq for Event {}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Name: {}", self.name)?;
        writeln!(f, "  Address: {}", self.address)?;
        writeln!(f, "  Category: {}", self.category)?;
        writeln!(f, "  Starts: {}", format_date_time(&self.start_time))?;
        write!(f, "  Description: {}", self.description)
    }
}

#[derive(Debug, Default, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Party,
    Show,
    Sports,
    Cultural,
    #[default]
    Other,
}
impl Category {
    pub const ALL: [Category; 5] = [
        Category::Party,
        Category::Show,
        Category::Sports,
        Category::Cultural,
        Category::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Party => "party",
            Category::Show => "show",
            Category::Sports => "sports",
            Category::Cultural => "cultural",
            Category::Other => "other",
        }
    }
}
impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
impl FromStr for Category {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| Error::InvalidCategory(String::from(s)))
    }
}

/// Where an event stands relative to a given moment. Never stored, always
/// derived from the start time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventStatus {
    Upcoming,
    Ongoing,
    Past,
}
impl EventStatus {
    /// `Ongoing` during `[start, start + 2h)`, `Past` from `start + 2h` on,
    /// `Upcoming` before `start`.
    pub fn classify(start_time: NaiveDateTime, now: NaiveDateTime) -> Self {
        if now < start_time {
            return EventStatus::Upcoming;
        }
        match start_time.checked_add_signed(Duration::hours(ONGOING_WINDOW_HOURS)) {
            Some(end) if now >= end => EventStatus::Past,
            _ => EventStatus::Ongoing,
        }
    }
}

/// The editable fields of an [`Event`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventField {
    Name,
    Address,
    Category,
    StartTime,
    Description,
}
impl EventField {
    pub const ALL: [EventField; 5] = [
        EventField::Name,
        EventField::Address,
        EventField::Category,
        EventField::StartTime,
        EventField::Description,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EventField::Name => "name",
            EventField::Address => "address",
            EventField::Category => "category",
            EventField::StartTime => "start_time",
            EventField::Description => "description",
        }
    }
}
impl fmt::Display for EventField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
impl FromStr for EventField {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "name" => Ok(EventField::Name),
            "address" => Ok(EventField::Address),
            "category" => Ok(EventField::Category),
            "start_time" | "start" | "time" => Ok(EventField::StartTime),
            "description" => Ok(EventField::Description),
            _ => Err(Error::InvalidField(String::from(s))),
        }
    }
}

#[derive(Debug, Default, Clone)]
pub struct EventBuilder {
    name: String,
    address: String,
    category: Category,
    start_time: NaiveDateTime,
    description: String,
}
impl EventBuilder {
    pub fn new(name: &str, start_time: NaiveDateTime) -> Self {
        Self {
            name: String::from(name),
            start_time,
            ..Self::default()
        }
    }
    pub fn address(mut self, address: &str) -> Self {
        self.address = String::from(address);
        self
    }
    pub fn category(mut self, category: Category) -> Self {
        self.category = category;
        self
    }
    pub fn description(mut self, desc: &str) -> Self {
        self.description = String::from(desc);
        self
    }
    pub(crate) fn build(self, id: EventId) -> Event {
        Event {
            id,
            name: self.name,
            address: self.address,
            category: self.category,
            start_time: self.start_time,
            description: self.description,
            attendees: Vec::new(),
        }
    }
}
