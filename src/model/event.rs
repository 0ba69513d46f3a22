// File: src/model/event.rs
use chrono::{Local, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EventFieldError {
    #[error("Event names should not be blank")]
    EmptyName,
}

/// Non-empty, trimmed event name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventName(String);

impl EventName {
    pub fn new(raw: &str) -> Result<Self, EventFieldError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(EventFieldError::EmptyName);
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EventName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A scheduled event. All fields are present and immutable once built.
///
/// Construction does not enforce `start_time < end_time`; the command
/// producing the event is responsible for that check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    name: EventName,
    date: NaiveDate,
    start_time: NaiveTime,
    end_time: NaiveTime,
}

impl Event {
    pub fn new(
        name: EventName,
        date: NaiveDate,
        start_time: NaiveTime,
        end_time: NaiveTime,
    ) -> Self {
        Self {
            name,
            date,
            start_time,
            end_time,
        }
    }

    pub fn name(&self) -> &EventName {
        &self.name
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn start_time(&self) -> NaiveTime {
        self.start_time
    }

    pub fn end_time(&self) -> NaiveTime {
        self.end_time
    }

    /// Weaker identity check, kept separate from `==` so duplicate detection
    /// can diverge from full equality later without touching call sites.
    /// Today both agree: all four fields must match.
    pub fn is_same_event(&self, other: &Event) -> bool {
        std::ptr::eq(self, other)
            || (self.name == other.name
                && self.date == other.date
                && self.start_time == other.start_time
                && self.end_time == other.end_time)
    }

    /// True when `other` falls on the same date and its time interval
    /// overlaps this one. Boundaries are strict: an event ending exactly
    /// when another starts does not overlap it.
    ///
    /// Symmetric for well-formed intervals (start < end). Well-formedness is
    /// not a type invariant, so callers guarding inserts check both ways.
    pub fn overlaps(&self, other: &Event) -> bool {
        self.date == other.date && self.time_overlap(other)
    }

    fn time_overlap(&self, other: &Event) -> bool {
        self.crosses_start(other)
            || self.crosses_end(other)
            || self.contains(other)
            || self.same_interval(other)
    }

    // `other` straddles this event's start.
    fn crosses_start(&self, other: &Event) -> bool {
        other.start_time < self.start_time && other.end_time > self.start_time
    }

    // `other` straddles this event's end.
    fn crosses_end(&self, other: &Event) -> bool {
        other.start_time < self.end_time && other.end_time > self.end_time
    }

    // `other` sits strictly inside this event.
    fn contains(&self, other: &Event) -> bool {
        other.start_time > self.start_time && other.end_time < self.end_time
    }

    fn same_interval(&self, other: &Event) -> bool {
        other.start_time == self.start_time && other.end_time == self.end_time
    }

    /// Display-only status, computed against the wall clock at query time.
    /// Never persisted.
    pub fn completed_status(&self) -> &'static str {
        self.completed_status_at(Local::now().naive_local())
    }

    pub fn completed_status_at(&self, now: NaiveDateTime) -> &'static str {
        let today = now.date();
        if self.date < today || (self.date == today && self.end_time < now.time()) {
            "Event completed"
        } else {
            ""
        }
    }

    /// Chronological display order: date first, then start time.
    ///
    /// Deliberately not an `Ord` impl: two distinct events may compare
    /// `Equal` here, which would break the `Ord`/`Eq` consistency contract.
    pub fn chronological_cmp(&self, other: &Event) -> Ordering {
        if std::ptr::eq(self, other) {
            return Ordering::Equal;
        }
        self.date
            .cmp(&other.date)
            .then_with(|| self.start_time.cmp(&other.start_time))
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}\nDate: {}\nStart Time: {}\nEnd Time: {}",
            self.name,
            self.date.format("%Y-%m-%d"),
            self.start_time.format("%H:%M"),
            self.end_time.format("%H:%M"),
        )
    }
}
