// File: src/store.rs
use crate::model::{Event, UserPrefs};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("Operation would result in duplicate events")]
    DuplicateEvent,
    #[error("Target event could not be found")]
    EventNotFound,
}

/// In-memory collection of all events. Insertion-ordered, duplicate-free by
/// full equality. Overlap is not enforced here; the command layer checks it
/// before inserting.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Scheduler {
    events: Vec<Event>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bulk constructor used by storage loads. Rejects duplicates so a
    /// tampered data file cannot smuggle them past `add_event`.
    pub fn from_events(events: Vec<Event>) -> Result<Self, StoreError> {
        let mut scheduler = Self::new();
        for event in events {
            scheduler.add_event(event)?;
        }
        Ok(scheduler)
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn has_event(&self, event: &Event) -> bool {
        self.events.iter().any(|e| e.is_same_event(event))
    }

    /// Two-directional overlap check. `excluding` skips one existing event,
    /// which edit uses to avoid matching the event being replaced.
    pub fn has_overlap_with(&self, event: &Event, excluding: Option<&Event>) -> bool {
        self.events
            .iter()
            .filter(|e| excluding.is_none_or(|x| !e.is_same_event(x)))
            .any(|e| e.overlaps(event) || event.overlaps(e))
    }

    pub fn add_event(&mut self, event: Event) -> Result<(), StoreError> {
        if self.has_event(&event) {
            return Err(StoreError::DuplicateEvent);
        }
        self.events.push(event);
        Ok(())
    }

    pub fn delete_event(&mut self, event: &Event) -> Result<(), StoreError> {
        let idx = self
            .events
            .iter()
            .position(|e| e.is_same_event(event))
            .ok_or(StoreError::EventNotFound)?;
        self.events.remove(idx);
        Ok(())
    }

    /// Replaces `target` with `edited` in place.
    pub fn set_event(&mut self, target: &Event, edited: Event) -> Result<(), StoreError> {
        let idx = self
            .events
            .iter()
            .position(|e| e.is_same_event(target))
            .ok_or(StoreError::EventNotFound)?;
        if !target.is_same_event(&edited) && self.has_event(&edited) {
            return Err(StoreError::DuplicateEvent);
        }
        self.events[idx] = edited;
        Ok(())
    }
}

/// Predicate selecting which events the listing shows.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum EventFilter {
    #[default]
    All,
    /// Case-insensitive substring match on the event name.
    NameContains(String),
    OnDate(NaiveDate),
}

impl EventFilter {
    pub fn matches(&self, event: &Event) -> bool {
        match self {
            EventFilter::All => true,
            EventFilter::NameContains(keyword) => event
                .name()
                .as_str()
                .to_lowercase()
                .contains(&keyword.to_lowercase()),
            EventFilter::OnDate(date) => event.date() == *date,
        }
    }
}

/// The application's shared state: the scheduler, the user preferences and
/// the active display filter. Commands are the only mutators, and they reach
/// it exclusively through the `Logic` orchestrator.
#[derive(Debug, Clone)]
pub struct Model {
    scheduler: Scheduler,
    prefs: UserPrefs,
    filter: EventFilter,
}

impl Model {
    pub fn new(scheduler: Scheduler, prefs: UserPrefs) -> Self {
        Self {
            scheduler,
            prefs,
            filter: EventFilter::All,
        }
    }

    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    pub fn prefs(&self) -> &UserPrefs {
        &self.prefs
    }

    pub fn has_event(&self, event: &Event) -> bool {
        self.scheduler.has_event(event)
    }

    pub fn has_overlap_with(&self, event: &Event, excluding: Option<&Event>) -> bool {
        self.scheduler.has_overlap_with(event, excluding)
    }

    pub fn add_event(&mut self, event: Event) -> Result<(), StoreError> {
        self.scheduler.add_event(event)
    }

    pub fn delete_event(&mut self, event: &Event) -> Result<(), StoreError> {
        self.scheduler.delete_event(event)
    }

    pub fn set_event(&mut self, target: &Event, edited: Event) -> Result<(), StoreError> {
        self.scheduler.set_event(target, edited)
    }

    pub fn set_filter(&mut self, filter: EventFilter) {
        self.filter = filter;
    }

    /// Snapshot of the currently displayed events: filtered, sorted
    /// chronologically, detached from the scheduler. Mutating the returned
    /// vector cannot affect the underlying store.
    pub fn filtered_events(&self) -> Vec<Event> {
        let mut shown: Vec<Event> = self
            .scheduler
            .events()
            .iter()
            .filter(|e| self.filter.matches(e))
            .cloned()
            .collect();
        shown.sort_by(|a, b| a.chronological_cmp(b));
        shown
    }
}

// Model equality is defined over the persistent state only; the display
// filter is transient and excluded on purpose.
impl PartialEq for Model {
    fn eq(&self, other: &Self) -> bool {
        self.scheduler == other.scheduler && self.prefs == other.prefs
    }
}
