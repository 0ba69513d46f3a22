// File: src/command.rs
//! Command variants and their execution against the model.
//!
//! Each variant carries an already-validated payload produced by the parser;
//! execution checks semantic preconditions (index in range, no duplicate, no
//! overlap) before performing any mutation, so a failing command always
//! leaves the model untouched.
use crate::model::{Event, EventName};
use crate::store::{EventFilter, Model};
use chrono::{NaiveDate, NaiveTime};
use thiserror::Error;

// Messages shared across the command surface. These are contract text: tests
// and callers match on them verbatim.
pub const MESSAGE_UNKNOWN_COMMAND: &str = "Unknown command";
pub const MESSAGE_INVALID_EVENT_DISPLAYED_INDEX: &str = "The event index provided is invalid";
pub const MESSAGE_DUPLICATE_EVENT: &str = "This event already exists in the scheduler";
pub const MESSAGE_EVENT_OVERLAP: &str = "This event overlaps with an existing event";
pub const MESSAGE_END_BEFORE_START: &str = "Event start time must be strictly before its end time";
pub const MESSAGE_LIST_SUCCESS: &str = "Listed all events";
pub const MESSAGE_EXIT: &str = "Exiting scheduler. Goodbye!";

/// Semantic failure during command execution. Carries only a human-readable
/// message; no trace reaches the end user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct CommandError(pub String);

/// Feedback produced by a successfully executed command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandResult {
    pub feedback: String,
    pub exit: bool,
}

impl CommandResult {
    pub fn new(feedback: impl Into<String>) -> Self {
        Self {
            feedback: feedback.into(),
            exit: false,
        }
    }

    pub fn exit(feedback: impl Into<String>) -> Self {
        Self {
            feedback: feedback.into(),
            exit: true,
        }
    }
}

/// Partial update applied to an existing event by `edit`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventEdits {
    pub name: Option<EventName>,
    pub date: Option<NaiveDate>,
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
}

impl EventEdits {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.date.is_none()
            && self.start_time.is_none()
            && self.end_time.is_none()
    }

    /// Builds the replacement event from the target plus the edited fields.
    fn apply(&self, target: &Event) -> Event {
        Event::new(
            self.name.clone().unwrap_or_else(|| target.name().clone()),
            self.date.unwrap_or_else(|| target.date()),
            self.start_time.unwrap_or_else(|| target.start_time()),
            self.end_time.unwrap_or_else(|| target.end_time()),
        )
    }
}

/// A validated unit of work. Dispatch is a single exhaustive match rather
/// than a trait hierarchy; every variant owns its payload.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Add(Event),
    /// One-based index into the currently displayed snapshot.
    Delete(usize),
    Edit {
        index: usize,
        edits: EventEdits,
    },
    List,
    Find(EventFilter),
    Help,
    Exit,
}

impl Command {
    /// True for commands that change the scheduler and therefore require a
    /// save afterwards.
    pub fn mutates(&self) -> bool {
        matches!(
            self,
            Command::Add(_) | Command::Delete(_) | Command::Edit { .. }
        )
    }

    pub fn execute(self, model: &mut Model) -> Result<CommandResult, CommandError> {
        match self {
            Command::Add(event) => {
                if model.has_event(&event) {
                    return Err(CommandError(MESSAGE_DUPLICATE_EVENT.to_string()));
                }
                if model.has_overlap_with(&event, None) {
                    return Err(CommandError(MESSAGE_EVENT_OVERLAP.to_string()));
                }
                model
                    .add_event(event.clone())
                    .map_err(|e| CommandError(e.to_string()))?;
                Ok(CommandResult::new(format!("New event added: {event}")))
            }
            Command::Delete(index) => {
                let target = displayed_event(model, index)?;
                model
                    .delete_event(&target)
                    .map_err(|e| CommandError(e.to_string()))?;
                Ok(CommandResult::new(format!("Deleted event: {target}")))
            }
            Command::Edit { index, edits } => {
                let target = displayed_event(model, index)?;
                let edited = edits.apply(&target);
                if edited.start_time() >= edited.end_time() {
                    return Err(CommandError(MESSAGE_END_BEFORE_START.to_string()));
                }
                if !target.is_same_event(&edited) && model.has_event(&edited) {
                    return Err(CommandError(MESSAGE_DUPLICATE_EVENT.to_string()));
                }
                if model.has_overlap_with(&edited, Some(&target)) {
                    return Err(CommandError(MESSAGE_EVENT_OVERLAP.to_string()));
                }
                model
                    .set_event(&target, edited.clone())
                    .map_err(|e| CommandError(e.to_string()))?;
                Ok(CommandResult::new(format!("Edited event: {edited}")))
            }
            Command::List => {
                model.set_filter(EventFilter::All);
                Ok(CommandResult::new(MESSAGE_LIST_SUCCESS))
            }
            Command::Find(filter) => {
                model.set_filter(filter);
                let count = model.filtered_events().len();
                Ok(CommandResult::new(format!("{count} events listed!")))
            }
            Command::Help => Ok(CommandResult::new(crate::cli::command_summary())),
            Command::Exit => Ok(CommandResult::exit(MESSAGE_EXIT)),
        }
    }
}

/// Resolves a one-based displayed index against the current snapshot.
fn displayed_event(model: &Model, index: usize) -> Result<Event, CommandError> {
    index
        .checked_sub(1)
        .and_then(|i| model.filtered_events().get(i).cloned())
        .ok_or_else(|| CommandError(MESSAGE_INVALID_EVENT_DISPLAYED_INDEX.to_string()))
}
