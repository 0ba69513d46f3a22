// File: ./src/model/mod.rs
pub mod event;
pub mod prefs;

pub use event::{Event, EventFieldError, EventName};
pub use prefs::UserPrefs;
