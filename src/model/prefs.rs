// File: src/model/prefs.rs
// User preferences, persisted separately from the scheduler data.
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

fn default_show_completed() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserPrefs {
    /// Overrides the default scheduler data file location when set.
    #[serde(default)]
    pub scheduler_file: Option<PathBuf>,
    /// Whether the event listing tags past events as completed.
    #[serde(default = "default_show_completed")]
    pub show_completed: bool,
}

impl Default for UserPrefs {
    fn default() -> Self {
        Self {
            scheduler_file: None,
            // Match the serde defaults
            show_completed: true,
        }
    }
}
