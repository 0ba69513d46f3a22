// Manages durable file storage for the scheduler and user preferences.
//
// ⚠️ VERSION BUMP REQUIRED:
// Changes to the Event serialization format require incrementing
// SCHEDULER_FORMAT_VERSION below so old data files are not misread.
use crate::context::AppContext;
use crate::model::{Event, UserPrefs};
use crate::store::Scheduler;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

// Version history:
// - v1: Initial format: {version, events[]} with events as four named fields
const SCHEDULER_FORMAT_VERSION: u32 = 1;

/// Wrapper struct for versioned scheduler storage
#[derive(Serialize, Deserialize)]
struct SchedulerData {
    #[serde(default)]
    version: u32,
    events: Vec<Event>,
}

/// Durable-persistence boundary for the scheduler and preferences.
///
/// Loads report "no persisted state" as `Ok(None)` so startup can fall back
/// to defaults; save failures are always returned, never swallowed.
pub trait Storage {
    fn load_scheduler(&self) -> Result<Option<Scheduler>>;
    fn save_scheduler(&self, scheduler: &Scheduler) -> Result<()>;
    fn load_prefs(&self) -> Result<Option<UserPrefs>>;
    fn save_prefs(&self, prefs: &UserPrefs) -> Result<()>;
}

/// File-backed storage: scheduler data as versioned JSON, preferences as
/// TOML, in two independent files.
pub struct JsonStorage {
    scheduler_path: PathBuf,
    prefs_path: PathBuf,
}

impl JsonStorage {
    pub fn new(scheduler_path: PathBuf, prefs_path: PathBuf) -> Self {
        Self {
            scheduler_path,
            prefs_path,
        }
    }

    pub fn from_context(ctx: &dyn AppContext) -> Result<Self> {
        Ok(Self::new(
            ctx.get_scheduler_file_path()?,
            ctx.get_prefs_file_path()?,
        ))
    }

    pub fn scheduler_path(&self) -> &Path {
        &self.scheduler_path
    }

    /// Atomic write: write to a .tmp sibling then rename, so an I/O failure
    /// never leaves a half-written data file behind.
    fn atomic_write<P: AsRef<Path>, C: AsRef<[u8]>>(path: P, contents: C) -> Result<()> {
        let path = path.as_ref();
        let tmp_path = path.with_extension("tmp");
        fs::write(&tmp_path, contents)
            .with_context(|| format!("Failed to write {:?}", tmp_path))?;
        fs::rename(&tmp_path, path)
            .with_context(|| format!("Failed to replace {:?}", path))?;
        Ok(())
    }
}

impl Storage for JsonStorage {
    fn load_scheduler(&self) -> Result<Option<Scheduler>> {
        if !self.scheduler_path.exists() {
            return Ok(None);
        }
        let json = match fs::read_to_string(&self.scheduler_path) {
            Ok(json) => json,
            Err(e) => {
                log::warn!(
                    "Could not read {:?} ({}); starting with an empty scheduler",
                    self.scheduler_path,
                    e
                );
                return Ok(None);
            }
        };
        let data: SchedulerData = match serde_json::from_str(&json) {
            Ok(data) => data,
            Err(e) => {
                log::warn!(
                    "Corrupt scheduler file {:?} ({}); starting with an empty scheduler",
                    self.scheduler_path,
                    e
                );
                return Ok(None);
            }
        };
        if data.version > SCHEDULER_FORMAT_VERSION {
            log::warn!(
                "Scheduler file {:?} has unknown version {}; starting with an empty scheduler",
                self.scheduler_path,
                data.version
            );
            return Ok(None);
        }
        match Scheduler::from_events(data.events) {
            Ok(scheduler) => Ok(Some(scheduler)),
            Err(e) => {
                log::warn!(
                    "Rejecting scheduler file {:?} ({}); starting with an empty scheduler",
                    self.scheduler_path,
                    e
                );
                Ok(None)
            }
        }
    }

    fn save_scheduler(&self, scheduler: &Scheduler) -> Result<()> {
        let data = SchedulerData {
            version: SCHEDULER_FORMAT_VERSION,
            events: scheduler.events().to_vec(),
        };
        let json = serde_json::to_string_pretty(&data)?;
        Self::atomic_write(&self.scheduler_path, json)
    }

    fn load_prefs(&self) -> Result<Option<UserPrefs>> {
        if !self.prefs_path.exists() {
            return Ok(None);
        }
        let contents = match fs::read_to_string(&self.prefs_path) {
            Ok(contents) => contents,
            Err(e) => {
                log::warn!(
                    "Could not read {:?} ({}); using default preferences",
                    self.prefs_path,
                    e
                );
                return Ok(None);
            }
        };
        match toml::from_str::<UserPrefs>(&contents) {
            Ok(prefs) => Ok(Some(prefs)),
            Err(e) => {
                log::warn!(
                    "Corrupt preferences file {:?} ({}); using default preferences",
                    self.prefs_path,
                    e
                );
                Ok(None)
            }
        }
    }

    fn save_prefs(&self, prefs: &UserPrefs) -> Result<()> {
        let toml_str = toml::to_string_pretty(prefs)?;
        Self::atomic_write(&self.prefs_path, toml_str)
    }
}
