// File: src/logic.rs
//! Central orchestrator for the command pipeline.
//!
//! One invocation runs parse -> execute -> persist -> report, short-circuiting
//! on the first failure. The orchestrator owns the model and is its sole
//! mutator; all surfaces (REPL, tests) go through `execute`.
use crate::command::{CommandError, CommandResult};
use crate::model::Event;
use crate::parser::{self, ParseError};
use crate::storage::Storage;
use crate::store::Model;
use thiserror::Error;

/// Prefix for save failures surfaced after a successful in-memory mutation.
pub const FILE_OPS_ERROR_MESSAGE: &str = "Could not save data to file: ";

/// The two failure kinds a caller can receive. Both carry a human-readable
/// message and nothing else; the split lets the CLI render them differently.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExecuteError {
    /// Input never became a command; the model and storage were untouched.
    #[error("{0}")]
    Parse(#[from] ParseError),
    /// A semantic precondition failed (model untouched), or persistence
    /// failed after a successful mutation (model left mutated).
    #[error("{0}")]
    Command(#[from] CommandError),
}

pub struct Logic {
    model: Model,
    storage: Box<dyn Storage>,
}

impl Logic {
    pub fn new(model: Model, storage: Box<dyn Storage>) -> Self {
        Self { model, storage }
    }

    /// Executes one raw command line to completion.
    ///
    /// A save failure is reported as a command-kind error, but the in-memory
    /// mutation it follows is kept; there is no rollback. Callers observe
    /// both the error and the mutated model.
    pub fn execute(&mut self, input: &str) -> Result<CommandResult, ExecuteError> {
        let command = parser::parse_command(input).inspect_err(|e| {
            log::debug!("parse failure for {input:?}: {e}");
        })?;

        let needs_save = command.mutates();
        let result = command.execute(&mut self.model).inspect_err(|e| {
            log::warn!("command failure for {input:?}: {e}");
        })?;

        if needs_save {
            self.storage
                .save_scheduler(self.model.scheduler())
                .map_err(|e| {
                    log::error!("save failure after {input:?}: {e:#}");
                    CommandError(format!("{FILE_OPS_ERROR_MESSAGE}{e}"))
                })?;
        }

        Ok(result)
    }

    pub fn model(&self) -> &Model {
        &self.model
    }

    /// Read-only snapshot of the currently displayed events.
    pub fn filtered_events(&self) -> Vec<Event> {
        self.model.filtered_events()
    }
}
