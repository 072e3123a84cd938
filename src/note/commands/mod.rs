//! # Commands
//!
//! Business logic for every user-facing operation. Each command takes a
//! [`DataStore`](crate::store::DataStore) and plain arguments and returns a
//! [`CmdResult`]: the notes it touched or listed plus messages for the user.
//!
//! Commands never print and never prompt. Anything that needs a confirmation
//! (permanent removal, `clean`) is confirmed by the caller before the command
//! runs.

use crate::config::NoteConfig;
use crate::model::{Note, NoteId};
use std::path::PathBuf;

pub mod add;
pub mod clean;
pub mod edit;
pub mod export;
pub mod find;
pub mod import;
pub mod init;
pub mod list;
pub mod move_notes;
pub mod pinning;
pub mod remove;
pub mod show;
pub mod spaces;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

#[derive(Debug, Default)]
pub struct CmdResult {
    /// Notes created or changed by the command, in their new state.
    pub affected_notes: Vec<Note>,
    /// Notes the command selected for display.
    pub listed_notes: Vec<Note>,
    /// Ids touched when the notes themselves are gone (permanent removal).
    pub ids: Vec<NoteId>,
    pub spaces: Vec<String>,
    /// Encoded payload for commands that produce a document (`export`).
    pub output: Option<String>,
    pub config: Option<NoteConfig>,
    pub paths: Vec<PathBuf>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_affected_notes(mut self, notes: Vec<Note>) -> Self {
        self.affected_notes = notes;
        self
    }

    pub fn with_listed_notes(mut self, notes: Vec<Note>) -> Self {
        self.listed_notes = notes;
        self
    }

    pub fn with_ids(mut self, ids: Vec<NoteId>) -> Self {
        self.ids = ids;
        self
    }

    pub fn with_spaces(mut self, spaces: Vec<String>) -> Self {
        self.spaces = spaces;
        self
    }

    pub fn with_output(mut self, output: String) -> Self {
        self.output = Some(output);
        self
    }

    pub fn with_config(mut self, config: NoteConfig) -> Self {
        self.config = Some(config);
        self
    }

    pub fn with_paths(mut self, paths: Vec<PathBuf>) -> Self {
        self.paths = paths;
        self
    }
}

/// "note" or "notes".
pub(crate) fn plural(count: usize) -> &'static str {
    if count == 1 {
        "note"
    } else {
        "notes"
    }
}
