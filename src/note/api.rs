//! # API Facade
//!
//! The API layer is a **thin facade** over the command layer. It is the single
//! entry point for note operations, whatever the UI.
//!
//! The facade:
//! - **Dispatches** to the matching `commands::*::run`
//! - **Applies configuration** (default space, default list spaces)
//! - **Returns structured types** (`Result<CmdResult>`)
//!
//! It does no printing, no prompting and no formatting. Confirmation of
//! destructive operations is the caller's job.
//!
//! `NoteApi<S: DataStore>` is generic over the storage backend:
//! - Production: `NoteApi<SqliteStore>` on a database file
//! - Testing: `NoteApi<SqliteStore>` on `SqliteStore::open_in_memory()`

use crate::codec::Format;
use crate::commands::{self, find, remove};
use crate::config::NoteConfig;
use crate::error::Result;
use crate::iterate::{iterate_notes, NoteIter};
use crate::model::{Note, NoteId};
use crate::query::{NoteQuery, SortOpts};
use crate::store::DataStore;
use std::io::Read;
use std::path::Path;

pub use crate::commands::find::{FindOptions, Finder};
pub use crate::commands::remove::RemoveTarget;
pub use crate::commands::{CmdMessage, CmdResult, MessageLevel};

/// The main API facade for note operations.
pub struct NoteApi<S: DataStore> {
    store: S,
    config: NoteConfig,
}

impl<S: DataStore> NoteApi<S> {
    pub fn new(store: S, config: NoteConfig) -> Self {
        Self { store, config }
    }

    pub fn config(&self) -> &NoteConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Adds a note to `space`, or to the configured default space.
    pub fn add_note(
        &mut self,
        space: Option<&str>,
        content: String,
        pinned: bool,
    ) -> Result<CmdResult> {
        let space = space.unwrap_or(&self.config.space).to_string();
        commands::add::run(&mut self.store, &space, content, pinned)
    }

    pub fn get_note(&self, id: NoteId) -> Result<Note> {
        self.store.get_note(id)
    }

    pub fn get_notes(&self, ids: &[NoteId]) -> Result<Vec<Note>> {
        self.store.get_notes(ids)
    }

    /// Lists notes. A query without spaces or hidden spaces falls back to the
    /// configured `list_spaces`, when there are any.
    pub fn list_notes(&self, query: NoteQuery) -> Result<CmdResult> {
        let query = if query.spaces.is_empty()
            && !query.include_hidden
            && !self.config.list_spaces.is_empty()
        {
            query.in_spaces(self.config.list_spaces.iter().map(String::as_str))
        } else {
            query
        };
        commands::list::run(&self.store, &query)
    }

    pub fn show_notes(&self, ids: &[NoteId]) -> Result<CmdResult> {
        commands::show::run(&self.store, ids)
    }

    pub fn edit_note(&mut self, id: NoteId, content: String) -> Result<CmdResult> {
        commands::edit::run(&mut self.store, id, content)
    }

    pub fn move_notes(&mut self, ids: &[NoteId], to_space: &str) -> Result<CmdResult> {
        commands::move_notes::run(&mut self.store, ids, to_space)
    }

    pub fn pin_notes(&mut self, ids: &[NoteId]) -> Result<CmdResult> {
        commands::pinning::pin(&mut self.store, ids)
    }

    pub fn unpin_notes(&mut self, ids: &[NoteId]) -> Result<CmdResult> {
        commands::pinning::unpin(&mut self.store, ids)
    }

    /// Ids a removal would touch, for confirmation prompts.
    pub fn removal_targets(&self, target: &RemoveTarget) -> Result<Vec<NoteId>> {
        remove::resolve_targets(&self.store, target)
    }

    pub fn remove_notes(&mut self, target: &RemoveTarget, permanent: bool) -> Result<CmdResult> {
        commands::remove::run(&mut self.store, target, permanent)
    }

    pub fn trash_ids(&self) -> Result<Vec<NoteId>> {
        commands::clean::trash_ids(&self.store)
    }

    pub fn clean_trash(&mut self) -> Result<CmdResult> {
        commands::clean::run(&mut self.store)
    }

    pub fn list_spaces(
        &self,
        include_hidden: bool,
        sort: Option<&SortOpts>,
        ids: &[NoteId],
    ) -> Result<CmdResult> {
        commands::spaces::run(&self.store, include_hidden, sort, ids)
    }

    pub fn find_notes(&self, finder: &Finder, options: &FindOptions) -> Result<CmdResult> {
        find::run(&self.store, finder, options)
    }

    /// Imports records; those without a space go to `space` or the default.
    pub fn import_notes<R: Read>(
        &mut self,
        reader: R,
        format: Format,
        space: Option<&str>,
    ) -> Result<CmdResult> {
        let space = space.unwrap_or(&self.config.space).to_string();
        commands::import::from_reader(&mut self.store, reader, format, &space)
    }

    pub fn export_notes(
        &self,
        query: &NoteQuery,
        ids: &[NoteId],
        format: Format,
    ) -> Result<CmdResult> {
        commands::export::run(&self.store, query, ids, format)
    }

    /// Lazily walks every note matching `query`, a page at a time.
    pub fn iterate(&self, query: NoteQuery) -> NoteIter<'_, S> {
        iterate_notes(&self.store, query)
    }
}

/// Writes the default config and creates the database. Needs no open store.
pub fn init(config_file: &Path, db_path: &Path, config: &NoteConfig) -> Result<CmdResult> {
    commands::init::run(config_file, db_path, config)
}
