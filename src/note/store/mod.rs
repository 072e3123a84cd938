//! # Storage Layer
//!
//! This module defines the storage abstraction for notes. The [`DataStore`]
//! trait is what the command layer, the API facade and the pagination
//! iterator are written against.
//!
//! ## Implementations
//!
//! - [`sqlite::SqliteStore`]: the only backend, an embedded SQLite database.
//!   - File-backed for real use (`SqliteStore::open`)
//!   - In-memory for tests (`SqliteStore::open_in_memory`)
//!
//! ## Mutation contract
//!
//! Multi-id mutations (`move_notes`, `pin_notes`, `remove_notes`,
//! `permanent_remove_notes`) run as a single statement, **not** inside a
//! transaction. The number of affected rows is checked against the number of
//! distinct ids requested:
//!
//! - all rows affected: `Ok(count)`
//! - fewer rows affected: `Err(PartialMutation { requested, succeeded })`;
//!   rows that were changed stay changed
//!
//! Duplicate ids are collapsed before counting. An empty id list is an
//! `Argument` error and never reaches the database.
//!
//! Single-row mutations (`replace_content`) must hit exactly one row, else
//! `NotFound`.
//!
//! ## Storage Format
//!
//! ```text
//! notes(id INTEGER PRIMARY KEY AUTOINCREMENT,
//!       space TEXT NOT NULL,
//!       created TEXT, updated TEXT,      -- ISO-8601 UTC, millisecond precision
//!       content TEXT NOT NULL,
//!       pinned INTEGER DEFAULT 0)
//! ```
//!
//! `updated` is refreshed by a trigger whenever space, content or pin state is
//! written.

use crate::error::Result;
use crate::model::{Note, NoteId, TRASH_SPACE};
use crate::query::{NoteQuery, SortOpts};

pub mod schema;
pub mod sqlite;

/// Abstract interface for note storage.
pub trait DataStore {
    /// Inserts a note and returns the id the store assigned.
    ///
    /// With `assign_timestamps` the note's own `created`/`updated` are
    /// persisted verbatim (bulk import); otherwise the store stamps both with
    /// the current time.
    fn add_note(&mut self, note: &Note, assign_timestamps: bool) -> Result<NoteId>;

    /// Fetch one note by id.
    fn get_note(&self, id: NoteId) -> Result<Note>;

    /// Fetch several notes, returned in request order.
    fn get_notes(&self, ids: &[NoteId]) -> Result<Vec<Note>>;

    /// Run a composed selection.
    fn select_notes(&self, query: &NoteQuery) -> Result<Vec<Note>>;

    /// Distinct space labels under the hidden-space policy.
    fn select_spaces(&self, include_hidden: bool, sort: Option<&SortOpts>) -> Result<Vec<String>>;

    fn replace_content(&mut self, id: NoteId, content: &str) -> Result<()>;

    fn move_notes(&mut self, ids: &[NoteId], to_space: &str) -> Result<usize>;

    fn pin_notes(&mut self, ids: &[NoteId], pinned: bool) -> Result<usize>;

    /// Soft removal: moves the notes into the trash space.
    fn remove_notes(&mut self, ids: &[NoteId]) -> Result<usize> {
        self.move_notes(ids, TRASH_SPACE)
    }

    /// Erases the rows. Irreversible.
    fn permanent_remove_notes(&mut self, ids: &[NoteId]) -> Result<usize>;
}
