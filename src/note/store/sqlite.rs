use super::schema::create_schema;
use super::DataStore;
use crate::error::{NoteError, Result};
use crate::model::{dedup_ids, format_timestamp, validate_space, Note, NoteId};
use crate::query::{compose, compose_spaces, NoteQuery, SortOpts, NOTE_COLUMNS};
use chrono::{DateTime, NaiveDateTime, Utc};
use rusqlite::types::{Type, Value};
use rusqlite::{params, params_from_iter, Connection, Row};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// SQLite-backed note store.
///
/// Owns its connection; dropping the store closes the database.
pub struct SqliteStore {
    conn: Connection,
    path: Option<PathBuf>,
}

impl SqliteStore {
    /// Opens or creates the database at `path`, creating parent directories.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let conn = Connection::open(path)?;
        create_schema(&conn)?;
        debug!(path = %path.display(), "opened note store");
        Ok(Self {
            conn,
            path: Some(path.to_path_buf()),
        })
    }

    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        create_schema(&conn)?;
        Ok(Self { conn, path: None })
    }

    /// Database file, `None` for in-memory stores.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Runs one multi-row statement `<prefix> WHERE id IN (...)` and checks
    /// the affected-row count against the distinct ids requested.
    fn mutate_many(
        &self,
        action: &str,
        prefix: &str,
        leading: Vec<Value>,
        ids: &[NoteId],
    ) -> Result<usize> {
        let ids = require_ids(ids)?;
        let sql = format!("{prefix} WHERE id IN ({})", id_slots(ids.len()));
        let params = leading
            .into_iter()
            .chain(ids.iter().map(|id| Value::Integer(*id)));

        let affected = self.conn.execute(&sql, params_from_iter(params))?;
        verify_affected(action, ids.len(), affected)
    }
}

impl DataStore for SqliteStore {
    fn add_note(&mut self, note: &Note, assign_timestamps: bool) -> Result<NoteId> {
        validate_space(&note.space)?;

        if assign_timestamps {
            if note.updated < note.created {
                return Err(NoteError::Argument(format!(
                    "updated ({}) is earlier than created ({})",
                    format_timestamp(&note.updated),
                    format_timestamp(&note.created)
                )));
            }
            self.conn.execute(
                "INSERT INTO notes (space, created, updated, content, pinned)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![
                    note.space,
                    format_timestamp(&note.created),
                    format_timestamp(&note.updated),
                    note.content,
                    note.pinned
                ],
            )?;
        } else {
            self.conn.execute(
                "INSERT INTO notes (space, content, pinned) VALUES (?1, ?2, ?3)",
                params![note.space, note.content, note.pinned],
            )?;
        }

        let id = self.conn.last_insert_rowid();
        debug!(id, space = %note.space, "added note");
        Ok(id)
    }

    fn get_note(&self, id: NoteId) -> Result<Note> {
        let sql = format!("SELECT {NOTE_COLUMNS} FROM notes WHERE id = ?1");
        match self.conn.query_row(&sql, [id], row_to_note) {
            Ok(note) => Ok(note),
            Err(rusqlite::Error::QueryReturnedNoRows) => Err(NoteError::not_found(id)),
            Err(e) => Err(e.into()),
        }
    }

    fn get_notes(&self, ids: &[NoteId]) -> Result<Vec<Note>> {
        let ids = require_ids(ids)?;
        let sql = format!(
            "SELECT {NOTE_COLUMNS} FROM notes WHERE id IN ({})",
            id_slots(ids.len())
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let mut found: HashMap<NoteId, Note> = stmt
            .query_map(params_from_iter(ids.iter()), row_to_note)?
            .map(|r| r.map(|note| (note.id, note)))
            .collect::<rusqlite::Result<_>>()?;

        let missing: Vec<NoteId> = ids
            .iter()
            .copied()
            .filter(|id| !found.contains_key(id))
            .collect();
        if !missing.is_empty() {
            return Err(NoteError::NotFound { ids: missing });
        }

        Ok(ids.iter().filter_map(|id| found.remove(id)).collect())
    }

    fn select_notes(&self, query: &NoteQuery) -> Result<Vec<Note>> {
        let plan = compose(query)?;
        let mut stmt = self.conn.prepare(&plan.sql)?;
        let notes = stmt
            .query_map(params_from_iter(plan.params.iter()), row_to_note)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        debug!(count = notes.len(), "selected notes");
        Ok(notes)
    }

    fn select_spaces(&self, include_hidden: bool, sort: Option<&SortOpts>) -> Result<Vec<String>> {
        let plan = compose_spaces(include_hidden, sort)?;
        let mut stmt = self.conn.prepare(&plan.sql)?;
        let spaces = stmt
            .query_map(params_from_iter(plan.params.iter()), |row| row.get(0))?
            .collect::<rusqlite::Result<Vec<String>>>()?;
        Ok(spaces)
    }

    fn replace_content(&mut self, id: NoteId, content: &str) -> Result<()> {
        let affected = self.conn.execute(
            "UPDATE notes SET content = ?1 WHERE id = ?2",
            params![content, id],
        )?;
        if affected != 1 {
            return Err(NoteError::not_found(id));
        }
        debug!(id, "replaced note content");
        Ok(())
    }

    fn move_notes(&mut self, ids: &[NoteId], to_space: &str) -> Result<usize> {
        validate_space(to_space)?;
        self.mutate_many(
            "move",
            "UPDATE notes SET space = ?",
            vec![Value::Text(to_space.to_string())],
            ids,
        )
    }

    fn pin_notes(&mut self, ids: &[NoteId], pinned: bool) -> Result<usize> {
        self.mutate_many(
            if pinned { "pin" } else { "unpin" },
            "UPDATE notes SET pinned = ?",
            vec![Value::Integer(i64::from(pinned))],
            ids,
        )
    }

    fn permanent_remove_notes(&mut self, ids: &[NoteId]) -> Result<usize> {
        self.mutate_many("delete", "DELETE FROM notes", Vec::new(), ids)
    }
}

fn require_ids(ids: &[NoteId]) -> Result<Vec<NoteId>> {
    if ids.is_empty() {
        return Err(NoteError::Argument("at least one id is required".into()));
    }
    Ok(dedup_ids(ids))
}

fn id_slots(count: usize) -> String {
    vec!["?"; count].join(", ")
}

fn verify_affected(action: &str, requested: usize, succeeded: usize) -> Result<usize> {
    if succeeded != requested {
        warn!(action, requested, succeeded, "partial mutation");
        return Err(NoteError::PartialMutation {
            requested,
            succeeded,
        });
    }
    debug!(action, affected = succeeded, "mutation applied");
    Ok(succeeded)
}

fn row_to_note(row: &Row<'_>) -> rusqlite::Result<Note> {
    Ok(Note {
        id: row.get(0)?,
        space: row.get(1)?,
        created: timestamp_column(row, 2)?,
        updated: timestamp_column(row, 3)?,
        content: row.get(4)?,
        pinned: row.get::<_, Option<bool>>(5)?.unwrap_or(false),
    })
}

/// Reads an ISO-8601 column. Also accepts SQLite's `CURRENT_TIMESTAMP`
/// shape (`YYYY-MM-DD HH:MM:SS`) written by older databases.
fn timestamp_column(row: &Row<'_>, idx: usize) -> rusqlite::Result<DateTime<Utc>> {
    let raw: Option<String> = row.get(idx)?;
    let Some(raw) = raw else {
        return Ok(DateTime::<Utc>::default());
    };

    if let Ok(ts) = DateTime::parse_from_rfc3339(&raw) {
        return Ok(ts.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(&raw, "%Y-%m-%d %H:%M:%S")
        .map(|naive| naive.and_utc())
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}
