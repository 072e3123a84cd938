use crate::error::{NoteError, Result};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

pub type NoteId = i64;

/// Hidden space that soft-removed notes are moved into.
pub const TRASH_SPACE: &str = ".trash";

/// Space used by `add` when nothing else is configured.
pub const DEFAULT_SPACE: &str = "main";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    /// Assigned by the store on insertion. Ignored when adding.
    pub id: NoteId,
    pub space: String,
    pub content: String,
    pub created: DateTime<Utc>,
    pub updated: DateTime<Utc>,
    pub pinned: bool,
}

impl Note {
    pub fn new(space: impl Into<String>, content: impl Into<String>) -> Self {
        let now = now();
        Self {
            id: 0,
            space: space.into(),
            content: content.into(),
            created: now,
            updated: now,
            pinned: false,
        }
    }

    pub fn pinned(mut self, pinned: bool) -> Self {
        self.pinned = pinned;
        self
    }

    pub fn is_hidden(&self) -> bool {
        is_hidden_space(&self.space)
    }
}

/// A space is hidden when its name starts with a dot.
pub fn is_hidden_space(space: &str) -> bool {
    space.starts_with('.')
}

/// Checks a space label before it is written to the store.
pub fn validate_space(space: &str) -> Result<()> {
    if space.is_empty() {
        return Err(NoteError::Argument("space cannot be empty".into()));
    }
    if space.contains(',') {
        return Err(NoteError::Argument(
            "space cannot contain the character ','".into(),
        ));
    }
    Ok(())
}

pub fn note_ids(notes: &[Note]) -> Vec<NoteId> {
    notes.iter().map(|n| n.id).collect()
}

/// Current time truncated to the precision the store keeps.
pub fn now() -> DateTime<Utc> {
    truncate(Utc::now())
}

/// Formats a timestamp the way it is persisted: ISO-8601, UTC, milliseconds.
///
/// SQLite produces the same shape with `strftime('%Y-%m-%dT%H:%M:%fZ')`, so
/// lexical order of the stored text matches chronological order.
pub fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Millis, true)
}

pub fn parse_timestamp(s: &str) -> Result<DateTime<Utc>> {
    let parsed = DateTime::parse_from_rfc3339(s)?;
    Ok(parsed.with_timezone(&Utc))
}

fn truncate(ts: DateTime<Utc>) -> DateTime<Utc> {
    let formatted = format_timestamp(&ts);
    parse_timestamp(&formatted).unwrap_or(ts)
}

/// Removes duplicates while keeping first-seen order.
pub fn dedup_ids(ids: &[NoteId]) -> Vec<NoteId> {
    let mut seen = std::collections::HashSet::new();
    ids.iter().copied().filter(|id| seen.insert(*id)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hidden_spaces_start_with_dot() {
        assert!(is_hidden_space(".trash"));
        assert!(is_hidden_space(".archive"));
        assert!(!is_hidden_space("main"));
        assert!(!is_hidden_space("a.b"));
    }

    #[test]
    fn validate_space_rejects_comma_and_empty() {
        assert!(validate_space("work").is_ok());
        assert!(validate_space(".private").is_ok());
        assert!(matches!(validate_space("a,b"), Err(NoteError::Argument(_))));
        assert!(matches!(validate_space(""), Err(NoteError::Argument(_))));
    }

    #[test]
    fn timestamp_format_is_millisecond_utc() {
        let ts = parse_timestamp("2024-03-01T10:20:30.123Z").unwrap();
        assert_eq!(format_timestamp(&ts), "2024-03-01T10:20:30.123Z");
    }

    #[test]
    fn parse_timestamp_accepts_offsets() {
        let ts = parse_timestamp("2024-03-01T12:00:00+02:00").unwrap();
        assert_eq!(format_timestamp(&ts), "2024-03-01T10:00:00.000Z");
    }

    #[test]
    fn new_note_has_equal_timestamps() {
        let note = Note::new("main", "hello");
        assert_eq!(note.created, note.updated);
        assert!(!note.pinned);
    }

    #[test]
    fn dedup_keeps_first_occurrence_order() {
        assert_eq!(dedup_ids(&[3, 1, 3, 2, 1]), vec![3, 1, 2]);
    }
}
