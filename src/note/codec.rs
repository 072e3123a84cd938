//! Import/export records and their JSON/YAML encodings.

use crate::error::{NoteError, Result};
use crate::model::{now, Note, NoteId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::io::Read;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Json,
    Yaml,
}

impl Format {
    /// Format implied by a file extension, if any.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Option<Format> {
        let ext = path.as_ref().extension()?.to_string_lossy().to_lowercase();
        match ext.as_str() {
            "json" => Some(Format::Json),
            "yml" | "yaml" => Some(Format::Yaml),
            _ => None,
        }
    }

    /// An explicit choice wins; otherwise the extension decides.
    pub fn resolve(explicit: Option<Format>, path: Option<&Path>) -> Result<Format> {
        explicit
            .or_else(|| path.and_then(Format::from_path))
            .ok_or_else(|| {
                NoteError::Argument(
                    "could not determine format; use --json or --yaml".to_string(),
                )
            })
    }
}

/// External shape of a note. `content` is the only required field on import;
/// `id` is only written on export.
///
/// Timestamps are stored with millisecond precision, so finer fractions in
/// imported `created`/`updated` values are truncated when persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<NoteId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub space: Option<String>,
    pub content: String,
    #[serde(default, alias = "created_at", skip_serializing_if = "Option::is_none")]
    pub created: Option<DateTime<Utc>>,
    #[serde(default, alias = "updated_at", skip_serializing_if = "Option::is_none")]
    pub updated: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pinned: Option<bool>,
}

impl From<&Note> for NoteRecord {
    fn from(note: &Note) -> Self {
        Self {
            id: Some(note.id),
            space: Some(note.space.clone()),
            content: note.content.clone(),
            created: Some(note.created),
            updated: Some(note.updated),
            pinned: Some(note.pinned),
        }
    }
}

impl NoteRecord {
    /// Fills in what the record leaves out. Missing timestamps fall back to
    /// each other, then to now.
    pub fn into_note(self, default_space: &str) -> Note {
        let created = self.created.or(self.updated).unwrap_or_else(now);
        let updated = self.updated.unwrap_or(created);
        Note {
            id: 0,
            space: self.space.unwrap_or_else(|| default_space.to_string()),
            content: self.content,
            created,
            updated,
            pinned: self.pinned.unwrap_or(false),
        }
    }
}

/// Decodes every record in `reader`. JSON input may hold several
/// concatenated arrays.
pub fn decode_records<R: Read>(mut reader: R, format: Format) -> Result<Vec<NoteRecord>> {
    match format {
        Format::Json => {
            let mut out = Vec::new();
            for batch in serde_json::Deserializer::from_reader(reader).into_iter::<Vec<NoteRecord>>()
            {
                out.extend(batch?);
            }
            Ok(out)
        }
        Format::Yaml => {
            let mut text = String::new();
            reader.read_to_string(&mut text)?;
            if text.trim().is_empty() {
                return Ok(Vec::new());
            }
            Ok(serde_yaml::from_str(&text)?)
        }
    }
}

pub fn encode_records(records: &[NoteRecord], format: Format) -> Result<String> {
    match format {
        Format::Json => {
            let mut out = serde_json::to_string_pretty(records)?;
            out.push('\n');
            Ok(out)
        }
        Format::Yaml => Ok(serde_yaml::to_string(records)?),
    }
}
