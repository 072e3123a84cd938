use crate::codec::{decode_records, Format, NoteRecord};
use crate::commands::{plural, CmdMessage, CmdResult};
use crate::error::{NoteError, Result};
use crate::store::DataStore;
use std::io::Read;
use tracing::warn;

/// Adds every record in order, keeping the timestamps it carries.
///
/// Stops at the first record that fails. Notes created before the failure
/// stay in the store and their ids are listed in the returned
/// [`NoteError::Import`].
pub fn run<S: DataStore>(
    store: &mut S,
    records: Vec<NoteRecord>,
    default_space: &str,
) -> Result<CmdResult> {
    let mut result = CmdResult::default();
    if records.is_empty() {
        result.add_message(CmdMessage::info("Nothing to import"));
        return Ok(result);
    }

    let mut created = Vec::with_capacity(records.len());
    for record in records {
        let note = record.into_note(default_space);
        match store.add_note(&note, true) {
            Ok(id) => created.push(id),
            Err(source) => {
                warn!(created = created.len(), error = %source, "import stopped");
                return Err(NoteError::Import {
                    created,
                    source: Box::new(source),
                });
            }
        }
    }

    let notes = store.get_notes(&created)?;
    result.add_message(CmdMessage::success(format!(
        "Imported {} {}",
        notes.len(),
        plural(notes.len())
    )));
    Ok(result.with_affected_notes(notes).with_ids(created))
}

pub fn from_reader<S: DataStore, R: Read>(
    store: &mut S,
    reader: R,
    format: Format,
    default_space: &str,
) -> Result<CmdResult> {
    let records = decode_records(reader, format)?;
    run(store, records, default_space)
}
