use crate::commands::{plural, CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::{note_ids, NoteId, TRASH_SPACE};
use crate::query::NoteQuery;
use crate::store::DataStore;
use tracing::info;

/// Ids of every note in the trash space.
pub fn trash_ids<S: DataStore>(store: &S) -> Result<Vec<NoteId>> {
    let notes = store.select_notes(&NoteQuery::new().in_spaces([TRASH_SPACE]))?;
    Ok(note_ids(&notes))
}

/// Permanently deletes everything in the trash space.
pub fn run<S: DataStore>(store: &mut S) -> Result<CmdResult> {
    let ids = trash_ids(store)?;
    let mut result = CmdResult::default();
    if ids.is_empty() {
        result.add_message(CmdMessage::info("Trash is empty"));
        return Ok(result);
    }

    let count = store.permanent_remove_notes(&ids)?;
    info!(count, "emptied trash");
    result.add_message(CmdMessage::success(format!(
        "Deleted {} {} from trash",
        count,
        plural(count)
    )));
    Ok(result.with_ids(ids))
}
