use crate::commands::{plural, CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::{dedup_ids, NoteId};
use crate::store::DataStore;

pub fn pin<S: DataStore>(store: &mut S, ids: &[NoteId]) -> Result<CmdResult> {
    pin_state(store, ids, true)
}

pub fn unpin<S: DataStore>(store: &mut S, ids: &[NoteId]) -> Result<CmdResult> {
    pin_state(store, ids, false)
}

fn pin_state<S: DataStore>(store: &mut S, ids: &[NoteId], pinned: bool) -> Result<CmdResult> {
    let count = store.pin_notes(ids, pinned)?;
    let notes = store.get_notes(&dedup_ids(ids))?;

    let verb = if pinned { "Pinned" } else { "Unpinned" };
    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "{} {} {}",
        verb,
        count,
        plural(count)
    )));
    Ok(result.with_affected_notes(notes))
}
