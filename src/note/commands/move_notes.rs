use crate::commands::{plural, CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::{dedup_ids, validate_space, NoteId};
use crate::store::DataStore;

pub fn run<S: DataStore>(store: &mut S, ids: &[NoteId], to_space: &str) -> Result<CmdResult> {
    validate_space(to_space)?;
    let count = store.move_notes(ids, to_space)?;
    let moved = store.get_notes(&dedup_ids(ids))?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Moved {} {} to space '{}'",
        count,
        plural(count),
        to_space
    )));
    Ok(result.with_affected_notes(moved))
}
