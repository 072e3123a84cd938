use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::NoteId;
use crate::store::DataStore;

/// Replaces the content of one note. Identical content is reported and left
/// alone so `updated` does not move.
pub fn run<S: DataStore>(store: &mut S, id: NoteId, content: String) -> Result<CmdResult> {
    let current = store.get_note(id)?;
    let mut result = CmdResult::default();

    if current.content == content {
        result.add_message(CmdMessage::info(format!("Note {} unchanged", id)));
        return Ok(result.with_affected_notes(vec![current]));
    }

    store.replace_content(id, &content)?;
    let updated = store.get_note(id)?;
    result.add_message(CmdMessage::success(format!("Updated note {}", id)));
    Ok(result.with_affected_notes(vec![updated]))
}
