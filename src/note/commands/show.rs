use crate::commands::CmdResult;
use crate::error::{NoteError, Result};
use crate::model::{Note, NoteId};
use crate::store::DataStore;
use std::collections::HashMap;

/// Fetches notes by id. Repeated ids are shown repeatedly, in the order given.
pub fn run<S: DataStore>(store: &S, ids: &[NoteId]) -> Result<CmdResult> {
    if ids.is_empty() {
        return Err(NoteError::Argument("no note ids given".into()));
    }

    let fetched: HashMap<NoteId, Note> = store
        .get_notes(ids)?
        .into_iter()
        .map(|n| (n.id, n))
        .collect();

    let notes = ids
        .iter()
        .filter_map(|id| fetched.get(id).cloned())
        .collect();
    Ok(CmdResult::default().with_listed_notes(notes))
}
