use crate::commands::CmdResult;
use crate::error::Result;
use crate::model::NoteId;
use crate::query::SortOpts;
use crate::store::DataStore;

/// Lists distinct spaces. With ids, only the spaces those notes live in,
/// sorted and deduplicated.
pub fn run<S: DataStore>(
    store: &S,
    include_hidden: bool,
    sort: Option<&SortOpts>,
    ids: &[NoteId],
) -> Result<CmdResult> {
    if ids.is_empty() {
        let spaces = store.select_spaces(include_hidden, sort)?;
        return Ok(CmdResult::default().with_spaces(spaces));
    }

    let mut spaces: Vec<String> = store
        .get_notes(ids)?
        .into_iter()
        .map(|n| n.space)
        .collect();
    spaces.sort();
    spaces.dedup();
    if sort.is_some_and(|s| !s.ascending) {
        spaces.reverse();
    }
    Ok(CmdResult::default().with_spaces(spaces))
}
