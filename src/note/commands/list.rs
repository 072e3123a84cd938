use crate::commands::CmdResult;
use crate::error::Result;
use crate::query::NoteQuery;
use crate::store::DataStore;

pub fn run<S: DataStore>(store: &S, query: &NoteQuery) -> Result<CmdResult> {
    let notes = store.select_notes(query)?;
    Ok(CmdResult::default().with_listed_notes(notes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::add;
    use crate::model::note_ids;
    use crate::query::{Column, PageOpts, SortOpts};
    use crate::store::sqlite::SqliteStore;

    fn store() -> SqliteStore {
        let mut store = SqliteStore::open_in_memory().unwrap();
        add::run(&mut store, "main", "b".into(), false).unwrap();
        add::run(&mut store, "work", "a".into(), true).unwrap();
        add::run(&mut store, ".hidden", "c".into(), false).unwrap();
        add::run(&mut store, "main", "d".into(), false).unwrap();
        store
    }

    #[test]
    fn list_defaults_to_visible_pinned_first() {
        let store = store();
        let result = run(&store, &NoteQuery::new()).unwrap();
        assert_eq!(note_ids(&result.listed_notes), vec![2, 1, 4]);
    }

    #[test]
    fn list_in_space_sorted_and_paged() {
        let store = store();
        let query = NoteQuery::new()
            .in_spaces(["main"])
            .sorted(SortOpts::desc(Column::Content))
            .paged(PageOpts::new(1, 0));
        let result = run(&store, &query).unwrap();
        assert_eq!(note_ids(&result.listed_notes), vec![4]);
    }

    #[test]
    fn list_hidden_on_request() {
        let store = store();
        let result = run(&store, &NoteQuery::new().include_hidden(true)).unwrap();
        assert_eq!(result.listed_notes.len(), 4);
    }
}
