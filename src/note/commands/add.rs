use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::{validate_space, Note};
use crate::store::DataStore;

pub fn run<S: DataStore>(
    store: &mut S,
    space: &str,
    content: String,
    pinned: bool,
) -> Result<CmdResult> {
    validate_space(space)?;

    let note = Note::new(space, content).pinned(pinned);
    let id = store.add_note(&note, false)?;
    let stored = store.get_note(id)?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Added note {} to space '{}'",
        id, stored.space
    )));
    Ok(result.with_affected_notes(vec![stored]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::NoteError;
    use crate::store::sqlite::SqliteStore;

    #[test]
    fn add_reports_new_id() {
        let mut store = SqliteStore::open_in_memory().unwrap();
        let result = run(&mut store, "work", "hello".into(), false).unwrap();

        assert_eq!(result.affected_notes.len(), 1);
        let note = &result.affected_notes[0];
        assert_eq!(note.id, 1);
        assert_eq!(note.space, "work");
        assert!(result.messages[0].content.contains("Added note 1"));
    }

    #[test]
    fn add_pinned() {
        let mut store = SqliteStore::open_in_memory().unwrap();
        let result = run(&mut store, "main", "x".into(), true).unwrap();
        assert!(result.affected_notes[0].pinned);
    }

    #[test]
    fn add_rejects_bad_space() {
        let mut store = SqliteStore::open_in_memory().unwrap();
        assert!(matches!(
            run(&mut store, "a,b", "x".into(), false),
            Err(NoteError::Argument(_))
        ));
        assert!(matches!(
            run(&mut store, "", "x".into(), false),
            Err(NoteError::Argument(_))
        ));
    }
}
