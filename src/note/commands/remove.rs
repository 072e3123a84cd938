use crate::commands::{plural, CmdMessage, CmdResult};
use crate::error::{NoteError, Result};
use crate::model::{dedup_ids, note_ids, NoteId, TRASH_SPACE};
use crate::query::NoteQuery;
use crate::store::DataStore;

/// What a removal applies to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoveTarget {
    Ids(Vec<NoteId>),
    /// Every note currently in the space.
    Space(String),
}

/// Turns a target into the ids to remove.
pub fn resolve_targets<S: DataStore>(store: &S, target: &RemoveTarget) -> Result<Vec<NoteId>> {
    match target {
        RemoveTarget::Ids(ids) if ids.is_empty() => {
            Err(NoteError::Argument("no note ids given".into()))
        }
        RemoveTarget::Ids(ids) => Ok(dedup_ids(ids)),
        RemoveTarget::Space(space) => {
            let notes = store.select_notes(&NoteQuery::new().in_spaces([space.as_str()]))?;
            Ok(note_ids(&notes))
        }
    }
}

/// Soft removal moves notes into the trash space; `permanent` deletes them.
pub fn run<S: DataStore>(
    store: &mut S,
    target: &RemoveTarget,
    permanent: bool,
) -> Result<CmdResult> {
    if !permanent {
        if let RemoveTarget::Space(space) = target {
            if space == TRASH_SPACE {
                return Err(NoteError::Argument(format!(
                    "moving '{}' to the trash does nothing; use --permanent or clean",
                    TRASH_SPACE
                )));
            }
        }
    }

    let ids = resolve_targets(store, target)?;
    let mut result = CmdResult::default();
    if ids.is_empty() {
        result.add_message(CmdMessage::info("No notes to remove"));
        return Ok(result);
    }

    let count = if permanent {
        store.permanent_remove_notes(&ids)?
    } else {
        store.remove_notes(&ids)?
    };

    let verb = if permanent {
        "Permanently removed"
    } else {
        "Moved to trash:"
    };
    result.add_message(CmdMessage::success(format!(
        "{} {} {}",
        verb,
        count,
        plural(count)
    )));
    Ok(result.with_ids(ids))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::add;
    use crate::store::sqlite::SqliteStore;

    fn store() -> SqliteStore {
        let mut store = SqliteStore::open_in_memory().unwrap();
        add::run(&mut store, "main", "a".into(), false).unwrap();
        add::run(&mut store, "work", "b".into(), false).unwrap();
        add::run(&mut store, "work", "c".into(), false).unwrap();
        store
    }

    #[test]
    fn soft_remove_moves_to_trash() {
        let mut store = store();
        let result = run(&mut store, &RemoveTarget::Ids(vec![1]), false).unwrap();
        assert_eq!(result.ids, vec![1]);
        assert_eq!(store.get_note(1).unwrap().space, TRASH_SPACE);
    }

    #[test]
    fn remove_all_in_space() {
        let mut store = store();
        let result = run(&mut store, &RemoveTarget::Space("work".into()), false).unwrap();
        assert_eq!(result.ids, vec![2, 3]);
        assert_eq!(store.get_note(1).unwrap().space, "main");
    }

    #[test]
    fn permanent_remove_deletes_rows() {
        let mut store = store();
        run(&mut store, &RemoveTarget::Ids(vec![2, 3]), true).unwrap();
        assert!(matches!(
            store.get_note(2),
            Err(NoteError::NotFound { .. })
        ));
    }

    #[test]
    fn soft_remove_of_trash_space_is_rejected() {
        let mut store = store();
        assert!(matches!(
            run(&mut store, &RemoveTarget::Space(TRASH_SPACE.into()), false),
            Err(NoteError::Argument(_))
        ));
    }

    #[test]
    fn empty_space_removes_nothing() {
        let mut store = store();
        let result = run(&mut store, &RemoveTarget::Space("nowhere".into()), true).unwrap();
        assert!(result.ids.is_empty());
        assert_eq!(result.messages[0].content, "No notes to remove");
    }

    #[test]
    fn remove_with_absent_id_is_partial() {
        let mut store = store();
        assert!(matches!(
            run(&mut store, &RemoveTarget::Ids(vec![1, 2, 42]), false),
            Err(NoteError::PartialMutation {
                requested: 3,
                succeeded: 2
            })
        ));
    }
}
