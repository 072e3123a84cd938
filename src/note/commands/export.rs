use crate::codec::{encode_records, Format, NoteRecord};
use crate::commands::{plural, CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::NoteId;
use crate::query::NoteQuery;
use crate::store::DataStore;

/// Encodes the selected notes. Explicit ids win over the query.
pub fn run<S: DataStore>(
    store: &S,
    query: &NoteQuery,
    ids: &[NoteId],
    format: Format,
) -> Result<CmdResult> {
    let notes = if ids.is_empty() {
        store.select_notes(query)?
    } else {
        store.get_notes(ids)?
    };

    let records: Vec<NoteRecord> = notes.iter().map(NoteRecord::from).collect();
    let output = encode_records(&records, format)?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Exported {} {}",
        notes.len(),
        plural(notes.len())
    )));
    Ok(result.with_listed_notes(notes).with_output(output))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::decode_records;
    use crate::commands::{add, import};
    use crate::store::sqlite::SqliteStore;

    fn store() -> SqliteStore {
        let mut store = SqliteStore::open_in_memory().unwrap();
        add::run(&mut store, "main", "alpha".into(), true).unwrap();
        add::run(&mut store, "work", "beta".into(), false).unwrap();
        add::run(&mut store, ".hidden", "gamma".into(), false).unwrap();
        store
    }

    #[test]
    fn export_visible_notes_as_json() {
        let store = store();
        let result = run(&store, &NoteQuery::new(), &[], Format::Json).unwrap();
        let output = result.output.unwrap();

        let records = decode_records(output.as_bytes(), Format::Json).unwrap();
        let contents: Vec<_> = records.iter().map(|r| r.content.as_str()).collect();
        assert_eq!(contents, vec!["alpha", "beta"]);
        assert_eq!(records[0].id, Some(1));
        assert_eq!(records[0].pinned, Some(true));
    }

    #[test]
    fn export_by_ids_as_yaml() {
        let store = store();
        let result = run(&store, &NoteQuery::new(), &[3], Format::Yaml).unwrap();
        let output = result.output.unwrap();
        assert!(output.contains("content: gamma"));
        assert!(output.contains("space: .hidden"));
    }

    #[test]
    fn exported_notes_import_into_another_store() {
        let source = store();
        let exported = run(&source, &NoteQuery::new().include_hidden(true), &[], Format::Json)
            .unwrap()
            .output
            .unwrap();

        let mut target = SqliteStore::open_in_memory().unwrap();
        import::from_reader(&mut target, exported.as_bytes(), Format::Json, "main").unwrap();

        for id in 1..=3 {
            let a = source.get_note(id).unwrap();
            let b = target.get_note(id).unwrap();
            assert_eq!(
                (a.space, a.content, a.created, a.updated, a.pinned),
                (b.space, b.content, b.created, b.updated, b.pinned)
            );
        }
    }
}
