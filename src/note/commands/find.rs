use crate::commands::CmdResult;
use crate::error::{NoteError, Result};
use crate::iterate::{CancelToken, NoteIter, DEFAULT_PAGE_SIZE};
use crate::model::{Note, TRASH_SPACE};
use crate::query::NoteQuery;
use crate::store::DataStore;
use regex::Regex;

/// How a note's content is matched.
#[derive(Debug, Clone)]
pub enum Finder {
    Substring(String),
    /// Substring match ignoring case.
    Insensitive(String),
    Regex(Regex),
}

impl Finder {
    pub fn substring(needle: impl Into<String>) -> Self {
        Finder::Substring(needle.into())
    }

    pub fn insensitive(needle: impl Into<String>) -> Self {
        Finder::Insensitive(needle.into().to_lowercase())
    }

    pub fn regex(pattern: &str) -> Result<Self> {
        Regex::new(pattern)
            .map(Finder::Regex)
            .map_err(|e| NoteError::Argument(format!("invalid pattern: {e}")))
    }

    pub fn matches(&self, content: &str) -> bool {
        match self {
            Finder::Substring(needle) => content.contains(needle.as_str()),
            Finder::Insensitive(needle) => content.to_lowercase().contains(needle.as_str()),
            Finder::Regex(re) => re.is_match(content),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct FindOptions {
    /// Restrict the scan to these spaces; empty means all (per the hidden policy).
    pub spaces: Vec<String>,
    pub include_hidden: bool,
    pub include_trash: bool,
    pub page_size: Option<usize>,
    pub cancel: Option<CancelToken>,
}

impl FindOptions {
    fn scan_query(&self) -> NoteQuery {
        NoteQuery::new()
            .in_spaces(self.spaces.iter().map(String::as_str))
            .include_hidden(self.include_hidden || self.include_trash)
    }

    fn keeps(&self, note: &Note) -> bool {
        // Explicitly named spaces are searched even when hidden, trash included.
        if self.spaces.contains(&note.space) {
            return true;
        }
        if note.space == TRASH_SPACE {
            return self.include_trash;
        }
        !note.is_hidden() || self.include_hidden
    }
}

/// Streams every candidate note through the pagination iterator and keeps
/// those the finder matches.
pub fn run<S: DataStore>(store: &S, finder: &Finder, options: &FindOptions) -> Result<CmdResult> {
    let mut iter = NoteIter::new(store, options.scan_query())
        .with_page_size(options.page_size.unwrap_or(DEFAULT_PAGE_SIZE));
    if let Some(cancel) = &options.cancel {
        iter = iter.with_cancel(cancel.clone());
    }

    let mut matches = Vec::new();
    for note in iter {
        let note = note?;
        if options.keeps(&note) && finder.matches(&note.content) {
            matches.push(note);
        }
    }
    Ok(CmdResult::default().with_listed_notes(matches))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::add;
    use crate::model::note_ids;
    use crate::store::sqlite::SqliteStore;

    fn store() -> SqliteStore {
        let mut store = SqliteStore::open_in_memory().unwrap();
        add::run(&mut store, "main", "Buy milk".into(), false).unwrap();
        add::run(&mut store, "work", "call Bob about milk".into(), false).unwrap();
        add::run(&mut store, ".private", "milk secrets".into(), false).unwrap();
        add::run(&mut store, "main", "old milk".into(), false).unwrap();
        add::run(&mut store, "main", "bread".into(), false).unwrap();
        store.remove_notes(&[4]).unwrap();
        store
    }

    fn small_pages() -> FindOptions {
        FindOptions {
            page_size: Some(2),
            ..FindOptions::default()
        }
    }

    #[test]
    fn substring_skips_hidden_and_trash() {
        let store = store();
        let result = run(&store, &Finder::substring("milk"), &small_pages()).unwrap();
        assert_eq!(note_ids(&result.listed_notes), vec![1, 2]);
    }

    #[test]
    fn substring_is_case_sensitive() {
        let store = store();
        let result = run(&store, &Finder::substring("MILK"), &small_pages()).unwrap();
        assert!(result.listed_notes.is_empty());

        let result = run(&store, &Finder::insensitive("MILK"), &small_pages()).unwrap();
        assert_eq!(note_ids(&result.listed_notes), vec![1, 2]);
    }

    #[test]
    fn hidden_and_trash_on_request() {
        let store = store();
        let hidden = FindOptions {
            include_hidden: true,
            ..small_pages()
        };
        let result = run(&store, &Finder::substring("milk"), &hidden).unwrap();
        assert_eq!(note_ids(&result.listed_notes), vec![1, 2, 3]);

        let trash = FindOptions {
            include_trash: true,
            ..small_pages()
        };
        let result = run(&store, &Finder::substring("milk"), &trash).unwrap();
        assert_eq!(note_ids(&result.listed_notes), vec![1, 2, 4]);
    }

    #[test]
    fn regex_finder() {
        let store = store();
        let finder = Finder::regex(r"^(Buy|bread)").unwrap();
        let result = run(&store, &finder, &small_pages()).unwrap();
        assert_eq!(note_ids(&result.listed_notes), vec![1, 5]);

        assert!(matches!(Finder::regex("("), Err(NoteError::Argument(_))));
    }

    #[test]
    fn restricted_to_spaces() {
        let store = store();
        let options = FindOptions {
            spaces: vec!["work".into(), ".private".into()],
            ..small_pages()
        };
        let result = run(&store, &Finder::substring("milk"), &options).unwrap();
        assert_eq!(note_ids(&result.listed_notes), vec![2, 3]);
    }

    #[test]
    fn named_trash_space_is_searched() {
        let store = store();
        let options = FindOptions {
            spaces: vec![TRASH_SPACE.into()],
            ..small_pages()
        };
        let result = run(&store, &Finder::substring("milk"), &options).unwrap();
        assert_eq!(note_ids(&result.listed_notes), vec![4]);
    }

    #[test]
    fn cancelled_scan_returns_nothing() {
        let store = store();
        let token = CancelToken::new();
        token.cancel();
        let options = FindOptions {
            cancel: Some(token),
            ..small_pages()
        };
        let result = run(&store, &Finder::substring("milk"), &options).unwrap();
        assert!(result.listed_notes.is_empty());
    }
}
