//! # Pagination Iterator
//!
//! [`NoteIter`] walks every note matching a [`NoteQuery`] one page at a time,
//! so a scan over the whole store never holds more than one page in memory.
//!
//! It is pull-based: a page is fetched only when the consumer asks for the
//! next note and the current page is used up. There is no background producer,
//! so a consumer that stops early leaves nothing blocked behind it. A
//! [`CancelToken`] lets another party (a signal handler, a UI) stop the scan
//! between pages.
//!
//! The sequence ends when:
//! - a page comes back empty
//! - the token is cancelled
//! - the store returns an error, which is yielded once as the final element
//!
//! The same sort options are used for every page. When the query carries none,
//! `id` ascending is used so that page boundaries are stable. Ordering is only
//! guaranteed while nothing else writes to the matched rows.

use crate::error::Result;
use crate::model::Note;
use crate::query::{Column, NoteQuery, PageOpts, SortOpts};
use crate::store::DataStore;
use std::iter::FusedIterator;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::debug;

pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Shared flag that stops a running [`NoteIter`].
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

pub struct NoteIter<'a, S: DataStore + ?Sized> {
    store: &'a S,
    query: NoteQuery,
    page_size: usize,
    page: usize,
    buffer: std::vec::IntoIter<Note>,
    cancel: CancelToken,
    done: bool,
}

impl<'a, S: DataStore + ?Sized> NoteIter<'a, S> {
    pub fn new(store: &'a S, query: NoteQuery) -> Self {
        let mut query = query;
        if query.sort.is_none() {
            query.sort = Some(SortOpts::asc(Column::Id));
        }
        Self {
            store,
            query,
            page_size: DEFAULT_PAGE_SIZE,
            page: 0,
            buffer: Vec::new().into_iter(),
            cancel: CancelToken::new(),
            done: false,
        }
    }

    /// Page size must be positive; zero is treated as one.
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    pub fn with_cancel(mut self, cancel: CancelToken) -> Self {
        self.cancel = cancel;
        self
    }

    /// A handle that cancels this iterator.
    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    fn fetch_page(&mut self) -> Result<Vec<Note>> {
        let page = PageOpts::new(self.page_size, self.page * self.page_size);
        let query = self.query.clone().paged(page);
        let notes = self.store.select_notes(&query)?;
        debug!(page = self.page, fetched = notes.len(), "fetched page");
        self.page += 1;
        Ok(notes)
    }
}

impl<S: DataStore + ?Sized> Iterator for NoteIter<'_, S> {
    type Item = Result<Note>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if self.done {
                return None;
            }
            if self.cancel.is_cancelled() {
                debug!(page = self.page, "note iteration cancelled");
                self.done = true;
                return None;
            }
            if let Some(note) = self.buffer.next() {
                return Some(Ok(note));
            }

            match self.fetch_page() {
                Ok(notes) if notes.is_empty() => {
                    self.done = true;
                    return None;
                }
                Ok(notes) => self.buffer = notes.into_iter(),
                Err(e) => {
                    self.done = true;
                    return Some(Err(e));
                }
            }
        }
    }
}

impl<S: DataStore + ?Sized> FusedIterator for NoteIter<'_, S> {}

/// Iterate every note matching `query`, a page at a time.
pub fn iterate_notes<S: DataStore + ?Sized>(store: &S, query: NoteQuery) -> NoteIter<'_, S> {
    NoteIter::new(store, query)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::NoteError;
    use crate::model::{NoteId, TRASH_SPACE};
    use crate::store::sqlite::SqliteStore;
    use std::cell::Cell;
    use std::collections::HashSet;

    fn seeded(count: usize) -> SqliteStore {
        let mut store = SqliteStore::open_in_memory().unwrap();
        for i in 0..count {
            store
                .add_note(&Note::new("main", format!("note {i}")).pinned(i % 5 == 0), false)
                .unwrap();
        }
        store
    }

    #[test]
    fn yields_every_note_exactly_once() {
        let store = seeded(23);
        let ids: Vec<NoteId> = iterate_notes(&store, NoteQuery::new())
            .map(|r| r.unwrap().id)
            .collect();

        assert_eq!(ids.len(), 23);
        let unique: HashSet<_> = ids.iter().collect();
        assert_eq!(unique.len(), 23);
    }

    #[test]
    fn matches_unpaged_order() {
        let store = seeded(17);
        let sort = SortOpts::desc(Column::Content);
        let full: Vec<NoteId> = store
            .select_notes(&NoteQuery::new().sorted(sort))
            .unwrap()
            .into_iter()
            .map(|n| n.id)
            .collect();

        let iterated: Vec<NoteId> = NoteIter::new(&store, NoteQuery::new().sorted(sort))
            .with_page_size(4)
            .map(|r| r.unwrap().id)
            .collect();
        assert_eq!(iterated, full);
    }

    #[test]
    fn empty_store_ends_immediately() {
        let store = seeded(0);
        let mut iter = iterate_notes(&store, NoteQuery::new());
        assert!(iter.next().is_none());
        assert!(iter.next().is_none());
    }

    #[test]
    fn respects_space_filter() {
        let mut store = seeded(5);
        store.remove_notes(&[1, 2]).unwrap();

        let visible = iterate_notes(&store, NoteQuery::new()).count();
        assert_eq!(visible, 3);

        let trashed: Vec<NoteId> =
            iterate_notes(&store, NoteQuery::new().in_spaces([TRASH_SPACE]))
                .map(|r| r.unwrap().id)
                .collect();
        assert_eq!(trashed, vec![1, 2]);
    }

    #[test]
    fn cancel_stops_mid_page() {
        let store = seeded(25);
        let mut iter = NoteIter::new(&store, NoteQuery::new()).with_page_size(10);
        let token = iter.cancel_token();

        let first: Vec<_> = iter.by_ref().take(3).collect();
        assert_eq!(first.len(), 3);
        token.cancel();

        // Buffered notes are dropped too.
        assert!(iter.next().is_none());
        assert!(iter.next().is_none());
    }

    /// A store whose `select_notes` fails on a chosen call.
    struct FailingStore {
        inner: SqliteStore,
        fail_on: usize,
        calls: Cell<usize>,
    }

    impl DataStore for FailingStore {
        fn add_note(&mut self, note: &Note, assign: bool) -> Result<NoteId> {
            self.inner.add_note(note, assign)
        }
        fn get_note(&self, id: NoteId) -> Result<Note> {
            self.inner.get_note(id)
        }
        fn get_notes(&self, ids: &[NoteId]) -> Result<Vec<Note>> {
            self.inner.get_notes(ids)
        }
        fn select_notes(&self, query: &NoteQuery) -> Result<Vec<Note>> {
            let call = self.calls.get();
            self.calls.set(call + 1);
            if call == self.fail_on {
                return Err(NoteError::Argument("boom".into()));
            }
            self.inner.select_notes(query)
        }
        fn select_spaces(&self, hidden: bool, sort: Option<&SortOpts>) -> Result<Vec<String>> {
            self.inner.select_spaces(hidden, sort)
        }
        fn replace_content(&mut self, id: NoteId, content: &str) -> Result<()> {
            self.inner.replace_content(id, content)
        }
        fn move_notes(&mut self, ids: &[NoteId], to: &str) -> Result<usize> {
            self.inner.move_notes(ids, to)
        }
        fn pin_notes(&mut self, ids: &[NoteId], pinned: bool) -> Result<usize> {
            self.inner.pin_notes(ids, pinned)
        }
        fn permanent_remove_notes(&mut self, ids: &[NoteId]) -> Result<usize> {
            self.inner.permanent_remove_notes(ids)
        }
    }

    #[test]
    fn store_error_is_the_terminal_element() {
        let store = FailingStore {
            inner: seeded(25),
            fail_on: 1,
            calls: Cell::new(0),
        };
        let items: Vec<_> = NoteIter::new(&store, NoteQuery::new())
            .with_page_size(10)
            .collect();

        assert_eq!(items.len(), 11);
        assert!(items[..10].iter().all(|r| r.is_ok()));
        assert!(matches!(items[10], Err(NoteError::Argument(_))));
    }
}
