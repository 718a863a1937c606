//! Read-only projection of the sync state for rendering.
//!
//! A [`FeedView`] borrows the store and derives everything the UI needs:
//! which list to show, and the loading / empty / error conditions of the
//! stream that list belongs to.  It never mutates anything; intents go
//! through [`FeedController`](super::FeedController).

use super::{FetchStatus, Stream, SyncStore};
use crate::source::{ArticleRecord, FetchError};

#[derive(Debug, Clone, Copy)]
pub struct FeedView<'a> {
    store: &'a SyncStore,
}

impl<'a> FeedView<'a> {
    pub fn new(store: &'a SyncStore) -> Self {
        Self { store }
    }

    /// The stream whose results are on screen.
    pub fn stream(&self) -> Stream {
        if self.store.search_active() {
            Stream::Search
        } else {
            Stream::Pagination
        }
    }

    fn status(&self) -> FetchStatus {
        match self.stream() {
            Stream::Search => self.store.search_status(),
            Stream::Pagination => self.store.pagination_status(),
        }
    }

    /// Search results while a query is active, otherwise the feed.
    pub fn displayed(&self) -> &'a [ArticleRecord] {
        match self.stream() {
            Stream::Search => self.store.search_results(),
            Stream::Pagination => self.store.accumulated(),
        }
    }

    pub fn search_query(&self) -> Option<&'a str> {
        self.store.search_query()
    }

    /// Nothing to show and nothing still coming.
    pub fn is_empty(&self) -> bool {
        // With an empty list, "failed with no prior data" is just "failed".
        self.displayed().is_empty()
            && matches!(self.status(), FetchStatus::Success | FetchStatus::Failed)
    }

    pub fn is_loading(&self) -> bool {
        self.status() == FetchStatus::Loading
    }

    pub fn is_failed(&self) -> bool {
        self.status() == FetchStatus::Failed
    }

    /// The error of the displayed stream, if its last fetch failed.
    pub fn last_error(&self) -> Option<&'a FetchError> {
        self.store.last_error(self.stream())
    }

    pub fn can_load_more(&self) -> bool {
        self.store.can_load_more()
    }

    /// Message for the empty state, when there is one.
    pub fn empty_message(&self) -> Option<String> {
        if !self.is_empty() {
            return None;
        }
        Some(match self.search_query() {
            Some(query) => format!("No articles match \"{query}\""),
            None => "No articles found".to_string(),
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::make_batch;

    #[test]
    fn fresh_store_is_neither_empty_nor_loading() {
        let store = SyncStore::new();
        let view = FeedView::new(&store);

        assert_eq!(view.stream(), Stream::Pagination);
        assert!(view.displayed().is_empty());
        assert!(!view.is_empty(), "idle is not empty");
        assert!(!view.is_loading());
        assert!(view.can_load_more());
        assert!(view.empty_message().is_none());
    }

    #[test]
    fn loading_page_is_reported() {
        let mut store = SyncStore::new();
        store.begin_page_fetch();
        let view = FeedView::new(&store);

        assert!(view.is_loading());
        assert!(!view.is_empty());
        assert!(!view.can_load_more());
    }

    #[test]
    fn empty_feed_shows_feed_message() {
        let mut store = SyncStore::new();
        store.begin_page_fetch();
        store.complete_page_fetch(0, vec![]);
        let view = FeedView::new(&store);

        assert!(view.is_empty());
        assert_eq!(view.empty_message().as_deref(), Some("No articles found"));
        assert!(!view.can_load_more());
    }

    #[test]
    fn failed_first_page_is_empty_with_error() {
        let mut store = SyncStore::new();
        store.begin_page_fetch();
        store.fail_page_fetch(0, FetchError::Network("offline".into()));
        let view = FeedView::new(&store);

        assert!(view.is_empty());
        assert!(view.is_failed());
        assert_eq!(view.last_error(), Some(&FetchError::Network("offline".into())));
    }

    #[test]
    fn failed_later_page_keeps_list_visible() {
        let mut store = SyncStore::new();
        store.begin_page_fetch();
        store.complete_page_fetch(0, make_batch("p0", 3));
        store.begin_page_fetch();
        store.fail_page_fetch(1, FetchError::Status(502));
        let view = FeedView::new(&store);

        assert!(!view.is_empty());
        assert_eq!(view.displayed().len(), 3);
        assert!(view.last_error().is_some());
    }

    #[test]
    fn search_takes_precedence_and_hides_feed_state() {
        let mut store = SyncStore::new();
        store.begin_page_fetch();
        store.complete_page_fetch(0, make_batch("p0", 5));
        store.begin_page_fetch();
        store.fail_page_fetch(1, FetchError::Status(500));

        let ticket = store.begin_search("mars").unwrap();
        let view = FeedView::new(&store);
        assert_eq!(view.stream(), Stream::Search);
        assert!(view.is_loading());
        assert!(view.last_error().is_none(), "pagination error is not shown over search");
        assert!(!view.can_load_more());

        store.complete_search(ticket, "mars", vec![]);
        let view = FeedView::new(&store);
        assert!(view.is_empty());
        assert_eq!(
            view.empty_message().as_deref(),
            Some("No articles match \"mars\"")
        );
    }

    #[test]
    fn pagination_error_returns_after_failed_search_is_cleared() {
        let mut store = SyncStore::new();
        store.begin_page_fetch();
        store.complete_page_fetch(0, make_batch("p0", 3));
        store.begin_page_fetch();
        store.fail_page_fetch(1, FetchError::Status(500));
        let ticket = store.begin_search("x").unwrap();
        store.fail_search(ticket, "x", FetchError::Network("down".into()));

        let view = FeedView::new(&store);
        assert_eq!(view.last_error(), Some(&FetchError::Network("down".into())));

        store.clear_search();
        let view = FeedView::new(&store);
        assert!(view.is_failed());
        assert_eq!(view.last_error(), Some(&FetchError::Status(500)));
    }

    #[test]
    fn clearing_search_falls_back_to_feed() {
        let mut store = SyncStore::new();
        store.begin_page_fetch();
        store.complete_page_fetch(0, make_batch("p0", 5));
        let ticket = store.begin_search("x").unwrap();
        store.complete_search(ticket, "x", make_batch("x", 1));
        store.clear_search();

        let view = FeedView::new(&store);
        assert_eq!(view.stream(), Stream::Pagination);
        assert_eq!(view.displayed().len(), 5);
        assert!(view.can_load_more());
    }
}
