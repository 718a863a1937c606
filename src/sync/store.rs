//! Canonical sync state and its transition functions.
//!
//! [`SyncStore`] owns every article the screen knows about.  It performs no
//! I/O: the controller begins a fetch here, runs it elsewhere, and folds the
//! outcome back in with the matching `complete_*` / `fail_*` call.
//!
//! Every transition is total.  A transition that does not apply to the
//! current state (completing a fetch that was never begun, a result for a
//! superseded search) leaves the state untouched and returns `false`.

use std::collections::HashSet;

use crate::source::{ArticleRecord, FetchError};

/// Lifecycle of one stream's most recent fetch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FetchStatus {
    #[default]
    Idle,
    Loading,
    Success,
    Failed,
}

/// The two independent fetch lifecycles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stream {
    Pagination,
    Search,
}

/// Identifies one search request.  A newer ticket supersedes all older ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct SearchTicket(u64);

#[derive(Debug, Default)]
pub struct SyncStore {
    /// Append-only, de-duplicated, in source order.
    accumulated: Vec<ArticleRecord>,
    /// Fast lookup to avoid inserting duplicates.
    seen: HashSet<String>,
    cursor: u32,
    pagination_status: FetchStatus,
    last_page_was_empty: bool,

    search_query: Option<String>,
    search_results: Vec<ArticleRecord>,
    search_status: FetchStatus,
    /// Ticket of the newest search begun; 0 means none yet.
    search_generation: u64,

    /// One slot per stream, so neither can hide the other's failure.
    page_error: Option<FetchError>,
    search_error: Option<FetchError>,
}

impl SyncStore {
    pub fn new() -> Self {
        Self::default()
    }

    // -- reads ---------------------------------------------------------------

    pub fn accumulated(&self) -> &[ArticleRecord] {
        &self.accumulated
    }

    pub fn cursor(&self) -> u32 {
        self.cursor
    }

    pub fn pagination_status(&self) -> FetchStatus {
        self.pagination_status
    }

    pub fn last_page_was_empty(&self) -> bool {
        self.last_page_was_empty
    }

    pub fn search_query(&self) -> Option<&str> {
        self.search_query.as_deref()
    }

    pub fn search_results(&self) -> &[ArticleRecord] {
        &self.search_results
    }

    pub fn search_status(&self) -> FetchStatus {
        self.search_status
    }

    /// The error of `stream`'s most recent failed fetch, if any.
    pub fn last_error(&self, stream: Stream) -> Option<&FetchError> {
        match stream {
            Stream::Pagination => self.page_error.as_ref(),
            Stream::Search => self.search_error.as_ref(),
        }
    }

    /// Whether the search overlay currently owns the display.
    pub fn search_active(&self) -> bool {
        self.search_query.is_some()
    }

    /// The gating predicate for "load more": no search, not already loading,
    /// and the feed has not run dry.
    pub fn can_load_more(&self) -> bool {
        !self.search_active()
            && !self.last_page_was_empty
            && self.pagination_status != FetchStatus::Loading
    }

    // -- pagination stream ---------------------------------------------------

    /// Mark a page fetch as in flight.  Rejected if one already is.
    pub fn begin_page_fetch(&mut self) -> bool {
        if self.pagination_status == FetchStatus::Loading {
            return false;
        }
        self.pagination_status = FetchStatus::Loading;
        self.page_error = None;
        true
    }

    /// Fold a page of records fetched for `cursor`.
    ///
    /// An empty page ends pagination and leaves the cursor where it is.
    pub fn complete_page_fetch(&mut self, cursor: u32, records: Vec<ArticleRecord>) -> bool {
        if self.pagination_status != FetchStatus::Loading || cursor != self.cursor {
            return false;
        }

        self.last_page_was_empty = records.is_empty();
        if !records.is_empty() {
            self.cursor += 1;
        }
        for record in records {
            if self.seen.insert(record.id.clone()) {
                self.accumulated.push(record);
            }
        }
        self.pagination_status = FetchStatus::Success;
        true
    }

    pub fn fail_page_fetch(&mut self, cursor: u32, error: FetchError) -> bool {
        if self.pagination_status != FetchStatus::Loading || cursor != self.cursor {
            return false;
        }
        self.pagination_status = FetchStatus::Failed;
        self.page_error = Some(error);
        true
    }

    /// Re-arm pagination after the feed ran dry.
    ///
    /// Keeps every accumulated article and the unadvanced cursor, so the
    /// next request asks for the page that came back empty.  A pending
    /// failure stays visible until the page is actually re-fetched.
    /// Rejected while a page fetch is in flight.
    pub fn reset_pagination(&mut self) -> bool {
        if self.pagination_status == FetchStatus::Loading {
            return false;
        }
        self.last_page_was_empty = false;
        true
    }

    // -- search stream -------------------------------------------------------

    /// Start a search for `query`, superseding any earlier one.
    ///
    /// A blank query clears the overlay instead and returns `None`; results
    /// and status of the previous search are left as they were.
    pub fn begin_search(&mut self, query: &str) -> Option<SearchTicket> {
        let query = query.trim();
        if query.is_empty() {
            self.clear_search();
            return None;
        }

        self.search_generation += 1;
        self.search_query = Some(query.to_string());
        self.search_status = FetchStatus::Loading;
        self.search_error = None;
        Some(SearchTicket(self.search_generation))
    }

    /// Drop the overlay.  Returns whether one was active.
    pub fn clear_search(&mut self) -> bool {
        let was_active = self.search_query.take().is_some();
        self.search_error = None;
        was_active
    }

    /// Whether a result for `ticket`/`query` would still be applied.
    pub fn is_current_search(&self, ticket: SearchTicket, query: &str) -> bool {
        ticket.0 == self.search_generation
            && self.search_query.as_deref() == Some(query)
            && self.search_status == FetchStatus::Loading
    }

    /// Replace the search results.  Stale tickets are ignored.
    pub fn complete_search(
        &mut self,
        ticket: SearchTicket,
        query: &str,
        records: Vec<ArticleRecord>,
    ) -> bool {
        if !self.is_current_search(ticket, query) {
            return false;
        }
        self.search_results = records;
        self.search_status = FetchStatus::Success;
        true
    }

    /// Record a failed search.  The last good results are kept.
    pub fn fail_search(&mut self, ticket: SearchTicket, query: &str, error: FetchError) -> bool {
        if !self.is_current_search(ticket, query) {
            return false;
        }
        self.search_status = FetchStatus::Failed;
        self.search_error = Some(error);
        true
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
