//! Search overlay: query-driven fetches that take display precedence over
//! the paginated feed without touching it.

use std::sync::Arc;

use tracing::{debug, warn};

use super::{FeedController, FetchOutcome, FetchStatus, SearchTicket};
use crate::source::{ArticleRecord, FetchError};

/// Longest query accepted before a fetch is attempted, in characters.
pub const MAX_QUERY_LEN: usize = 256;

/// Reject queries the remote would refuse anyway.
fn validate_query(query: &str) -> Result<(), FetchError> {
    if query.chars().count() > MAX_QUERY_LEN {
        return Err(FetchError::Validation(format!(
            "query longer than {MAX_QUERY_LEN} characters"
        )));
    }
    if query.chars().any(char::is_control) {
        return Err(FetchError::Validation("query contains control characters".into()));
    }
    Ok(())
}

impl FeedController {
    /// Point the overlay at `query`.
    ///
    /// A blank query turns the overlay off and re-arms pagination.  Any
    /// other query supersedes the previous search: whatever the earlier
    /// request returns is discarded on arrival.  Returns whether a fetch was
    /// issued.
    pub fn set_query(&mut self, query: &str) -> bool {
        let query = query.trim();
        if query.is_empty() {
            if self.store.clear_search() {
                debug!("search cleared");
                self.store.reset_pagination();
            }
            return false;
        }

        let Some(ticket) = self.store.begin_search(query) else {
            return false;
        };
        let query = query.to_string();

        if let Err(e) = validate_query(&query) {
            warn!(error = %e, "query rejected");
            self.store.fail_search(ticket, &query, e);
            return false;
        }

        self.fetch_search(ticket, query);
        true
    }

    /// Re-issue the active query after a failed search.
    pub fn retry_search(&mut self) -> bool {
        if self.store.search_status() != FetchStatus::Failed {
            return false;
        }
        match self.store.search_query().map(str::to_string) {
            Some(query) => self.set_query(&query),
            None => false,
        }
    }

    fn fetch_search(&mut self, ticket: SearchTicket, query: String) {
        let source = Arc::clone(&self.source);
        debug!(?ticket, query = %query, "requesting search");
        self.dispatch(async move {
            let result = source.fetch_search(&query).await;
            FetchOutcome::Search {
                ticket,
                query,
                result,
            }
        });
    }

    pub(super) fn apply_search(
        &mut self,
        ticket: SearchTicket,
        query: &str,
        result: Result<Vec<ArticleRecord>, FetchError>,
    ) {
        if !self.store.is_current_search(ticket, query) {
            debug!(?ticket, query, "discarding superseded search result");
            return;
        }
        match result {
            Ok(records) => {
                debug!(query, count = records.len(), "search applied");
                self.store.complete_search(ticket, query, records);
            }
            Err(e) => {
                warn!(query, error = %e, "search failed");
                self.store.fail_search(ticket, query, e);
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
