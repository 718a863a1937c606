//! Page orchestrator: decides whether a "load more" intent becomes a fetch.

use std::sync::Arc;

use tracing::{debug, info, warn};

use super::{FeedController, FetchOutcome, FetchStatus};
use crate::source::{ArticleRecord, FetchError};

impl FeedController {
    /// Fetch the next page unless the gating policy says no.
    ///
    /// A no-op while a search is active, while a page fetch is already in
    /// flight, or after the feed returned an empty page.  Returns whether a
    /// fetch was issued.
    pub fn request_next_page(&mut self) -> bool {
        if !self.store.can_load_more() {
            return false;
        }
        self.fetch_current_page()
    }

    /// Re-fetch the page that failed.  Only allowed after a failure.
    pub fn retry_current_page(&mut self) -> bool {
        if self.store.pagination_status() != FetchStatus::Failed {
            return false;
        }
        self.fetch_current_page()
    }

    /// Re-arm pagination after the end of the feed and ask for more.
    pub fn refresh(&mut self) -> bool {
        if !self.store.reset_pagination() {
            return false;
        }
        self.request_next_page()
    }

    fn fetch_current_page(&mut self) -> bool {
        if !self.store.begin_page_fetch() {
            return false;
        }

        let cursor = self.store.cursor();
        let source = Arc::clone(&self.source);
        debug!(cursor, "requesting page");
        self.dispatch(async move {
            let result = source.fetch_page(cursor).await;
            FetchOutcome::Page { cursor, result }
        });
        true
    }

    pub(super) fn apply_page(&mut self, cursor: u32, result: Result<Vec<ArticleRecord>, FetchError>) {
        match result {
            Ok(records) => {
                let count = records.len();
                if !self.store.complete_page_fetch(cursor, records) {
                    warn!(cursor, "ignoring page result with no matching request");
                    return;
                }
                if count == 0 {
                    info!(cursor, "feed exhausted; pagination stopped");
                } else {
                    debug!(cursor, count, total = self.store.accumulated().len(), "page applied");
                }
            }
            Err(e) => {
                warn!(cursor, error = %e, "page fetch failed");
                self.store.fail_page_fetch(cursor, e);
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
