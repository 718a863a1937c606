//! The feed synchronization engine.
//!
//! ```text
//!  intents            ┌────────────────┐   spawn    ┌──────────────┐
//! ───────────────────►│ FeedController │ ─────────► │ ArticleSource│
//!  request_next_page  │  (pages.rs,    │            │  (tokio task)│
//!  retry_current_page │   search.rs)   │ ◄───────── └──────────────┘
//!  set_query          └───────┬────────┘ FetchOutcome
//!                             │ fold      (channel)
//!                             ▼
//!                       ┌───────────┐  project  ┌──────────┐
//!                       │ SyncStore │ ────────► │ FeedView │
//!                       └───────────┘           └──────────┘
//! ```
//!
//! * **`store`** — canonical state and pure transitions.
//! * **`pages`** — the page orchestrator: gating, initial load, retry.
//! * **`search`** — the search overlay: validation, supersession.
//! * **`view`** — the read-only projection the UI renders.
//!
//! Fetches run on spawned Tokio tasks and report back over a channel.  Only
//! the owner of the [`FeedController`] mutates the store, when it drains that
//! channel, so outcomes are applied one at a time in arrival order.

mod pages;
mod search;
mod store;
mod view;

pub use store::{FetchStatus, SearchTicket, Stream, SyncStore};
pub use view::FeedView;

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::debug;

use crate::source::{ArticleRecord, ArticleSource, FetchError};

/// Messages sent from fetch tasks back to the controller.
#[derive(Debug)]
pub enum FetchOutcome {
    /// A page fetch for `cursor` resolved.
    Page {
        cursor: u32,
        result: Result<Vec<ArticleRecord>, FetchError>,
    },
    /// A search fetch resolved.
    Search {
        ticket: SearchTicket,
        query: String,
        result: Result<Vec<ArticleRecord>, FetchError>,
    },
}

/// Owns the sync state for one screen session and drives its fetches.
pub struct FeedController {
    store: SyncStore,
    source: Arc<dyn ArticleSource>,
    tx: mpsc::UnboundedSender<FetchOutcome>,
    rx: mpsc::UnboundedReceiver<FetchOutcome>,
}

impl FeedController {
    /// Create a controller and issue the initial page request.
    ///
    /// # Panics
    ///
    /// Must be called from within a Tokio runtime, since the initial fetch is
    /// spawned immediately.
    pub fn new(source: Arc<dyn ArticleSource>) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let mut controller = Self {
            store: SyncStore::new(),
            source,
            tx,
            rx,
        };
        controller.request_next_page();
        controller
    }

    pub fn store(&self) -> &SyncStore {
        &self.store
    }

    /// Project the current state for rendering.
    pub fn view(&self) -> FeedView<'_> {
        FeedView::new(&self.store)
    }

    pub fn source_name(&self) -> &str {
        self.source.name()
    }

    /// Apply every outcome that has already arrived, without waiting.
    ///
    /// Returns how many outcomes were processed.  Called once per UI tick.
    pub fn drain(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(outcome) = self.rx.try_recv() {
            self.apply(outcome);
            applied += 1;
        }
        applied
    }

    /// Wait for the next outcome and apply it.
    ///
    /// Never resolves if no fetch is in flight.
    #[cfg(test)]
    pub(crate) async fn settle_next(&mut self) {
        // The controller holds a sender, so the channel never closes.
        if let Some(outcome) = self.rx.recv().await {
            self.apply(outcome);
        }
    }

    /// Fold one fetch outcome into the store.
    pub fn apply(&mut self, outcome: FetchOutcome) {
        match outcome {
            FetchOutcome::Page { cursor, result } => self.apply_page(cursor, result),
            FetchOutcome::Search {
                ticket,
                query,
                result,
            } => self.apply_search(ticket, &query, result),
        }
    }

    /// Run `fetch` on a new task and post its outcome to the channel.
    fn dispatch<F>(&self, fetch: F)
    where
        F: std::future::Future<Output = FetchOutcome> + Send + 'static,
    {
        let tx = self.tx.clone();
        tokio::spawn(async move {
            // If the receiver is gone the screen has been torn down;
            // silently drop the result.
            if tx.send(fetch.await).is_err() {
                debug!("feed controller dropped before fetch resolved");
            }
        });
    }
}
