//! Mock source for testing.
//!
//! Allows scripting page and search responses, capturing every call, and
//! holding individual pages or search queries back so tests can force
//! out-of-order completion.

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::Notify;

use super::{ArticleRecord, ArticleSource, FetchError};

type Response = Result<Vec<ArticleRecord>, FetchError>;

/// Scriptable in-memory [`ArticleSource`].
///
/// Clones share state, so a test can keep one handle while the controller
/// owns another.
#[derive(Debug, Default, Clone)]
pub struct MockSource {
    inner: Arc<Mutex<MockSourceInner>>,
}

#[derive(Debug, Default)]
struct MockSourceInner {
    page_queue: VecDeque<Response>,
    search_responses: HashMap<String, VecDeque<Response>>,
    held_pages: HashMap<u32, Arc<Notify>>,
    held_searches: HashMap<String, Arc<Notify>>,
    page_calls: Vec<u32>,
    search_calls: Vec<String>,
}

impl MockSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue the response for the next `fetch_page()` call.
    ///
    /// An exhausted queue answers with an empty page.
    pub fn queue_page(&self, response: Response) {
        self.inner.lock().unwrap().page_queue.push_back(response);
    }

    /// Queue the response for the next search for `query`.
    ///
    /// An exhausted queue answers with no matches.
    pub fn queue_search(&self, query: &str, response: Response) {
        self.inner
            .lock()
            .unwrap()
            .search_responses
            .entry(query.to_string())
            .or_default()
            .push_back(response);
    }

    /// Make page fetches for `cursor` wait until the returned handle is
    /// notified.
    pub fn hold_page(&self, cursor: u32) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        self.inner
            .lock()
            .unwrap()
            .held_pages
            .insert(cursor, Arc::clone(&gate));
        gate
    }

    /// Make searches for `query` wait until the returned handle is notified.
    pub fn hold_search(&self, query: &str) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        self.inner
            .lock()
            .unwrap()
            .held_searches
            .insert(query.to_string(), Arc::clone(&gate));
        gate
    }

    /// Cursors passed to `fetch_page()`, in call order.
    pub fn page_calls(&self) -> Vec<u32> {
        self.inner.lock().unwrap().page_calls.clone()
    }

    /// Queries passed to `fetch_search()`, in call order.
    pub fn search_calls(&self) -> Vec<String> {
        self.inner.lock().unwrap().search_calls.clone()
    }
}

#[async_trait]
impl ArticleSource for MockSource {
    fn name(&self) -> &str {
        "mock"
    }

    async fn fetch_page(&self, cursor: u32) -> Result<Vec<ArticleRecord>, FetchError> {
        let (gate, response) = {
            let mut inner = self.inner.lock().unwrap();
            inner.page_calls.push(cursor);
            let response = inner.page_queue.pop_front().unwrap_or_else(|| Ok(Vec::new()));
            (inner.held_pages.get(&cursor).cloned(), response)
        };

        if let Some(gate) = gate {
            gate.notified().await;
        }
        response
    }

    async fn fetch_search(&self, query: &str) -> Result<Vec<ArticleRecord>, FetchError> {
        // Record the call and take the response before waiting on the gate;
        // the lock must not be held across the await.
        let (gate, response) = {
            let mut inner = self.inner.lock().unwrap();
            inner.search_calls.push(query.to_string());
            let response = inner
                .search_responses
                .get_mut(query)
                .and_then(VecDeque::pop_front)
                .unwrap_or_else(|| Ok(Vec::new()));
            (inner.held_searches.get(query).cloned(), response)
        };

        if let Some(gate) = gate {
            gate.notified().await;
        }
        response
    }
}
