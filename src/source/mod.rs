//! Article source abstraction layer.
//!
//! This module defines the [`ArticleSource`] trait, the [`FetchError`]
//! descriptor, and the common [`ArticleRecord`] type.  Concrete source
//! implementations live in sub-modules (currently only [`nyt`]).
//!
//! ## For contributors — adding a new source
//!
//! 1. Create a new file in this directory (e.g. `guardian.rs`).
//! 2. Define a struct holding its configuration and implement
//!    [`ArticleSource`] for it.
//! 3. Add `mod guardian;` below and re-export your struct.
//! 4. Construct it in `main.rs` instead of [`NytSource`].
//!
//! The sync engine, de-duplication, and UI are all source-agnostic.

mod article;
#[cfg(test)]
pub(crate) mod mock;
mod nyt;

pub use article::ArticleRecord;
#[cfg(test)]
pub(crate) use article::tests::{make_article, make_batch};
pub use nyt::{NytSource, DEFAULT_BASE_URL};

use async_trait::async_trait;
use thiserror::Error;

/// Why a page or search fetch failed.
///
/// Stored in the sync state as the stream's last error, so it is `Clone` and
/// carries rendered messages rather than the underlying client errors.  An
/// empty result is never an error: sources return `Ok(vec![])` for it.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FetchError {
    /// Transport or connectivity failure.
    #[error("network error: {0}")]
    Network(String),

    /// The remote answered with a non-success HTTP status.
    #[error("server responded with status {0}")]
    Status(u16),

    /// The response body could not be decoded.
    #[error("malformed response: {0}")]
    Decode(String),

    /// The request was rejected locally before any network call.
    #[error("invalid query: {0}")]
    Validation(String),
}

/// Trait that every article source must implement.
///
/// Both operations are called from spawned Tokio tasks, so implementations
/// must be `Send + Sync`.  They must preserve the order the remote returns
/// and be safe to retry.
#[async_trait]
pub trait ArticleSource: Send + Sync {
    /// Human-readable label for logs and the status bar.
    fn name(&self) -> &str;

    /// Fetch one page of the feed.  Page numbering starts at 0.
    async fn fetch_page(&self, cursor: u32) -> Result<Vec<ArticleRecord>, FetchError>;

    /// Run a search query and return the first page of matches.
    async fn fetch_search(&self, query: &str) -> Result<Vec<ArticleRecord>, FetchError>;
}
