//! The core data type shared by every article source.
//!
//! `ArticleRecord` represents a single item returned by the remote content
//! API.  Every source implementation converts its native payload into
//! `ArticleRecord`s so the sync engine can stay source-agnostic.
//!
//! Records are immutable once received.  The engine never edits a record in
//! place; a later copy with the same [`id`](ArticleRecord::id) is simply
//! dropped during de-duplication.

use chrono::{DateTime, Utc};

/// A single article, normalised from any source.
///
/// Unlike an RSS reader, the feed order is owned by the remote source, so
/// `ArticleRecord` deliberately has no [`Ord`] impl: lists keep the order the
/// source returned them in.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct ArticleRecord {
    /// Stable identifier used for de-duplication across pages.
    pub id: String,

    /// Human-readable headline.
    pub title: String,

    /// Short abstract shown under the headline.
    pub summary: String,

    /// Publication the article came from (e.g. "The New York Times").
    pub source_label: String,

    /// Canonical URL of the full article.
    pub link: String,

    /// Publication timestamp, when the source provides a parsable one.
    pub published: Option<DateTime<Utc>>,
}

impl ArticleRecord {
    /// Short `YYYY-MM-DD` date for list rendering.
    pub fn date_label(&self) -> String {
        self.published
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| "no date".into())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
