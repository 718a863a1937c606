//! New York Times Article Search source.
//!
//! Fetches pages of the Article Search API over HTTP using [`reqwest`] and
//! decodes the JSON payload with [`serde`].  Pagination and search hit the
//! same endpoint: a page request sends the configured feed topic (if any) as
//! `q`, a search request sends the user's query and always asks for page 0.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::debug;

use super::{ArticleRecord, ArticleSource, FetchError};

/// Default Article Search endpoint (without the `articlesearch.json` path).
pub const DEFAULT_BASE_URL: &str = "https://api.nytimes.com/svc/search/v2";

/// An Article Search API source.
pub struct NytSource {
    client: reqwest::Client,
    /// Endpoint root, e.g. [`DEFAULT_BASE_URL`].
    base_url: String,
    api_key: String,
    /// Optional `q` sent with every page request.
    topic: Option<String>,
    label: String,
}

impl NytSource {
    /// Create a new source.
    ///
    /// # Arguments
    ///
    /// * `base_url` — endpoint root; `articlesearch.json` is appended.
    /// * `api_key` — developer key sent as `api-key`.
    /// * `topic` — optional query that scopes the paginated feed.
    /// * `timeout` — per-request timeout.
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        topic: Option<String>,
        timeout: Duration,
    ) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| FetchError::Network(e.to_string()))?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            topic,
            label: "NYT".into(),
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/articlesearch.json", self.base_url)
    }

    async fn get(&self, query: Option<&str>, page: u32) -> Result<Vec<ArticleRecord>, FetchError> {
        let mut params = vec![
            ("page", page.to_string()),
            ("api-key", self.api_key.clone()),
        ];
        if let Some(q) = query {
            params.push(("q", q.to_string()));
        }

        debug!(page, ?query, "requesting article search page");
        let response = self
            .client
            .get(self.endpoint())
            .query(&params)
            .send()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;
        Self::parse_response(&body)
    }

    /// Parse an Article Search response body into [`ArticleRecord`]s.
    ///
    /// This is a pure function (no I/O) so that tests can exercise the
    /// decoding logic without hitting the network.  A response without any
    /// `docs` is an empty page, not an error.
    pub fn parse_response(body: &[u8]) -> Result<Vec<ArticleRecord>, FetchError> {
        let envelope: SearchEnvelope =
            serde_json::from_slice(body).map_err(|e| FetchError::Decode(e.to_string()))?;

        Ok(envelope
            .response
            .docs
            .into_iter()
            .map(Doc::into_record)
            .collect())
    }
}

#[async_trait]
impl ArticleSource for NytSource {
    fn name(&self) -> &str {
        &self.label
    }

    async fn fetch_page(&self, cursor: u32) -> Result<Vec<ArticleRecord>, FetchError> {
        self.get(self.topic.as_deref(), cursor).await
    }

    async fn fetch_search(&self, query: &str) -> Result<Vec<ArticleRecord>, FetchError> {
        self.get(Some(query), 0).await
    }
}

// ---------------------------------------------------------------------------
// Wire format
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct SearchEnvelope {
    response: SearchResponse,
}

#[derive(Debug, Default, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    docs: Vec<Doc>,
}

#[derive(Debug, Deserialize)]
struct Doc {
    #[serde(rename = "_id")]
    id: Option<String>,
    web_url: Option<String>,
    #[serde(rename = "abstract")]
    summary: Option<String>,
    headline: Option<Headline>,
    source: Option<String>,
    pub_date: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Headline {
    main: Option<String>,
}

impl Doc {
    fn into_record(self) -> ArticleRecord {
        // Missing and `null` fields are treated alike.
        let link = self.web_url.unwrap_or_default();
        // Prefer `_id`, fall back to the URL.
        let id = self
            .id
            .filter(|id| !id.is_empty())
            .unwrap_or_else(|| link.clone());

        ArticleRecord {
            id,
            title: self
                .headline
                .and_then(|h| h.main)
                .filter(|t| !t.trim().is_empty())
                .unwrap_or_else(|| "(untitled)".into()),
            summary: self.summary.unwrap_or_default(),
            source_label: self.source.unwrap_or_else(|| "Unknown".into()),
            link,
            published: self.pub_date.as_deref().and_then(parse_pub_date),
        }
    }
}

/// The API uses `+0000` offsets, which strict RFC 3339 rejects.
fn parse_pub_date(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%z")
        .or_else(|_| DateTime::parse_from_rfc3339(raw))
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
