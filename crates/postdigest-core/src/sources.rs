//! Seams to the external collaborators: the post store and the summarizer.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::types::Post;

/// Failure fetching posts for a time range.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The store could not be reached (pool timeout, connection refused).
    #[error("post store unavailable: {0}")]
    Unavailable(String),

    /// The query itself failed or returned undecodable rows.
    #[error("post store query failed: {0}")]
    Query(String),
}

/// Failure of a single summarization call.
#[derive(Debug, Error)]
pub enum SummarizationError {
    #[error("transport error: {0}")]
    Http(String),

    #[error("API error ({status}): {body}")]
    Api { status: u16, body: String },

    #[error("response contained no content")]
    EmptyResponse,

    #[error("malformed summary response: {0}")]
    Malformed(String),

    #[error("summarizer declined: {0}")]
    Refused(String),
}

/// Read access to stored posts.
#[async_trait]
pub trait PostStore: Send + Sync {
    /// Posts with `start <= created_at < end`, newest first.
    async fn fetch(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<Post>, StoreError>;
}

/// Text-in, text-out summarization service.
///
/// Implementations hold their own capability token; having no token is
/// modelled by having no `Summarizer` at all.
#[async_trait]
pub trait Summarizer: Send + Sync {
    async fn summarize(&self, text: &str) -> Result<String, SummarizationError>;
}
