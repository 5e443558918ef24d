//! In-memory collaborators for pipeline tests.

use std::collections::HashSet;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use postdigest_core::{Post, PostStore, StoreError, SummarizationError, Summarizer};

pub(crate) fn date(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 3, day).unwrap()
}

/// A post created on 2025-03-`day` at `hour`:00 UTC.
pub(crate) fn post(id: &str, author: &str, day: u32, hour: u32) -> Post {
    Post {
        id: id.to_string(),
        text: format!("post {id} by {author}"),
        created_at: Utc.with_ymd_and_hms(2025, 3, day, hour, 0, 0).unwrap(),
        author: author.to_string(),
    }
}

/// Serves a fixed set of posts, newest first, and fails on chosen days.
#[derive(Default)]
pub(crate) struct FakeStore {
    posts: Vec<Post>,
    failing: HashSet<NaiveDate>,
    calls: Mutex<Vec<(DateTime<Utc>, DateTime<Utc>)>>,
}

impl FakeStore {
    pub(crate) fn new(posts: Vec<Post>) -> Self {
        Self {
            posts,
            ..Self::default()
        }
    }

    pub(crate) fn failing_on(mut self, day: NaiveDate) -> Self {
        self.failing.insert(day);
        self
    }

    pub(crate) fn calls(&self) -> Vec<(DateTime<Utc>, DateTime<Utc>)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl PostStore for FakeStore {
    async fn fetch(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<Post>, StoreError> {
        self.calls.lock().unwrap().push((start, end));

        if self.failing.contains(&start.date_naive()) {
            return Err(StoreError::Unavailable("connection reset".to_string()));
        }

        let mut posts: Vec<Post> = self
            .posts
            .iter()
            .filter(|p| p.created_at >= start && p.created_at < end)
            .cloned()
            .collect();
        posts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(posts)
    }
}

/// Always answers with the same text and records every prompt.
pub(crate) struct RecordingSummarizer {
    reply: String,
    prompts: Mutex<Vec<String>>,
}

impl RecordingSummarizer {
    pub(crate) fn new(reply: &str) -> Self {
        Self {
            reply: reply.to_string(),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl Summarizer for RecordingSummarizer {
    async fn summarize(&self, text: &str) -> Result<String, SummarizationError> {
        self.prompts.lock().unwrap().push(text.to_string());
        Ok(self.reply.clone())
    }
}

/// Fails every call with a 503.
#[derive(Default)]
pub(crate) struct FailingSummarizer {
    calls: Mutex<usize>,
}

impl FailingSummarizer {
    pub(crate) fn calls(&self) -> usize {
        *self.calls.lock().unwrap()
    }
}

#[async_trait]
impl Summarizer for FailingSummarizer {
    async fn summarize(&self, _text: &str) -> Result<String, SummarizationError> {
        *self.calls.lock().unwrap() += 1;
        Err(SummarizationError::Api {
            status: 503,
            body: "overloaded".to_string(),
        })
    }
}
