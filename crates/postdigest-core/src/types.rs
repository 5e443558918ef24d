//! Report data model. Every value is built bottom-up once and never mutated.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// A single timestamped message attributed to one account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: String,
    pub text: String,
    pub created_at: DateTime<Utc>,
    pub author: String,
}

/// One account's activity on one day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountSummary {
    pub author: String,
    pub post_count: usize,
    pub summary: String,
    pub posts: Vec<Post>,
}

impl AccountSummary {
    #[must_use]
    pub fn new(author: String, summary: String, posts: Vec<Post>) -> Self {
        Self {
            author,
            post_count: posts.len(),
            summary,
            posts,
        }
    }
}

/// All allow-listed activity for one calendar day.
///
/// `accounts` is unique by author, in the order authors first appeared.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyReport {
    pub date: NaiveDate,
    pub total_posts: usize,
    pub summary: String,
    pub accounts: Vec<AccountSummary>,
}

impl DailyReport {
    /// `total_posts` is derived from `accounts`.
    #[must_use]
    pub fn new(date: NaiveDate, summary: String, accounts: Vec<AccountSummary>) -> Self {
        Self {
            date,
            total_posts: accounts.iter().map(|a| a.post_count).sum(),
            summary,
            accounts,
        }
    }
}

/// A multi-day report over the requested window `[start_date, end_date]`.
///
/// `days` is chronological and may have gaps where a day failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklyReport {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub days: Vec<DailyReport>,
    pub overall_summary: String,
    pub total_posts: usize,
}

impl WeeklyReport {
    /// `total_posts` is derived from `days`.
    #[must_use]
    pub fn new(
        start_date: NaiveDate,
        end_date: NaiveDate,
        days: Vec<DailyReport>,
        overall_summary: String,
    ) -> Self {
        Self {
            start_date,
            end_date,
            total_posts: days.iter().map(|d| d.total_posts).sum(),
            days,
            overall_summary,
        }
    }
}
