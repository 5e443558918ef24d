//! Daily aggregation: one store query, one summary per account, one for the day.

use std::collections::HashMap;
use std::fmt::Write as _;

use chrono::{DateTime, NaiveDate, NaiveTime, TimeDelta, Utc};
use postdigest_core::{AccountSummary, DailyReport, Post};

use crate::error::ReportError;
use crate::fallback::{attempt_summary, SummaryOutcome};
use crate::filter::filter_posts;
use crate::Aggregator;

pub(crate) const NO_POSTS_TODAY: &str = "No posts found for this day.";

/// The UTC half-open window `[date 00:00, date+1 00:00)`.
///
/// # Errors
///
/// Returns [`ReportError::DateOutOfRange`] if the following midnight is not
/// representable.
pub fn day_bounds(date: NaiveDate) -> Result<(DateTime<Utc>, DateTime<Utc>), ReportError> {
    let start = date.and_time(NaiveTime::MIN).and_utc();
    let end = start
        .checked_add_signed(TimeDelta::days(1))
        .ok_or(ReportError::DateOutOfRange(date))?;
    Ok((start, end))
}

/// Group posts by author, keeping the store's order within each group and
/// the order in which authors first appear.
#[must_use]
pub fn group_by_author(posts: Vec<Post>) -> Vec<(String, Vec<Post>)> {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut groups: Vec<(String, Vec<Post>)> = Vec::new();

    for post in posts {
        if let Some(&i) = index.get(&post.author) {
            groups[i].1.push(post);
        } else {
            index.insert(post.author.clone(), groups.len());
            groups.push((post.author.clone(), vec![post]));
        }
    }

    groups
}

pub(crate) fn account_prompt(author: &str, date: NaiveDate, posts: &[Post]) -> String {
    let mut prompt = format!("Activity for @{author} on {date} ({} posts):\n\n", posts.len());
    for post in posts {
        let _ = writeln!(prompt, "- {}", post.text);
    }
    prompt
}

pub(crate) fn day_prompt(date: NaiveDate, groups: &[(String, Vec<Post>)]) -> String {
    let mut prompt = format!("Activity analysis for {date}:\n\n");
    for (author, posts) in groups {
        let _ = writeln!(prompt, "@{author} ({} posts):", posts.len());
        for post in posts {
            let _ = writeln!(prompt, "- {}", post.text);
        }
        prompt.push('\n');
    }
    prompt
}

impl Aggregator<'_> {
    /// Build the report for one calendar day.
    ///
    /// 1. Fetch the day's posts and keep only allow-listed authors.
    /// 2. Group by author in first-seen order.
    /// 3. Summarize each account, then the whole day, applying the fallback
    ///    policy to each call.
    ///
    /// A day with no matching posts makes no summarizer calls.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::Store`] if the fetch fails, or
    /// [`ReportError::DateOutOfRange`] for an unrepresentable day. Summarizer
    /// failures never surface here.
    pub async fn aggregate_day(&self, date: NaiveDate) -> Result<DailyReport, ReportError> {
        let (start, end) = day_bounds(date)?;
        let fetched = self.store.fetch(start, end).await?;
        let fetched_count = fetched.len();
        let posts = filter_posts(fetched, self.allow_list);

        tracing::info!(
            date = %date,
            fetched = fetched_count,
            kept = posts.len(),
            "loaded posts for day"
        );

        if posts.is_empty() {
            return Ok(DailyReport::new(date, NO_POSTS_TODAY.to_string(), Vec::new()));
        }

        let total = posts.len();
        let groups = group_by_author(posts);

        tracing::info!(
            date = %date,
            accounts = groups.len(),
            "found activity from accounts"
        );

        let day_summary = {
            let outcome = attempt_summary(self.summarizer, &day_prompt(date, &groups)).await;
            if let SummaryOutcome::Failed(ref e) = outcome {
                tracing::warn!(date = %date, error = %e, "day summarization failed; using fallback");
            }
            outcome.or_template(&format!(
                "Found {total} posts from {} accounts on {date}.",
                groups.len()
            ))
        };

        let mut accounts = Vec::with_capacity(groups.len());
        for (author, posts) in groups {
            tracing::debug!(date = %date, author = %author, posts = posts.len(), "summarizing account");

            let outcome = attempt_summary(self.summarizer, &account_prompt(&author, date, &posts)).await;
            if let SummaryOutcome::Failed(ref e) = outcome {
                tracing::warn!(
                    date = %date,
                    author = %author,
                    error = %e,
                    "account summarization failed; using fallback"
                );
            }
            let summary =
                outcome.or_template(&format!("@{author} posted {} posts on {date}.", posts.len()));

            accounts.push(AccountSummary::new(author, summary, posts));
        }

        Ok(DailyReport::new(date, day_summary, accounts))
    }
}
