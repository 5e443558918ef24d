//! Deterministic, call-free weekly summary built from aggregated counts.

use std::collections::{HashMap, HashSet};
use std::fmt::Write as _;

use chrono::NaiveDate;
use postdigest_core::DailyReport;

pub(crate) const NO_ACTIVITY: &str = "No post activity detected in the analyzed period";

/// Cross-day totals for one account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountActivity {
    pub author: String,
    pub total_posts: usize,
    /// Distinct days on which the account produced at least one post.
    pub active_days: usize,
}

impl AccountActivity {
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn avg_posts_per_day(&self) -> f64 {
        if self.active_days == 0 {
            return 0.0;
        }
        self.total_posts as f64 / self.active_days as f64
    }
}

/// Per-account totals across `days`, in first-encountered order.
#[must_use]
pub fn account_activity(days: &[DailyReport]) -> Vec<AccountActivity> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut totals: Vec<(String, usize, HashSet<NaiveDate>)> = Vec::new();

    for day in days {
        for account in &day.accounts {
            let i = *index.entry(account.author.as_str()).or_insert_with(|| {
                totals.push((account.author.clone(), 0, HashSet::new()));
                totals.len() - 1
            });
            let entry = &mut totals[i];
            entry.1 += account.post_count;
            if account.post_count > 0 {
                entry.2.insert(day.date);
            }
        }
    }

    totals
        .into_iter()
        .map(|(author, total_posts, dates)| AccountActivity {
            author,
            total_posts,
            active_days: dates.len(),
        })
        .collect()
}

/// Accounts ranked by total posts, descending. Ties keep first-encountered
/// order.
#[must_use]
pub fn ranked_activity(days: &[DailyReport]) -> Vec<AccountActivity> {
    let mut ranked = account_activity(days);
    ranked.sort_by(|a, b| b.total_posts.cmp(&a.total_posts));
    ranked
}

/// The busiest day by `total_posts`; the earliest wins ties. `None` when no
/// day has any posts.
#[must_use]
pub fn most_active_day(days: &[DailyReport]) -> Option<&DailyReport> {
    let mut best: Option<&DailyReport> = None;
    for day in days {
        if day.total_posts > best.map_or(0, |b| b.total_posts) {
            best = Some(day);
        }
    }
    best
}

/// Render the statistical summary for `days`.
///
/// Pure and infallible. Callers handle the empty case before getting here;
/// an empty slice still renders, with an empty period.
#[must_use]
pub fn statistical_summary(days: &[DailyReport]) -> String {
    let mut out = String::new();
    out.push_str("MULTI-DAY ACTIVITY SUMMARY\n");
    out.push_str("==========================\n\n");

    let total_posts: usize = days.iter().map(|d| d.total_posts).sum();
    let ranked = ranked_activity(days);

    if let (Some(first), Some(last)) = (days.first(), days.last()) {
        let _ = writeln!(
            out,
            "Period: {} to {} ({} days)",
            first.date,
            last.date,
            days.len()
        );
    }
    let _ = writeln!(out, "Total posts analyzed: {total_posts}");
    let _ = writeln!(out, "Unique accounts: {}\n", ranked.len());

    out.push_str("Account Activity Breakdown:\n");
    for (rank, activity) in ranked.iter().enumerate() {
        let _ = writeln!(
            out,
            "  {}. @{}: {} posts across {} days (avg {:.1} posts/day)",
            rank + 1,
            activity.author,
            activity.total_posts,
            activity.active_days,
            activity.avg_posts_per_day()
        );
    }

    out.push_str("\nDaily Activity Pattern:\n");
    for day in days {
        let _ = writeln!(out, "  {}: {} total posts", day.date, day.total_posts);
        for account in &day.accounts {
            let _ = writeln!(out, "    - @{}: {} posts", account.author, account.post_count);
        }
    }

    out.push_str("\nKey Observations:\n");
    if total_posts == 0 {
        let _ = writeln!(out, "  - {NO_ACTIVITY}");
        return out;
    }

    #[allow(clippy::cast_precision_loss)]
    let avg_per_day = total_posts as f64 / days.len() as f64;
    let _ = writeln!(out, "  - Average posts per day: {avg_per_day:.1}");

    if let Some(top) = ranked.first() {
        let _ = writeln!(
            out,
            "  - Most active account: @{} with {} posts",
            top.author, top.total_posts
        );
    }

    if let Some(day) = most_active_day(days) {
        let _ = writeln!(
            out,
            "  - Most active day: {} with {} posts",
            day.date, day.total_posts
        );
    }

    out
}
