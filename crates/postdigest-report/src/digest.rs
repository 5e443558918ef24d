//! The structured cross-day digest sent to the summarizer for the weekly
//! overview.

use std::fmt::Write as _;

use postdigest_core::DailyReport;

use crate::stats::account_activity;

const MAX_SAMPLES_PER_ACCOUNT: usize = 3;
const MAX_EXCERPT_CHARS: usize = 100;

/// Truncate to [`MAX_EXCERPT_CHARS`] characters, marking the cut with `...`.
#[must_use]
pub fn excerpt(text: &str) -> String {
    match text.char_indices().nth(MAX_EXCERPT_CHARS) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}

/// Render the digest over `days`: per-day totals, per-account counts with up
/// to three excerpts each, then window totals and per-account active days.
#[must_use]
pub fn build_weekly_digest(days: &[DailyReport]) -> String {
    let mut out = String::new();
    out.push_str("MULTI-DAY POST ACTIVITY ANALYSIS\n");
    out.push_str("================================\n\n");

    for day in days {
        let _ = writeln!(out, "Day {} ({} total posts):", day.date, day.total_posts);
        for account in &day.accounts {
            let _ = writeln!(out, "  @{}: {} posts", account.author, account.post_count);
            if !account.posts.is_empty() {
                out.push_str("    Sample posts:\n");
                for post in account.posts.iter().take(MAX_SAMPLES_PER_ACCOUNT) {
                    let _ = writeln!(out, "    - {}", excerpt(&post.text));
                }
            }
        }
        out.push('\n');
    }

    let total_posts: usize = days.iter().map(|d| d.total_posts).sum();
    let activity = account_activity(days);

    if let (Some(first), Some(last)) = (days.first(), days.last()) {
        let _ = writeln!(
            out,
            "Period: {} to {} ({} days)",
            first.date,
            last.date,
            days.len()
        );
    }
    let _ = writeln!(out, "Total posts: {total_posts}");
    let _ = writeln!(out, "Unique accounts: {}\n", activity.len());

    out.push_str("Account totals:\n");
    for a in &activity {
        let _ = writeln!(
            out,
            "  @{}: {} posts across {} active days",
            a.author, a.total_posts, a.active_days
        );
    }

    out
}
