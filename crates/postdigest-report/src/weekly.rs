//! Multi-day aggregation with per-day partial-failure tolerance.

use chrono::{Days, NaiveDate};
use postdigest_core::{DailyReport, WeeklyReport};

use crate::digest::build_weekly_digest;
use crate::error::ReportError;
use crate::fallback::{attempt_summary, SummaryOutcome};
use crate::stats::statistical_summary;
use crate::Aggregator;

pub(crate) const NO_DATA: &str = "No daily reports available for summary.";

/// A day that was dropped from the report, and why.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedDay {
    pub date: NaiveDate,
    pub reason: String,
}

/// The finished report plus the days that could not be aggregated.
#[derive(Debug, Clone)]
pub struct WeekRun {
    pub report: WeeklyReport,
    pub skipped: Vec<SkippedDay>,
}

impl Aggregator<'_> {
    /// Aggregate `day_count` consecutive days starting at `start_date`.
    ///
    /// A day whose aggregation fails is logged, recorded in
    /// [`WeekRun::skipped`], and left out of the report; the remaining days
    /// still run. `end_date` is always the end of the requested window.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::InvalidDayCount`] when `day_count` is zero and
    /// [`ReportError::DateOutOfRange`] when the window cannot be represented.
    /// Per-day failures are never returned.
    pub async fn aggregate_week(
        &self,
        start_date: NaiveDate,
        day_count: u32,
    ) -> Result<WeekRun, ReportError> {
        if day_count == 0 {
            return Err(ReportError::InvalidDayCount);
        }
        let end_date = start_date
            .checked_add_days(Days::new(u64::from(day_count - 1)))
            .ok_or(ReportError::DateOutOfRange(start_date))?;

        tracing::info!(
            start = %start_date,
            end = %end_date,
            day_count,
            "generating multi-day report"
        );

        let mut days = Vec::new();
        let mut skipped = Vec::new();

        for (offset, date) in (0..day_count).zip(start_date.iter_days()) {
            tracing::info!(date = %date, "processing day {}/{}", offset + 1, day_count);

            let outcome: Result<DailyReport, ReportError> = self.aggregate_day(date).await;
            match outcome {
                Ok(report) => days.push(report),
                Err(e) => {
                    tracing::warn!(date = %date, error = %e, "skipping day: aggregation failed");
                    skipped.push(SkippedDay {
                        date,
                        reason: e.to_string(),
                    });
                }
            }
        }

        let overall_summary = self.overall_summary(&days).await;
        let report = WeeklyReport::new(start_date, end_date, days, overall_summary);

        tracing::info!(
            days = report.days.len(),
            skipped = skipped.len(),
            total_posts = report.total_posts,
            "multi-day report complete"
        );

        Ok(WeekRun { report, skipped })
    }

    /// Cross-day narrative: one summarizer call over the digest, or the
    /// statistical summary when there is no capability, the call fails, or
    /// there is nothing to summarize.
    async fn overall_summary(&self, days: &[DailyReport]) -> String {
        if days.is_empty() {
            return NO_DATA.to_string();
        }

        if days.iter().all(|d| d.total_posts == 0) {
            tracing::info!("no posts in window; using statistical summary");
            return statistical_summary(days);
        }

        let digest = build_weekly_digest(days);
        tracing::info!(chars = digest.len(), "requesting overall summary");

        match attempt_summary(self.summarizer, &digest).await {
            SummaryOutcome::Summarized(text) => text,
            SummaryOutcome::Unconfigured => {
                tracing::info!("no summarizer configured; using statistical summary");
                statistical_summary(days)
            }
            SummaryOutcome::Failed(e) => {
                tracing::warn!(error = %e, "overall summarization failed; using statistical summary");
                format!("Summarization failed: {e}\n\n{}", statistical_summary(days))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use postdigest_core::AllowList;

    use super::*;
    use crate::stats::NO_ACTIVITY;
    use crate::testing::{date, post, FailingSummarizer, FakeStore, RecordingSummarizer};

    fn week_of_posts() -> Vec<postdigest_core::Post> {
        (1..=7)
            .flat_map(|d| {
                vec![
                    post(&format!("a{d}"), "alice", d, 9),
                    post(&format!("b{d}"), "bob", d, 10),
                ]
            })
            .collect()
    }

    #[tokio::test]
    async fn zero_day_count_is_rejected() {
        let store = FakeStore::default();
        let list = AllowList::parse("alice");
        let agg = Aggregator::new(&store, None, &list);

        let err = agg.aggregate_week(date(1), 0).await.unwrap_err();
        assert!(matches!(err, ReportError::InvalidDayCount));
        assert!(store.calls().is_empty());
    }

    #[tokio::test]
    async fn one_failed_day_is_skipped_not_fatal() {
        let store = FakeStore::new(week_of_posts()).failing_on(date(3));
        let list = AllowList::parse("alice\nbob");
        let agg = Aggregator::new(&store, None, &list);

        let run = agg.aggregate_week(date(1), 7).await.unwrap();

        assert_eq!(run.report.days.len(), 6);
        assert!(run.report.days.iter().all(|d| d.date != date(3)));
        assert_eq!(run.report.total_posts, 12);
        assert_eq!(run.report.start_date, date(1));
        assert_eq!(run.report.end_date, date(7));
        assert_eq!(run.skipped.len(), 1);
        assert_eq!(run.skipped[0].date, date(3));
        assert!(run.skipped[0].reason.contains("connection reset"));
        assert_eq!(store.calls().len(), 7);
    }

    #[tokio::test]
    async fn days_are_chronological() {
        let store = FakeStore::new(week_of_posts());
        let list = AllowList::parse("alice");
        let agg = Aggregator::new(&store, None, &list);

        let run = agg.aggregate_week(date(2), 4).await.unwrap();
        let dates: Vec<NaiveDate> = run.report.days.iter().map(|d| d.date).collect();
        assert_eq!(dates, vec![date(2), date(3), date(4), date(5)]);
        assert_eq!(run.report.end_date, date(5));
    }

    #[tokio::test]
    async fn weekly_total_is_sum_of_daily_totals() {
        let store = FakeStore::new(week_of_posts());
        let list = AllowList::parse("alice\nbob");
        let agg = Aggregator::new(&store, None, &list);

        let run = agg.aggregate_week(date(1), 7).await.unwrap();
        let sum: usize = run.report.days.iter().map(|d| d.total_posts).sum();
        assert_eq!(run.report.total_posts, sum);
        assert_eq!(sum, 14);
    }

    #[tokio::test]
    async fn end_date_ignores_skipped_days() {
        let mut store = FakeStore::new(vec![]);
        for d in 1..=7 {
            store = store.failing_on(date(d));
        }
        let list = AllowList::parse("alice");
        let agg = Aggregator::new(&store, None, &list);

        let run = agg.aggregate_week(date(1), 7).await.unwrap();

        assert!(run.report.days.is_empty());
        assert_eq!(run.report.end_date, date(7));
        assert_eq!(run.report.total_posts, 0);
        assert_eq!(run.report.overall_summary, NO_DATA);
        assert_eq!(run.skipped.len(), 7);
    }

    #[tokio::test]
    async fn quiet_week_reports_no_activity_without_calls() {
        let store = FakeStore::new(vec![post("x", "mallory", 2, 10)]);
        let list = AllowList::parse("alice");
        let summarizer = RecordingSummarizer::new("unused");
        let agg = Aggregator::new(&store, Some(&summarizer), &list);

        let run = agg.aggregate_week(date(1), 7).await.unwrap();

        assert_eq!(run.report.days.len(), 7);
        assert!(run.report.days.iter().all(|d| d.total_posts == 0));
        assert!(run.report.overall_summary.contains(NO_ACTIVITY));
        assert!(summarizer.prompts().is_empty());
    }

    #[tokio::test]
    async fn overall_summary_uses_summarizer_over_digest() {
        let store = FakeStore::new(week_of_posts());
        let list = AllowList::parse("alice");
        let summarizer = RecordingSummarizer::new("A busy week.");
        let agg = Aggregator::new(&store, Some(&summarizer), &list);

        let run = agg.aggregate_week(date(1), 2).await.unwrap();

        assert_eq!(run.report.overall_summary, "A busy week.");
        let prompts = summarizer.prompts();
        // Per day: one day call and one account call. Then one for the week.
        assert_eq!(prompts.len(), 5);
        let digest = prompts.last().unwrap();
        assert!(digest.starts_with("MULTI-DAY POST ACTIVITY ANALYSIS"));
        assert!(digest.contains("@alice: 2 posts across 2 active days"));
    }

    #[tokio::test]
    async fn no_capability_uses_statistical_summary() {
        let store = FakeStore::new(week_of_posts());
        let list = AllowList::parse("alice\nbob");
        let agg = Aggregator::new(&store, None, &list);

        let run = agg.aggregate_week(date(1), 3).await.unwrap();

        let summary = &run.report.overall_summary;
        assert!(summary.starts_with("MULTI-DAY ACTIVITY SUMMARY"));
        // Tied totals keep first-seen order; bob's posts are newer each day.
        assert!(summary.contains("1. @bob: 3 posts across 3 days"));
        assert!(summary.contains("2. @alice: 3 posts across 3 days"));
    }

    #[tokio::test]
    async fn failed_overall_call_falls_back_with_error() {
        let store = FakeStore::new(week_of_posts());
        let list = AllowList::parse("alice");
        let summarizer = FailingSummarizer::default();
        let agg = Aggregator::new(&store, Some(&summarizer), &list);

        let run = agg.aggregate_week(date(1), 2).await.unwrap();

        let summary = &run.report.overall_summary;
        assert!(summary.starts_with("Summarization failed: API error (503): overloaded"));
        assert!(summary.contains("MULTI-DAY ACTIVITY SUMMARY"));
        assert!(summary.contains("Most active account: @alice with 2 posts"));
        // 2 days x (1 account + 1 day) + 1 weekly call, no retries.
        assert_eq!(summarizer.calls(), 5);
    }
}
