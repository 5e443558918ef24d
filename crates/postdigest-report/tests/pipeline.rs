//! End-to-end pipeline runs against in-memory collaborators.

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use postdigest_core::{AllowList, Post, PostStore, StoreError, SummarizationError, Summarizer};
use postdigest_report::{load_report, report_file_name, save_report, Aggregator};

struct MemoryStore {
    posts: Vec<Post>,
    broken_day: Option<NaiveDate>,
}

#[async_trait]
impl PostStore for MemoryStore {
    async fn fetch(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<Post>, StoreError> {
        if self.broken_day == Some(start.date_naive()) {
            return Err(StoreError::Query("relation does not exist".to_string()));
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

struct DownSummarizer {
    calls: AtomicUsize,
}

#[async_trait]
impl Summarizer for DownSummarizer {
    async fn summarize(&self, _text: &str) -> Result<String, SummarizationError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(SummarizationError::Http("connection refused".to_string()))
    }
}

fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, d).unwrap()
}

fn post(id: &str, author: &str, d: u32, hour: u32, text: &str) -> Post {
    Post {
        id: id.to_string(),
        text: text.to_string(),
        created_at: Utc.with_ymd_and_hms(2025, 6, d, hour, 15, 0).unwrap(),
        author: author.to_string(),
    }
}

fn sample_posts() -> Vec<Post> {
    vec![
        post("1", "alice", 2, 9, "Release notes are up"),
        post("2", "alice", 2, 14, "Thanks for the feedback"),
        post("3", "bob", 2, 10, "Hot take incoming"),
        post("4", "bob", 2, 11, "Another hot take"),
        post("5", "bob", 2, 12, "Final hot take"),
        post("6", "alice", 4, 8, "Conference talk today"),
        post("7", "carol", 5, 18, "Hello world"),
    ]
}

#[tokio::test]
async fn week_with_broken_day_and_failing_summarizer_still_completes() {
    let store = MemoryStore {
        posts: sample_posts(),
        broken_day: Some(day(3)),
    };
    let summarizer = DownSummarizer {
        calls: AtomicUsize::new(0),
    };
    let allow_list = AllowList::parse("# tracked\nalice\ncarol\n");
    let agg = Aggregator::new(&store, Some(&summarizer), &allow_list);

    let run = agg.aggregate_week(day(1), 7).await.unwrap();
    let report = &run.report;

    assert_eq!(report.start_date, day(1));
    assert_eq!(report.end_date, day(7));
    assert_eq!(report.days.len(), 6);
    assert_eq!(run.skipped.len(), 1);
    assert_eq!(run.skipped[0].date, day(3));

    let june_2 = report.days.iter().find(|d| d.date == day(2)).unwrap();
    assert_eq!(june_2.total_posts, 2);
    assert_eq!(june_2.accounts.len(), 1);
    assert_eq!(june_2.accounts[0].author, "alice");
    assert!(june_2.accounts[0]
        .summary
        .contains("Summarization failed: transport error: connection refused"));

    assert_eq!(report.total_posts, 4);
    assert_eq!(
        report.total_posts,
        report.days.iter().map(|d| d.total_posts).sum::<usize>()
    );
    for d in &report.days {
        assert_eq!(d.total_posts, d.accounts.iter().map(|a| a.post_count).sum::<usize>());
    }

    assert!(report.overall_summary.starts_with("Summarization failed:"));
    assert!(report.overall_summary.contains("Most active account: @alice with 3 posts"));

    // Active days: June 2, 4, 5 each contribute one account + one day call.
    assert_eq!(summarizer.calls.load(Ordering::SeqCst), 3 * 2 + 1);
}

#[tokio::test]
async fn finished_report_round_trips_through_disk() {
    let store = MemoryStore {
        posts: sample_posts(),
        broken_day: None,
    };
    let allow_list = AllowList::parse("alice\nbob\ncarol");
    let agg = Aggregator::new(&store, None, &allow_list);

    let report = agg.aggregate_week(day(1), 7).await.unwrap().report;

    let dir = tempfile::tempdir().unwrap();
    let path = dir
        .path()
        .join(report_file_name("team", report.start_date, report.end_date));
    save_report(&report, &path).unwrap();

    assert!(path.ends_with("report_team_2025-06-01_to_2025-06-07.json"));
    assert_eq!(load_report(&path).unwrap(), report);
}
