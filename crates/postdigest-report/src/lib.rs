//! Report aggregation pipeline for postdigest.
//!
//! Turns a flat, time-ordered sequence of posts into a Daily → Account →
//! Weekly report, asks the summarizer for narrative text with a
//! deterministic fallback when it is unavailable or fails, and writes the
//! finished report to disk.

pub mod daily;
pub mod digest;
pub mod error;
pub mod fallback;
pub mod filter;
pub mod output;
pub mod stats;
pub mod weekly;

use postdigest_core::{AllowList, PostStore, Summarizer};

pub use error::ReportError;
pub use fallback::{attempt_summary, SummaryOutcome};
pub use filter::filter_posts;
pub use output::{
    load_report, narrative_file_name, report_file_name, save_narrative, save_report,
};
pub use stats::{account_activity, statistical_summary, AccountActivity};
pub use weekly::{SkippedDay, WeekRun};

/// Everything a pipeline run needs, passed explicitly instead of read from
/// process-wide state.
///
/// `summarizer: None` is the no-capability state: no external calls are made
/// and every summary uses its templated fallback.
#[derive(Clone, Copy)]
pub struct Aggregator<'a> {
    store: &'a dyn PostStore,
    summarizer: Option<&'a dyn Summarizer>,
    allow_list: &'a AllowList,
}

impl<'a> Aggregator<'a> {
    #[must_use]
    pub fn new(
        store: &'a dyn PostStore,
        summarizer: Option<&'a dyn Summarizer>,
        allow_list: &'a AllowList,
    ) -> Self {
        Self {
            store,
            summarizer,
            allow_list,
        }
    }
}

#[cfg(test)]
pub(crate) mod testing;
