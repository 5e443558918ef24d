//! The summarization fallback policy shared by the daily and weekly levels.
//!
//! At most one external call is made per summary. Failures are never retried
//! and never propagate: the caller always gets text back.

use postdigest_core::{SummarizationError, Summarizer};

/// Result of one summarization attempt.
#[derive(Debug)]
pub enum SummaryOutcome {
    /// The summarizer answered; its text is used verbatim.
    Summarized(String),
    /// No capability token is configured, so no call was made.
    Unconfigured,
    /// The single call failed.
    Failed(SummarizationError),
}

/// Make at most one summarization call for `prompt`.
pub async fn attempt_summary(
    summarizer: Option<&dyn Summarizer>,
    prompt: &str,
) -> SummaryOutcome {
    let Some(summarizer) = summarizer else {
        return SummaryOutcome::Unconfigured;
    };

    match summarizer.summarize(prompt).await {
        Ok(text) => SummaryOutcome::Summarized(text),
        Err(e) => SummaryOutcome::Failed(e),
    }
}

impl SummaryOutcome {
    /// Render the outcome, appending the reason to the templated `base`
    /// sentence when no summary is available.
    #[must_use]
    pub fn or_template(self, base: &str) -> String {
        match self {
            SummaryOutcome::Summarized(text) => text,
            SummaryOutcome::Unconfigured => {
                format!("{base} Summarizer not configured for detailed analysis.")
            }
            SummaryOutcome::Failed(e) => format!("{base} Summarization failed: {e}"),
        }
    }
}
