use chrono::NaiveDate;
use postdigest_core::StoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("day count must be at least 1")]
    InvalidDayCount,

    #[error("date out of supported range: {0}")]
    DateOutOfRange(NaiveDate),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("failed to write {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("report serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),
}
