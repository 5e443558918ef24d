//! Shared domain types, configuration, and collaborator seams for postdigest.

pub mod accounts;
pub mod app_config;
pub mod config;
pub mod sources;
pub mod types;

use thiserror::Error;

pub use accounts::{load_allow_list, AllowList};
pub use app_config::AppConfig;
pub use config::{load_app_config, load_app_config_from_env};
pub use sources::{PostStore, StoreError, SummarizationError, Summarizer};
pub use types::{AccountSummary, DailyReport, Post, WeeklyReport};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required env var: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read allow-list {path}: {source}")]
    AllowListIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("config validation failed: {0}")]
    Validation(String),
}
