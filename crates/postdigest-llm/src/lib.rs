//! OpenAI-compatible summarization client for postdigest.
//!
//! Sends one chat-completions request per summary, constrains the reply with
//! a strict JSON schema, and extracts the `summary` field.

mod client;
mod schema;
mod types;

pub use client::OpenAiSummarizer;
pub use types::SummaryBox;
