//! HTTP client for an OpenAI-compatible chat-completions endpoint.

use std::time::Duration;

use async_trait::async_trait;
use postdigest_core::{SummarizationError, Summarizer};
use reqwest::Client;

use crate::schema::strict_schema;
use crate::types::{
    ChatMessage, ChatRequest, ChatResponse, JsonSchemaFormat, ResponseFormat, SummaryBox,
};

const INSTRUCTIONS: &str = "Please provide a mostly concise summary of the following social media activity. Focus on:\n\
1. Key themes and topics discussed\n\
2. Notable patterns in posting behavior\n\
3. Important mentions or interactions\n\
4. Overall sentiment and tone\n\
5. Any significant events or announcements\n\n\
If there are any highly significant events or developments, spend a paragraph on them, but not more.\n\n\
Provide the response as JSON with this format: {\"summary\": \"your detailed summary here\", \"error\": null}\n\n\
Activity Data:\n";

/// [`Summarizer`] backed by the chat-completions API.
///
/// The base URL comes from configuration, which lets tests point the client
/// at a mock server.
pub struct OpenAiSummarizer {
    client: Client,
    api_key: String,
    model: String,
    endpoint: String,
    schema: serde_json::Value,
}

impl OpenAiSummarizer {
    /// Creates a client with a custom base URL such as `http://host/v1`.
    ///
    /// # Errors
    ///
    /// Returns [`SummarizationError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed and [`SummarizationError::Malformed`] if the
    /// response schema cannot be encoded.
    pub fn with_base_url(
        api_key: &str,
        model: &str,
        timeout_secs: u64,
        base_url: &str,
    ) -> Result<Self, SummarizationError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("postdigest/0.1")
            .build()
            .map_err(|e| SummarizationError::Http(e.to_string()))?;

        let schema = strict_schema::<SummaryBox>()
            .map_err(|e| SummarizationError::Malformed(format!("response schema: {e}")))?;

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            model: model.to_owned(),
            endpoint: format!("{}/chat/completions", base_url.trim_end_matches('/')),
            schema,
        })
    }

    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }

    async fn complete(&self, prompt: &str) -> Result<String, SummarizationError> {
        let request = ChatRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            response_format: ResponseFormat {
                kind: "json_schema",
                json_schema: JsonSchemaFormat {
                    name: "Summary",
                    schema: self.schema.clone(),
                    strict: true,
                },
            },
        };

        tracing::debug!(
            model = %self.model,
            prompt_chars = prompt.len(),
            "sending summarization request"
        );

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| SummarizationError::Http(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SummarizationError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let chat: ChatResponse = response
            .json()
            .await
            .map_err(|e| SummarizationError::Malformed(format!("chat response: {e}")))?;

        let message = chat
            .choices
            .into_iter()
            .next()
            .map(|c| c.message)
            .ok_or(SummarizationError::EmptyResponse)?;

        if let Some(refusal) = message.refusal.filter(|r| !r.trim().is_empty()) {
            return Err(SummarizationError::Refused(refusal));
        }

        message.content.ok_or(SummarizationError::EmptyResponse)
    }
}

/// Extract the summary text from a structured reply.
pub(crate) fn parse_summary_box(content: &str) -> Result<String, SummarizationError> {
    let summary_box: SummaryBox = serde_json::from_str(content).map_err(|e| {
        tracing::debug!(content = %content, "unparseable summary payload");
        SummarizationError::Malformed(e.to_string())
    })?;

    if let Some(reason) = summary_box.error.filter(|e| !e.trim().is_empty()) {
        return Err(SummarizationError::Refused(reason));
    }

    if summary_box.summary.trim().is_empty() {
        return Err(SummarizationError::Refused("empty summary".to_string()));
    }

    Ok(summary_box.summary)
}

#[async_trait]
impl Summarizer for OpenAiSummarizer {
    async fn summarize(&self, text: &str) -> Result<String, SummarizationError> {
        let prompt = format!("{INSTRUCTIONS}{text}");
        let content = self.complete(&prompt).await?;
        parse_summary_box(&content)
    }
}
