/// Generation client — the single point of entry for all calls to the hosted
/// text generation endpoint.
///
/// No other module may talk to the endpoint directly. Callers receive the raw
/// JSON body and run [`extract_generated_text`] on it themselves.
///
/// Decoding parameters and model are fixed (see [`DEFAULT_PARAMETERS`]).
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

/// The model used for every generation call.
pub const MODEL_ID: &str = "ibm/granite-13b-chat-v2";

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Error: {status} , {body}")]
    Upstream { status: u16, body: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Fixed sampling configuration sent with every prompt.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GenerationParameters {
    pub decoding_method: &'static str,
    pub max_new_tokens: u32,
    pub temperature: f64,
    pub top_k: u32,
    pub top_p: f64,
    pub repetition_penalty: f64,
}

pub const DEFAULT_PARAMETERS: GenerationParameters = GenerationParameters {
    decoding_method: "sample",
    max_new_tokens: 500,
    temperature: 0.3,
    top_k: 40,
    top_p: 0.9,
    repetition_penalty: 1.1,
};

#[derive(Debug, Serialize)]
struct GenerationRequest<'a> {
    input: &'a str,
    parameters: GenerationParameters,
    model_id: &'a str,
    project_id: &'a str,
}

/// Outcome of reading `results[0].generated_text` out of a 2xx body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Extraction {
    Text(String),
    /// `results` is absent, not an array, or empty.
    MissingResults,
    /// The first result has no `generated_text`, or it is empty.
    EmptyText,
}

/// Reads the first generated text out of a raw response body.
pub fn extract_generated_text(body: &Value) -> Extraction {
    let first = match body.get("results").and_then(Value::as_array) {
        Some(results) => match results.first() {
            Some(first) => first,
            None => return Extraction::MissingResults,
        },
        None => return Extraction::MissingResults,
    };

    match first.get("generated_text").and_then(Value::as_str) {
        Some(text) if !text.is_empty() => Extraction::Text(text.to_string()),
        _ => Extraction::EmptyText,
    }
}

/// Anything that can turn a prompt into a raw generation response body.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<Value, LlmError>;
}

/// HTTP client for the hosted generation endpoint.
/// One POST per call: no retries, no caching.
#[derive(Clone)]
pub struct WatsonxClient {
    client: Client,
    url: String,
    project_id: String,
    access_token: String,
}

impl WatsonxClient {
    pub fn new(url: String, project_id: String, access_token: String, timeout: Duration) -> Self {
        Self {
            client: Client::builder()
                .timeout(timeout)
                .build()
                .expect("Failed to build HTTP client"),
            url,
            project_id,
            access_token,
        }
    }
}

#[async_trait]
impl TextGenerator for WatsonxClient {
    async fn generate(&self, prompt: &str) -> Result<Value, LlmError> {
        let request_body = GenerationRequest {
            input: prompt,
            parameters: DEFAULT_PARAMETERS,
            model_id: MODEL_ID,
            project_id: &self.project_id,
        };

        let response = self
            .client
            .post(&self.url)
            .header(AUTHORIZATION, format!("Bearer {}", self.access_token))
            .header(ACCEPT, "application/json")
            .header(CONTENT_TYPE, "application/json")
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("Generation endpoint returned {}: {}", status, body);
            return Err(LlmError::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        let raw = response.text().await?;
        let body: Value = serde_json::from_str(&raw)?;

        debug!(
            "Generation call succeeded: prompt_chars={}, response_bytes={}",
            prompt.chars().count(),
            raw.len()
        );

        Ok(body)
    }
}
