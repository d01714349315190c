//! HTTP client for the text-generation server

use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Text returned when the server answers without a `response` field
pub const NO_RESPONSE: &str = "No response received";

#[derive(Error, Debug)]
pub enum LlmError {
    #[error("HTTP request failed: {0}")]
    Connection(#[from] reqwest::Error),
    #[error("server returned {status}: {body}")]
    Status { status: u16, body: String },
    #[error("JSON parse error: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Connection settings for the model server
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LlmConfig {
    /// Server base URL, without a trailing slash
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Model name sent with every request
    #[serde(default = "default_model")]
    pub model: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    "http://localhost:11434".to_string()
}

fn default_model() -> String {
    "ipc-legal".to_string()
}

fn default_timeout_secs() -> u64 {
    120
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            model: default_model(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
}

#[derive(Deserialize)]
struct GenerateResponse {
    response: Option<String>,
}

/// Client for `POST {base_url}/api/generate`.
///
/// One request per call, no retries.
#[derive(Debug, Clone)]
pub struct LlmClient {
    client: reqwest::Client,
    base_url: String,
    model: String,
}

impl LlmClient {
    /// Build a client with the configured timeout
    pub fn new(config: &LlmConfig) -> Result<Self, LlmError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
        })
    }

    /// Model name sent with requests
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Send a prompt and return the generated text
    pub async fn generate(&self, prompt: &str) -> Result<String, LlmError> {
        let url = format!("{}/api/generate", self.base_url);
        let request = GenerateRequest {
            model: &self.model,
            prompt,
            stream: false,
        };

        info!(url = %url, model = %self.model, "sending prompt to model server");
        let resp = self.client.post(&url).json(&request).send().await?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), "model server returned an error");
            return Err(LlmError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body = resp.text().await?;
        let parsed: GenerateResponse = serde_json::from_str(&body)?;
        let text = parsed.response.unwrap_or_else(|| NO_RESPONSE.to_string());
        debug!(chars = text.len(), "received model response");
        Ok(text)
    }

    /// Like [`generate`](Self::generate), but folds failures into the
    /// user-facing text from [`describe_failure`].
    pub async fn ask(&self, prompt: &str) -> String {
        match self.generate(prompt).await {
            Ok(text) => text,
            Err(e) => describe_failure(&e),
        }
    }
}

/// User-facing description of a failed request
pub fn describe_failure(error: &LlmError) -> String {
    match error {
        LlmError::Status { status, body } => {
            format!("Error: API returned status code {}\n{}", status, body)
        }
        LlmError::Connection(e) => format!(
            "Error connecting to the model API: {}\nMake sure the model server is running on your machine.",
            e
        ),
        LlmError::Decode(e) => format!("Error: could not decode the model API response: {}", e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config: LlmConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, LlmConfig::default());
        assert_eq!(config.timeout_secs, 120);
        assert_eq!(config.base_url, "http://localhost:11434");
    }

    #[test]
    fn test_trailing_slash_trimmed() {
        let config = LlmConfig {
            base_url: "http://example.test:9000/".to_string(),
            ..LlmConfig::default()
        };
        let client = LlmClient::new(&config).unwrap();
        assert_eq!(client.base_url, "http://example.test:9000");
    }

    #[test]
    fn test_describe_status_failure() {
        let error = LlmError::Status {
            status: 404,
            body: "model not found".to_string(),
        };
        assert_eq!(
            describe_failure(&error),
            "Error: API returned status code 404\nmodel not found"
        );
    }

    #[test]
    fn test_request_body_shape() {
        let request = GenerateRequest {
            model: "ipc-legal",
            prompt: "hello",
            stream: false,
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"model": "ipc-legal", "prompt": "hello", "stream": false})
        );
    }
}
