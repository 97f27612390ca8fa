use crate::domain::ports::TextGenerator;
use crate::utils::error::{GenError, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

/// `TextGenerator` backed by an OpenAI-compatible chat-completions
/// endpoint. The base URL is configurable so tests can point it at a mock
/// server. Every request carries the client-level timeout; a timeout or
/// non-success status maps to `ProviderUnavailable`, an unparsable body to
/// `ProviderMalformedOutput`.
pub struct OpenAiTextGenerator {
    client: Client,
    base_url: String,
    api_key: String,
    model: String,
}

impl OpenAiTextGenerator {
    pub fn new(base_url: &str, api_key: &str, model: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            model: model.to_string(),
        })
    }
}

#[async_trait]
impl TextGenerator for OpenAiTextGenerator {
    async fn generate_text(&self, prompt: &str, max_output_tokens: usize) -> Result<String> {
        let url = format!("{}/v1/chat/completions", self.base_url);
        let body = serde_json::json!({
            "model": self.model,
            "messages": [{"role": "user", "content": prompt}],
            "max_tokens": max_output_tokens,
        });

        tracing::debug!("Provider request to {}", url);
        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(GenError::ProviderUnavailable {
                reason: format!("provider returned HTTP {}", status),
            });
        }

        let text = response.text().await?;
        let payload: serde_json::Value =
            serde_json::from_str(&text).map_err(|e| GenError::ProviderMalformedOutput {
                detail: format!("response body is not JSON: {}", e),
            })?;

        payload["choices"][0]["message"]["content"]
            .as_str()
            .map(|content| content.to_string())
            .ok_or_else(|| GenError::ProviderMalformedOutput {
                detail: "response has no choices[0].message.content".to_string(),
            })
    }
}
