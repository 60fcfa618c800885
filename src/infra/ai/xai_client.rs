use crate::core::ai::{ChatMessage, ChatProvider, ModelConfig};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::json;
use std::error::Error;

use super::REQUEST_TIMEOUT;

/// Client for the X.AI chat completions endpoint. The wire format is
/// OpenAI-compatible, only the host and auth token differ.
pub struct XaiClient {
    client: Client,
    api_key: String,
}

impl XaiClient {
    pub fn new(api_key: String) -> Self {
        Self {
            client: Client::new(),
            api_key,
        }
    }
}

#[async_trait]
impl ChatProvider for XaiClient {
    async fn complete(
        &self,
        messages: &[ChatMessage],
        config: &ModelConfig,
    ) -> Result<String, Box<dyn Error + Send + Sync>> {
        let url = "https://api.x.ai/v1/chat/completions";

        let payload = json!({
            "model": config.model,
            "messages": messages,
            "temperature": config.temperature,
            "max_tokens": config.max_tokens,
        });

        let response = self
            .client
            .post(url)
            .timeout(REQUEST_TIMEOUT)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&payload)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await?;
            return Err(format!("X.AI API error: {} - {}", status, text).into());
        }

        let response_json: serde_json::Value = response.json().await?;

        // Extract content
        let content = response_json["choices"][0]["message"]["content"]
            .as_str()
            .ok_or("Failed to parse response content")?
            .to_string();

        Ok(content)
    }
}
