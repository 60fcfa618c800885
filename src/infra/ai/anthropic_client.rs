use crate::core::ai::{ChatMessage, ChatProvider, ModelConfig};
use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use std::error::Error;

use super::REQUEST_TIMEOUT;

/// Anthropic requires an explicit completion cap; this is the pipeline's
/// default when the model config leaves it open.
const DEFAULT_MAX_TOKENS: u32 = 800;

const API_VERSION: &str = "2023-06-01";

/// Request body for the Anthropic messages endpoint.
///
/// Unlike the OpenAI-style APIs, the system prompt is a separate top-level
/// field rather than a message with role "system".
#[derive(Debug, Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    system: Option<&'a str>,
    messages: Vec<&'a ChatMessage>,
}

pub struct AnthropicClient {
    client: Client,
    api_key: String,
}

impl AnthropicClient {
    pub fn new(api_key: String) -> Self {
        Self {
            client: Client::new(),
            api_key,
        }
    }

    /// Splits out the system prompt and keeps the remaining conversation.
    fn split_messages<'a>(messages: &'a [ChatMessage]) -> (Option<&'a str>, Vec<&'a ChatMessage>) {
        let system = messages
            .iter()
            .find(|m| m.role == "system")
            .map(|m| m.content.as_str());
        let rest = messages.iter().filter(|m| m.role != "system").collect();
        (system, rest)
    }
}

#[async_trait]
impl ChatProvider for AnthropicClient {
    async fn complete(
        &self,
        messages: &[ChatMessage],
        config: &ModelConfig,
    ) -> Result<String, Box<dyn Error + Send + Sync>> {
        let url = "https://api.anthropic.com/v1/messages";

        let (system, conversation) = Self::split_messages(messages);
        let payload = MessagesRequest {
            model: &config.model,
            max_tokens: config.max_tokens.unwrap_or(DEFAULT_MAX_TOKENS),
            temperature: config.temperature,
            system,
            messages: conversation,
        };

        let response = self
            .client
            .post(url)
            .timeout(REQUEST_TIMEOUT)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", API_VERSION)
            .header("Content-Type", "application/json")
            .json(&payload)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await?;
            return Err(format!("Anthropic API error: {} - {}", status, text).into());
        }

        let response_json: serde_json::Value = response.json().await?;

        // Extract the first text block
        let content = response_json["content"][0]["text"]
            .as_str()
            .ok_or("Failed to parse response content")?
            .to_string();

        Ok(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn msg(role: &str, content: &str) -> ChatMessage {
        ChatMessage {
            role: role.to_string(),
            content: content.to_string(),
        }
    }

    #[test]
    fn system_message_becomes_top_level_field() {
        let messages = vec![msg("system", "be terse"), msg("user", "hello")];
        let (system, rest) = AnthropicClient::split_messages(&messages);
        assert_eq!(system, Some("be terse"));
        assert_eq!(rest.len(), 1);
        assert_eq!(rest[0].role, "user");
    }

    #[test]
    fn request_serializes_without_system_when_absent() {
        let messages = vec![msg("user", "hello")];
        let (system, conversation) = AnthropicClient::split_messages(&messages);
        let payload = MessagesRequest {
            model: "claude-sonnet-4-20250514",
            max_tokens: 800,
            temperature: 0.5,
            system,
            messages: conversation,
        };
        let json = serde_json::to_string(&payload).unwrap();
        assert!(!json.contains("\"system\""));
        assert!(json.contains("\"max_tokens\":800"));
    }
}
