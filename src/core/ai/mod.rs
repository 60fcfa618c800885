pub mod models;

pub use models::{ChatMessage, ModelConfig};

use async_trait::async_trait;
use std::error::Error;

/// A text-generation provider reachable via a single request/response call.
///
/// Implementations live in `infra::ai` (OpenAI, Anthropic, X.AI). The core
/// services only ever see this trait, so providers can be swapped per
/// section without touching the orchestration code.
#[async_trait]
pub trait ChatProvider: Send + Sync {
    /// Sends a chat completion request and returns the completion text.
    async fn complete(
        &self,
        messages: &[ChatMessage],
        config: &ModelConfig,
    ) -> Result<String, Box<dyn Error + Send + Sync>>;
}

// Blanket implementation for Box<dyn ChatProvider>
// This allows us to use trait objects in the services, enabling
// runtime switching between different providers.
#[async_trait]
impl ChatProvider for Box<dyn ChatProvider> {
    async fn complete(
        &self,
        messages: &[ChatMessage],
        config: &ModelConfig,
    ) -> Result<String, Box<dyn Error + Send + Sync>> {
        // Delegate to the inner provider
        (**self).complete(messages, config).await
    }
}

/// Builds the usual single-turn request: one user message with the prompt.
pub fn user_prompt(prompt: &str) -> Vec<ChatMessage> {
    vec![ChatMessage {
        role: "user".to_string(),
        content: prompt.to_string(),
    }]
}
