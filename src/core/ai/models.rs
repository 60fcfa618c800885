use serde::{Deserialize, Serialize};

/// A single message in a chat completion request.
///
/// Role is "system" or "user" in this pipeline. The struct serializes
/// directly into the OpenAI-style wire format; providers with a different
/// shape (Anthropic) convert it themselves.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

/// Model identifier plus sampling parameters for one provider call.
#[derive(Debug, Clone)]
pub struct ModelConfig {
    pub model: String,
    pub temperature: f32,
    /// Completion token cap. `None` means the provider default; Anthropic
    /// requires an explicit cap, so its client falls back to 800 there.
    pub max_tokens: Option<u32>,
}

impl ModelConfig {
    /// Settings used for all section-generation calls.
    pub fn generation(model: String) -> Self {
        Self {
            model,
            temperature: 0.5,
            max_tokens: Some(800),
        }
    }

    /// Settings for the fine-tuned rewrite model (provider defaults apply).
    pub fn rewrite(model: String) -> Self {
        Self {
            model,
            temperature: 1.0,
            max_tokens: None,
        }
    }
}
