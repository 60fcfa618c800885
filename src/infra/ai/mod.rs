pub mod anthropic_client;
pub mod openai_client;
pub mod xai_client;

pub use anthropic_client::AnthropicClient;
pub use openai_client::OpenAiClient;
pub use xai_client::XaiClient;

use std::time::Duration;

/// Per-call timeout shared by all provider clients. A hung generation call
/// degrades to that section's placeholder instead of stalling the run.
pub(crate) const REQUEST_TIMEOUT: Duration = Duration::from_secs(90);
