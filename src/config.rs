//! Runtime configuration, loaded from environment variables (optionally via
//! a `.env` file). Model names and the template location have sensible
//! defaults; keys and sheet/folder ids must be provided.

use anyhow::{Context, Result};

use crate::infra::templates::DEFAULT_TEMPLATE_BASE_URL;

/// Default model identifiers. Overridable per environment so a model bump
/// does not need a rebuild.
const DEFAULT_CLAUDE_MODEL: &str = "claude-sonnet-4-20250514";
const DEFAULT_GROK_MODEL: &str = "grok-3";
const DEFAULT_REWRITE_MODEL: &str = "ft:gpt-3.5-turbo-1106:affiliation:adam0301:ByHlJhcR";

#[derive(Debug, Clone)]
pub struct Config {
    pub openai_api_key: String,
    pub anthropic_api_key: String,
    pub grok_api_key: String,
    pub coinmarketcap_api_key: String,

    pub spreadsheet_id: String,
    pub sheet_name: String,
    pub folder_id: String,

    pub template_base_url: String,
    pub claude_model: String,
    pub grok_model: String,
    pub rewrite_model: String,
}

impl Config {
    pub fn from_env() -> Result<Config> {
        Ok(Config {
            openai_api_key: required("OPENAI_API_KEY")?,
            anthropic_api_key: required("ANTHROPIC_API_KEY")?,
            grok_api_key: required("GROK_API_KEY")?,
            coinmarketcap_api_key: required("COINMARKETCAP_API_KEY")?,
            spreadsheet_id: required("SPREADSHEET_ID")?,
            sheet_name: required("SHEET_NAME")?,
            folder_id: required("FOLDER_ID")?,
            template_base_url: optional("TEMPLATE_BASE_URL", DEFAULT_TEMPLATE_BASE_URL),
            claude_model: optional("CLAUDE_MODEL", DEFAULT_CLAUDE_MODEL),
            grok_model: optional("GROK_MODEL", DEFAULT_GROK_MODEL),
            rewrite_model: optional("REWRITE_MODEL", DEFAULT_REWRITE_MODEL),
        })
    }
}

fn required(name: &str) -> Result<String> {
    std::env::var(name).with_context(|| format!("Missing {} environment variable", name))
}

fn optional(name: &str, default: &str) -> String {
    std::env::var(name).unwrap_or_else(|_| default.to_string())
}
