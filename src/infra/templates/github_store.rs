//! Template store backed by raw files in a GitHub repository.
//!
//! Prompt, guideline, and structure templates live as `<name>.txt` files in
//! a public repo so editors can tweak them without a redeploy. Fetching is
//! a plain unauthenticated GET against the raw content host.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use std::time::Duration;

use crate::core::review::{TemplateError, TemplateStore};

/// Raw-content prefix of the repository holding the template files.
pub const DEFAULT_TEMPLATE_BASE_URL: &str =
    "https://raw.githubusercontent.com/affteamgit/writeReview/main/templates/";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

pub struct GithubTemplateStore {
    client: Client,
    base_url: String,
}

impl GithubTemplateStore {
    pub fn new(base_url: String) -> Self {
        Self {
            client: Client::new(),
            base_url,
        }
    }

    fn url_for(&self, name: &str) -> String {
        format!("{}{}.txt", self.base_url, name)
    }
}

#[async_trait]
impl TemplateStore for GithubTemplateStore {
    async fn fetch(&self, name: &str) -> Result<String, TemplateError> {
        let url = self.url_for(name);
        tracing::debug!("Fetching template {}", url);

        let response = self
            .client
            .get(&url)
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await
            .map_err(|e| TemplateError::Fetch(e.to_string()))?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(TemplateError::NotFound(name.to_string()));
        }
        if !response.status().is_success() {
            return Err(TemplateError::Fetch(format!(
                "{} returned {}",
                url,
                response.status()
            )));
        }

        response
            .text()
            .await
            .map_err(|e| TemplateError::Fetch(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_raw_file_urls() {
        let store = GithubTemplateStore::new(DEFAULT_TEMPLATE_BASE_URL.to_string());
        assert_eq!(
            store.url_for("PromptTemplate"),
            "https://raw.githubusercontent.com/affteamgit/writeReview/main/templates/PromptTemplate.txt"
        );
    }
}
