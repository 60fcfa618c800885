pub mod auth;
pub mod docs_client;
pub mod drive_client;
pub mod publisher;
pub mod sheets_client;

pub use auth::ServiceAccountAuth;
pub use docs_client::DocsClient;
pub use drive_client::DriveClient;
pub use publisher::ReviewPublisher;
pub use sheets_client::SheetsClient;

use reqwest::StatusCode;
use std::time::Duration;
use thiserror::Error;

/// Per-call timeout for Google API requests.
pub(crate) const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Errors raised by the Google API clients.
#[derive(Debug, Error)]
pub enum GoogleApiError {
    #[error("service account auth error: {0}")]
    Auth(String),
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("JWT signing failed: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),
    #[error("failed to parse credentials or response: {0}")]
    Json(#[from] serde_json::Error),
    #[error("failed to read service account key: {0}")]
    Io(#[from] std::io::Error),
    #[error("{api} API error ({status}): {body}")]
    Api {
        api: &'static str,
        status: StatusCode,
        body: String,
    },
    #[error("unexpected sheet data: {0}")]
    SheetData(String),
}

/// Turns a non-success response into a `GoogleApiError::Api`.
pub(crate) async fn error_for_status(
    api: &'static str,
    response: reqwest::Response,
) -> Result<reqwest::Response, GoogleApiError> {
    if response.status().is_success() {
        return Ok(response);
    }
    let status = response.status();
    let body = response.text().await?;
    Err(GoogleApiError::Api { api, status, body })
}
