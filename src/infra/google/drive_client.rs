//! Google Drive client for placing review documents in the shared folder.

use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;

use super::{error_for_status, GoogleApiError, ServiceAccountAuth, REQUEST_TIMEOUT};

const BASE_URL: &str = "https://www.googleapis.com/drive/v3/files";

#[derive(Debug, Deserialize)]
struct FileList {
    #[serde(default)]
    files: Vec<FileRef>,
}

#[derive(Debug, Deserialize)]
struct FileRef {
    id: String,
}

#[derive(Debug, Deserialize)]
struct FileParents {
    #[serde(default)]
    parents: Vec<String>,
}

pub struct DriveClient {
    client: Client,
    auth: Arc<ServiceAccountAuth>,
}

impl DriveClient {
    pub fn new(auth: Arc<ServiceAccountAuth>) -> Self {
        Self {
            client: Client::new(),
            auth,
        }
    }

    /// Finds a non-trashed file with the given name inside a folder.
    pub async fn find_document(
        &self,
        folder_id: &str,
        title: &str,
    ) -> Result<Option<String>, GoogleApiError> {
        let token = self.auth.get_access_token().await?;
        let query = format!(
            "name='{}' and '{}' in parents and trashed=false",
            escape_query_value(title),
            folder_id
        );

        let response = self
            .client
            .get(BASE_URL)
            .timeout(REQUEST_TIMEOUT)
            .header("Authorization", format!("Bearer {}", token))
            .query(&[("q", query.as_str()), ("fields", "files(id, name)")])
            .send()
            .await?;

        let response = error_for_status("Drive", response).await?;
        let list: FileList = response.json().await?;
        Ok(list.files.into_iter().next().map(|f| f.id))
    }

    /// Permanently deletes a file.
    pub async fn delete_document(&self, file_id: &str) -> Result<(), GoogleApiError> {
        let token = self.auth.get_access_token().await?;
        let url = format!("{}/{}", BASE_URL, file_id);

        let response = self
            .client
            .delete(&url)
            .timeout(REQUEST_TIMEOUT)
            .header("Authorization", format!("Bearer {}", token))
            .send()
            .await?;

        error_for_status("Drive", response).await?;
        tracing::info!("Deleted previous document {}", file_id);
        Ok(())
    }

    /// Moves a file into `folder_id`, detaching it from its current parents.
    pub async fn move_document(
        &self,
        file_id: &str,
        folder_id: &str,
    ) -> Result<(), GoogleApiError> {
        let token = self.auth.get_access_token().await?;
        let url = format!("{}/{}", BASE_URL, file_id);

        let response = self
            .client
            .get(&url)
            .timeout(REQUEST_TIMEOUT)
            .header("Authorization", format!("Bearer {}", token))
            .query(&[("fields", "parents")])
            .send()
            .await?;

        let response = error_for_status("Drive", response).await?;
        let file: FileParents = response.json().await?;
        let previous_parents = file.parents.join(",");

        let response = self
            .client
            .patch(&url)
            .timeout(REQUEST_TIMEOUT)
            .header("Authorization", format!("Bearer {}", token))
            .query(&[
                ("addParents", folder_id),
                ("removeParents", previous_parents.as_str()),
                ("fields", "id, parents"),
            ])
            .json(&json!({}))
            .send()
            .await?;

        error_for_status("Drive", response).await?;
        Ok(())
    }
}

/// Escapes single quotes for use inside a Drive query string literal.
fn escape_query_value(value: &str) -> String {
    value.replace('\'', "\\'")
}
