//! Google Sheets client for the review input sheet.
//!
//! The sheet layout is fixed: `B1` holds the selected casino name, the
//! `B2:R` block holds per-section operator notes and comparison columns,
//! and `B7` receives the published review link.

use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;

use super::{error_for_status, GoogleApiError, ServiceAccountAuth, REQUEST_TIMEOUT};
use crate::core::review::models::CasinoSheet;

const BASE_URL: &str = "https://sheets.googleapis.com/v4/spreadsheets";

#[derive(Debug, Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Vec<Vec<String>>,
}

pub struct SheetsClient {
    client: Client,
    auth: Arc<ServiceAccountAuth>,
}

impl SheetsClient {
    pub fn new(auth: Arc<ServiceAccountAuth>) -> Self {
        Self {
            client: Client::new(),
            auth,
        }
    }

    /// Reads a value range, returning an empty grid when the range is blank.
    pub async fn get_values(
        &self,
        spreadsheet_id: &str,
        range: &str,
    ) -> Result<Vec<Vec<String>>, GoogleApiError> {
        let token = self.auth.get_access_token().await?;
        let url = format!("{}/{}/values/{}", BASE_URL, spreadsheet_id, range);

        let response = self
            .client
            .get(&url)
            .timeout(REQUEST_TIMEOUT)
            .header("Authorization", format!("Bearer {}", token))
            .send()
            .await?;

        let response = error_for_status("Sheets", response).await?;
        let value_range: ValueRange = response.json().await?;
        Ok(value_range.values)
    }

    /// Writes a value range with RAW input option (no cell parsing).
    pub async fn update_values(
        &self,
        spreadsheet_id: &str,
        range: &str,
        values: Vec<Vec<String>>,
    ) -> Result<(), GoogleApiError> {
        let token = self.auth.get_access_token().await?;
        let url = format!(
            "{}/{}/values/{}?valueInputOption=RAW",
            BASE_URL, spreadsheet_id, range
        );

        let response = self
            .client
            .put(&url)
            .timeout(REQUEST_TIMEOUT)
            .header("Authorization", format!("Bearer {}", token))
            .json(&json!({ "values": values }))
            .send()
            .await?;

        error_for_status("Sheets", response).await?;
        Ok(())
    }

    /// Reads the selected casino name and the per-section input block.
    pub async fn read_casino_sheet(
        &self,
        spreadsheet_id: &str,
        sheet_name: &str,
    ) -> Result<CasinoSheet, GoogleApiError> {
        let name_cells = self
            .get_values(spreadsheet_id, &format!("{}!B1", sheet_name))
            .await?;
        let casino = name_cells
            .first()
            .and_then(|row| row.first())
            .map(|cell| cell.trim().to_string())
            .unwrap_or_default();

        if casino.is_empty() {
            return Err(GoogleApiError::SheetData(format!(
                "no casino name in {}!B1",
                sheet_name
            )));
        }

        let rows = self
            .get_values(spreadsheet_id, &format!("{}!B2:R", sheet_name))
            .await?;

        tracing::info!("Loaded sheet data for '{}' ({} rows)", casino, rows.len());
        Ok(CasinoSheet::from_rows(casino, &rows))
    }

    /// Writes the published review link into `B7`.
    pub async fn write_review_link(
        &self,
        spreadsheet_id: &str,
        sheet_name: &str,
        link: &str,
    ) -> Result<(), GoogleApiError> {
        self.update_values(
            spreadsheet_id,
            &format!("{}!B7", sheet_name),
            vec![vec![link.to_string()]],
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn value_range_defaults_to_empty_grid() {
        // A blank range comes back without a `values` field at all.
        let parsed: ValueRange = serde_json::from_str(r#"{"range": "Casinos!B2:R"}"#).unwrap();
        assert!(parsed.values.is_empty());

        let parsed: ValueRange =
            serde_json::from_str(r#"{"values": [["a", "b"], ["c"]]}"#).unwrap();
        assert_eq!(parsed.values.len(), 2);
        assert_eq!(parsed.values[0][1], "b");
    }
}
