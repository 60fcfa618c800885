//! Publishes a finished review as a styled Google Doc.
//!
//! The flow mirrors how the document store wants to be driven: insert the
//! plain text first, apply the client-computed inline styles, then read the
//! paragraph structure back and style the section headings in the store's
//! own coordinate space. Finally the document is moved into the shared
//! reviews folder, replacing any previous document with the same title.

use super::{DocsClient, DriveClient, GoogleApiError};
use crate::core::formatting::headings::heading_titles;
use crate::core::formatting::{heading_ranges, render_markup};

pub struct ReviewPublisher {
    docs: DocsClient,
    drive: DriveClient,
}

impl ReviewPublisher {
    pub fn new(docs: DocsClient, drive: DriveClient) -> Self {
        Self { docs, drive }
    }

    /// Publishes `review_text` (markdown subset) and returns the doc URL.
    pub async fn publish(
        &self,
        folder_id: &str,
        title: &str,
        review_text: &str,
    ) -> Result<String, GoogleApiError> {
        if let Some(existing) = self.drive.find_document(folder_id, title).await? {
            tracing::info!("Replacing existing document '{}'", title);
            self.drive.delete_document(&existing).await?;
        }

        let doc_id = self.docs.create_document(title).await?;

        let styled = render_markup(review_text);
        self.docs.insert_review(&doc_id, &styled).await?;

        // Heading pass: ranges must come from the committed document, so
        // re-query the paragraph structure instead of predicting indices.
        let titles = heading_titles();
        let paragraphs = self.docs.get_paragraphs(&doc_id).await?;
        let ranges = heading_ranges(&paragraphs, &titles);
        self.docs.apply_heading_styles(&doc_id, &ranges).await?;

        self.drive.move_document(&doc_id, folder_id).await?;

        Ok(format!("https://docs.google.com/document/d/{}", doc_id))
    }
}
