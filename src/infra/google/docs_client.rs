//! Google Docs client for creating and styling review documents.
//!
//! Styling happens in two phases. Inline styles (bold, links, the title
//! line) are computed client-side from the formatter's annotations, offset
//! by the store's 1-based body start. Heading styles need the document's
//! own paragraph boundaries, so they are applied only after reading the
//! structure back with `get_paragraphs`.

use reqwest::Client;
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;

use super::{error_for_status, GoogleApiError, ServiceAccountAuth, REQUEST_TIMEOUT};
use crate::core::formatting::headings::HEADING_FONT_SIZE_PT;
use crate::core::formatting::{HeadingRange, InlineStyle, ParagraphRange, StyledDocument};

const BASE_URL: &str = "https://docs.googleapis.com/v1/documents";

/// The document body starts at index 1; index 0 is reserved by the API.
const BODY_START_INDEX: usize = 1;

// =============================================================================
// DOCS API RESPONSE STRUCTURES
// =============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateResponse {
    document_id: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Document {
    body: Option<Body>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Body {
    #[serde(default)]
    content: Vec<StructuralElement>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StructuralElement {
    start_index: Option<i64>,
    end_index: Option<i64>,
    paragraph: Option<Paragraph>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Paragraph {
    #[serde(default)]
    elements: Vec<ParagraphElement>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ParagraphElement {
    text_run: Option<TextRun>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TextRun {
    content: Option<String>,
}

// =============================================================================
// DOCS CLIENT
// =============================================================================

pub struct DocsClient {
    client: Client,
    auth: Arc<ServiceAccountAuth>,
}

impl DocsClient {
    pub fn new(auth: Arc<ServiceAccountAuth>) -> Self {
        Self {
            client: Client::new(),
            auth,
        }
    }

    /// Creates an empty document and returns its id.
    pub async fn create_document(&self, title: &str) -> Result<String, GoogleApiError> {
        let token = self.auth.get_access_token().await?;

        let response = self
            .client
            .post(BASE_URL)
            .timeout(REQUEST_TIMEOUT)
            .header("Authorization", format!("Bearer {}", token))
            .json(&json!({ "title": title }))
            .send()
            .await?;

        let response = error_for_status("Docs", response).await?;
        let created: CreateResponse = response.json().await?;

        tracing::info!("Created document '{}' ({})", title, created.document_id);
        Ok(created.document_id)
    }

    async fn batch_update(&self, doc_id: &str, requests: &[Value]) -> Result<(), GoogleApiError> {
        if requests.is_empty() {
            return Ok(());
        }

        let token = self.auth.get_access_token().await?;
        let url = format!("{}/{}:batchUpdate", BASE_URL, doc_id);

        let response = self
            .client
            .post(&url)
            .timeout(REQUEST_TIMEOUT)
            .header("Authorization", format!("Bearer {}", token))
            .json(&json!({ "requests": requests }))
            .send()
            .await?;

        error_for_status("Docs", response).await?;
        Ok(())
    }

    /// Inserts the plain text, then applies the title and inline styles.
    ///
    /// Two separate batch updates: the style ranges are only valid once the
    /// text insert has been committed.
    pub async fn insert_review(
        &self,
        doc_id: &str,
        styled: &StyledDocument,
    ) -> Result<(), GoogleApiError> {
        if styled.plain_text.is_empty() {
            return Ok(());
        }

        self.batch_update(
            doc_id,
            &[json!({
                "insertText": {
                    "location": { "index": BODY_START_INDEX },
                    "text": styled.plain_text,
                }
            })],
        )
        .await?;

        self.batch_update(doc_id, &style_requests(styled)).await
    }

    /// Reads back the document's paragraph ranges for the heading pass.
    pub async fn get_paragraphs(&self, doc_id: &str) -> Result<Vec<ParagraphRange>, GoogleApiError> {
        let token = self.auth.get_access_token().await?;
        let url = format!("{}/{}", BASE_URL, doc_id);

        let response = self
            .client
            .get(&url)
            .timeout(REQUEST_TIMEOUT)
            .header("Authorization", format!("Bearer {}", token))
            .send()
            .await?;

        let response = error_for_status("Docs", response).await?;
        let document: Document = response.json().await?;
        Ok(collect_paragraphs(document))
    }

    /// Applies bold + heading font size to the given ranges.
    pub async fn apply_heading_styles(
        &self,
        doc_id: &str,
        ranges: &[HeadingRange],
    ) -> Result<(), GoogleApiError> {
        self.batch_update(doc_id, &heading_requests(ranges)).await
    }
}

// =============================================================================
// REQUEST BUILDERS
// =============================================================================

/// Builds the title and inline style requests for an inserted document.
///
/// Annotation offsets are shifted by the body start index. Empty ranges are
/// dropped because the API rejects them.
fn style_requests(styled: &StyledDocument) -> Vec<Value> {
    let mut requests = Vec::with_capacity(styled.annotations.len() + 1);

    let title_len = styled.title_line().chars().count();
    if title_len > 0 {
        requests.push(json!({
            "updateParagraphStyle": {
                "range": {
                    "startIndex": BODY_START_INDEX,
                    "endIndex": BODY_START_INDEX + title_len,
                },
                "paragraphStyle": { "namedStyleType": "TITLE" },
                "fields": "namedStyleType",
            }
        }));
    }

    for annotation in &styled.annotations {
        if annotation.start == annotation.end {
            continue;
        }
        let range = json!({
            "startIndex": BODY_START_INDEX + annotation.start,
            "endIndex": BODY_START_INDEX + annotation.end,
        });
        requests.push(match &annotation.style {
            InlineStyle::Bold => json!({
                "updateTextStyle": {
                    "range": range,
                    "textStyle": { "bold": true },
                    "fields": "bold",
                }
            }),
            InlineStyle::Link { url } => json!({
                "updateTextStyle": {
                    "range": range,
                    "textStyle": { "link": { "url": url } },
                    "fields": "link",
                }
            }),
        });
    }

    requests
}

fn heading_requests(ranges: &[HeadingRange]) -> Vec<Value> {
    ranges
        .iter()
        .map(|range| {
            json!({
                "updateTextStyle": {
                    "range": {
                        "startIndex": range.start_index,
                        "endIndex": range.end_index,
                    },
                    "textStyle": {
                        "bold": true,
                        "fontSize": { "magnitude": HEADING_FONT_SIZE_PT, "unit": "PT" },
                    },
                    "fields": "bold,fontSize",
                }
            })
        })
        .collect()
}

/// Flattens the document body into paragraph ranges with their text.
fn collect_paragraphs(document: Document) -> Vec<ParagraphRange> {
    let Some(body) = document.body else {
        return Vec::new();
    };

    body.content
        .into_iter()
        .filter_map(|element| {
            let paragraph = element.paragraph?;
            let start_index = element.start_index?;
            let end_index = element.end_index?;

            let text: String = paragraph
                .elements
                .iter()
                .filter_map(|e| e.text_run.as_ref())
                .filter_map(|run| run.content.as_deref())
                .collect();

            Some(ParagraphRange {
                text,
                start_index,
                end_index,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::formatting::render_markup;

    #[test]
    fn style_requests_shift_offsets_to_body_start() {
        let styled = render_markup("Title line\na **b** [c](https://c.io)");
        let requests = style_requests(&styled);

        // Title + one bold + one link.
        assert_eq!(requests.len(), 3);
        assert_eq!(
            requests[0]["updateParagraphStyle"]["paragraphStyle"]["namedStyleType"],
            "TITLE"
        );
        assert_eq!(requests[0]["updateParagraphStyle"]["range"]["startIndex"], 1);
        assert_eq!(requests[0]["updateParagraphStyle"]["range"]["endIndex"], 11);

        // Plain text is "Title line\na b c"; the bold "b" is at offset 13.
        assert_eq!(requests[1]["updateTextStyle"]["range"]["startIndex"], 14);
        assert_eq!(requests[1]["updateTextStyle"]["range"]["endIndex"], 15);
        assert_eq!(requests[1]["updateTextStyle"]["fields"], "bold");

        assert_eq!(
            requests[2]["updateTextStyle"]["textStyle"]["link"]["url"],
            "https://c.io"
        );
    }

    #[test]
    fn empty_annotation_ranges_are_dropped() {
        let styled = render_markup("x ****");
        assert_eq!(styled.annotations.len(), 1);
        let requests = style_requests(&styled);
        // Only the title request survives.
        assert_eq!(requests.len(), 1);
        assert!(requests[0].get("updateParagraphStyle").is_some());
    }

    #[test]
    fn heading_requests_carry_font_size() {
        let requests = heading_requests(&[HeadingRange {
            start_index: 19,
            end_index: 26,
        }]);
        assert_eq!(requests.len(), 1);
        let style = &requests[0]["updateTextStyle"]["textStyle"];
        assert_eq!(style["bold"], true);
        assert_eq!(style["fontSize"]["magnitude"], 16.0);
        assert_eq!(requests[0]["updateTextStyle"]["fields"], "bold,fontSize");
    }

    #[test]
    fn collects_paragraphs_from_document_json() {
        let raw = r#"{
            "body": {
                "content": [
                    { "endIndex": 1, "sectionBreak": {} },
                    {
                        "startIndex": 1,
                        "endIndex": 9,
                        "paragraph": {
                            "elements": [
                                { "textRun": { "content": "General\n" } }
                            ]
                        }
                    },
                    {
                        "startIndex": 9,
                        "endIndex": 21,
                        "paragraph": {
                            "elements": [
                                { "textRun": { "content": "split " } },
                                { "textRun": { "content": "content\n" } }
                            ]
                        }
                    }
                ]
            }
        }"#;
        let document: Document = serde_json::from_str(raw).unwrap();
        let paragraphs = collect_paragraphs(document);

        assert_eq!(paragraphs.len(), 2);
        assert_eq!(paragraphs[0].text, "General\n");
        assert_eq!(paragraphs[0].start_index, 1);
        assert_eq!(paragraphs[1].text, "split content\n");
        assert_eq!(paragraphs[1].end_index, 21);
    }
}
