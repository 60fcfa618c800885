//! Heading pass for published documents.
//!
//! Section headings can only be styled after the plain text has been
//! inserted, because the ranges are expressed in the document store's own
//! coordinate space. The caller inserts the text, reads the paragraph
//! structure back, and feeds it through `heading_ranges`; this module never
//! tries to predict the store's indices client-side.

use crate::core::review::models::Section;

/// Heading font size applied on top of bold, in points.
pub const HEADING_FONT_SIZE_PT: f64 = 16.0;

/// A paragraph as reported by the document store after insertion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParagraphRange {
    /// Concatenated text-run content, including the trailing newline.
    pub text: String,
    pub start_index: i64,
    pub end_index: i64,
}

/// A range that should receive heading styling (bold + larger font).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadingRange {
    pub start_index: i64,
    pub end_index: i64,
}

/// Titles that are treated as section headings when they occupy a whole
/// paragraph. Later flow variants also emit an Overview block, so it is
/// matched alongside the canonical sections.
pub fn heading_titles() -> Vec<&'static str> {
    let mut titles: Vec<&'static str> = Section::ALL.iter().map(|s| s.title()).collect();
    titles.push("Overview");
    titles
}

/// Returns the style ranges for every paragraph whose trimmed text exactly
/// equals one of `titles`. The range excludes the paragraph's trailing
/// newline (the store's `end_index` includes it).
pub fn heading_ranges(paragraphs: &[ParagraphRange], titles: &[&str]) -> Vec<HeadingRange> {
    paragraphs
        .iter()
        .filter(|p| titles.contains(&p.text.trim()))
        .map(|p| HeadingRange {
            start_index: p.start_index,
            end_index: p.end_index - 1,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn para(text: &str, start: i64, end: i64) -> ParagraphRange {
        ParagraphRange {
            text: text.to_string(),
            start_index: start,
            end_index: end,
        }
    }

    #[test]
    fn matches_exact_section_titles() {
        let paragraphs = vec![
            para("Slotsville review\n", 1, 19),
            para("General\n", 19, 27),
            para("Lots of body text about the casino.\n", 27, 63),
            para("Payments\n", 63, 72),
        ];
        let ranges = heading_ranges(&paragraphs, &heading_titles());
        assert_eq!(
            ranges,
            vec![
                HeadingRange {
                    start_index: 19,
                    end_index: 26
                },
                HeadingRange {
                    start_index: 63,
                    end_index: 71
                },
            ]
        );
    }

    #[test]
    fn trims_whitespace_before_matching() {
        let paragraphs = vec![para("  Responsible Gambling \n", 10, 34)];
        let ranges = heading_ranges(&paragraphs, &heading_titles());
        assert_eq!(ranges.len(), 1);
        // Trailing newline stays excluded from the styled range.
        assert_eq!(ranges[0].end_index, 33);
    }

    #[test]
    fn ignores_non_heading_paragraphs() {
        let paragraphs = vec![
            para("General thoughts on the lobby\n", 1, 31),
            para("payments\n", 31, 40),
        ];
        assert!(heading_ranges(&paragraphs, &heading_titles()).is_empty());
    }

    #[test]
    fn overview_counts_as_heading() {
        let paragraphs = vec![para("Overview\n", 5, 14)];
        assert_eq!(heading_ranges(&paragraphs, &heading_titles()).len(), 1);
    }
}
