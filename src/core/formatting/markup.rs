//! Rich-text formatter: converts the markdown subset used by the generated
//! reviews (bold spans and hyperlinks) into plain text plus a list of
//! range-based style annotations that the Google Docs client can apply.
//!
//! The grammar is deliberately tiny and flat. Spans never nest, the scan is
//! a single left-to-right pass, and anything that does not match is copied
//! through verbatim. Unterminated `**` or a `[label]` without a following
//! `(url)` is treated as literal text, never an error.

use once_cell::sync::Lazy;
use regex::Regex;

// Alternation of the two span forms, leftmost match wins. Group 1 is the
// bold inner text; groups 2 and 3 are the link label and URL.
static INLINE_MARKUP: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\*\*(.*?)\*\*|\[([^\]]+?)\]\((https?://[^)]+)\)").unwrap());

/// One of the inline styles the grammar can produce.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InlineStyle {
    Bold,
    Link { url: String },
}

/// A style applied to a half-open range `[start, end)` of the plain text.
///
/// Offsets count Unicode scalar values of the *output* text, so they stay
/// valid after the markup delimiters have been stripped. The document
/// client adds the store's own base offset (Google Docs bodies start at
/// index 1) when it turns these into API requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleAnnotation {
    pub start: usize,
    pub end: usize,
    pub style: InlineStyle,
}

/// Plain text plus the annotations extracted from it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StyledDocument {
    pub plain_text: String,
    pub annotations: Vec<StyleAnnotation>,
}

impl StyledDocument {
    /// The first line of the plain text, styled as the document title.
    pub fn title_line(&self) -> &str {
        self.plain_text.split('\n').next().unwrap_or("")
    }
}

/// Scans `input` once for bold and link spans and returns the stripped
/// plain text together with the style annotations over it.
///
/// Annotation start offsets are a function of already-emitted output
/// length only. A single cursor tracks how many characters have been
/// written so far; each match appends the literal run before it, then the
/// span's inner text, recording the annotation around that append.
pub fn render_markup(input: &str) -> StyledDocument {
    let mut plain_text = String::with_capacity(input.len());
    let mut annotations = Vec::new();
    let mut cursor = 0usize;
    let mut last_end = 0usize;

    for caps in INLINE_MARKUP.captures_iter(input) {
        let m = caps.get(0).expect("match group 0 always present");

        let literal = &input[last_end..m.start()];
        plain_text.push_str(literal);
        cursor += literal.chars().count();

        let (inner, style) = if let Some(bold) = caps.get(1) {
            (bold.as_str(), InlineStyle::Bold)
        } else {
            // The alternation guarantees groups 2 and 3 are present here.
            let label = caps.get(2).map(|g| g.as_str()).unwrap_or("");
            let url = caps.get(3).map(|g| g.as_str()).unwrap_or("");
            (
                label,
                InlineStyle::Link {
                    url: url.to_string(),
                },
            )
        };

        let inner_len = inner.chars().count();
        annotations.push(StyleAnnotation {
            start: cursor,
            end: cursor + inner_len,
            style,
        });
        plain_text.push_str(inner);
        cursor += inner_len;
        last_end = m.end();
    }

    plain_text.push_str(&input[last_end..]);

    StyledDocument {
        plain_text,
        annotations,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bold(start: usize, end: usize) -> StyleAnnotation {
        StyleAnnotation {
            start,
            end,
            style: InlineStyle::Bold,
        }
    }

    fn link(start: usize, end: usize, url: &str) -> StyleAnnotation {
        StyleAnnotation {
            start,
            end,
            style: InlineStyle::Link {
                url: url.to_string(),
            },
        }
    }

    #[test]
    fn plain_input_passes_through_unchanged() {
        let doc = render_markup("no markup here, just text.\nsecond line");
        assert_eq!(doc.plain_text, "no markup here, just text.\nsecond line");
        assert!(doc.annotations.is_empty());
    }

    #[test]
    fn bold_span_is_stripped_and_annotated() {
        let doc = render_markup("a **b** c");
        assert_eq!(doc.plain_text, "a b c");
        assert_eq!(doc.annotations, vec![bold(2, 3)]);
        assert_eq!(&doc.plain_text[2..3], "b");
    }

    #[test]
    fn link_span_covers_full_output() {
        let doc = render_markup("[click](https://x.com)");
        assert_eq!(doc.plain_text, "click");
        assert_eq!(doc.annotations, vec![link(0, 5, "https://x.com")]);
    }

    #[test]
    fn unterminated_bold_fails_open() {
        let doc = render_markup("this is **bold with no end");
        assert_eq!(doc.plain_text, "this is **bold with no end");
        assert!(doc.annotations.is_empty());
    }

    #[test]
    fn bracket_without_url_fails_open() {
        let doc = render_markup("[label] with no url, [other](not-a-url)");
        assert_eq!(doc.plain_text, "[label] with no url, [other](not-a-url)");
        assert!(doc.annotations.is_empty());
    }

    #[test]
    fn rendering_is_idempotent_on_its_own_output() {
        let first = render_markup("intro **key fact** and [site](https://example.com).");
        let second = render_markup(&first.plain_text);
        assert_eq!(second.plain_text, first.plain_text);
        assert!(second.annotations.is_empty());
    }

    #[test]
    fn concatenation_shifts_annotations_by_prefix_length() {
        let a = "start **one** mid ";
        let b = "[two](https://t.co) end";
        let doc_a = render_markup(a);
        let doc_b = render_markup(b);
        let combined = render_markup(&format!("{}{}", a, b));

        assert_eq!(
            combined.plain_text,
            format!("{}{}", doc_a.plain_text, doc_b.plain_text)
        );

        let shift = doc_a.plain_text.chars().count();
        let mut expected = doc_a.annotations.clone();
        expected.extend(doc_b.annotations.iter().map(|ann| StyleAnnotation {
            start: ann.start + shift,
            end: ann.end + shift,
            style: ann.style.clone(),
        }));
        assert_eq!(combined.annotations, expected);
    }

    #[test]
    fn mixed_spans_keep_source_order() {
        let doc = render_markup("**Bonuses**\nGrab the [promo](https://c.io/p) now, **fast**.");
        assert_eq!(doc.plain_text, "Bonuses\nGrab the promo now, fast.");
        assert_eq!(
            doc.annotations,
            vec![bold(0, 7), link(17, 22, "https://c.io/p"), bold(28, 32)]
        );
    }

    #[test]
    fn offsets_count_characters_not_bytes() {
        let doc = render_markup("caf\u{e9} **na\u{ef}ve**");
        assert_eq!(doc.plain_text, "caf\u{e9} na\u{ef}ve");
        // 5 characters precede the span even though the prefix is 6 bytes.
        assert_eq!(doc.annotations, vec![bold(5, 10)]);
    }

    #[test]
    fn annotation_ranges_are_valid_for_the_output() {
        let doc = render_markup("x **a** [b](https://b.io) y **c**");
        let len = doc.plain_text.chars().count();
        for ann in &doc.annotations {
            assert!(ann.start <= ann.end);
            assert!(ann.end <= len);
        }
    }

    #[test]
    fn title_line_is_first_line() {
        let doc = render_markup("Slotsville review\n\n**General**\nbody");
        assert_eq!(doc.title_line(), "Slotsville review");
        assert_eq!(render_markup("").title_line(), "");
    }
}
