pub mod headings;
pub mod markup;

pub use headings::{heading_ranges, HeadingRange, ParagraphRange};
pub use markup::{render_markup, InlineStyle, StyleAnnotation, StyledDocument};
