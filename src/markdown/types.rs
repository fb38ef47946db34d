//! Markdown document model.

use crate::syntax::HighlightedLine;

/// Block-level node.
#[derive(Clone, Debug)]
pub enum Node {
    Heading {
        level: u8,
        children: Vec<Inline>,
    },
    Paragraph {
        children: Vec<Inline>,
    },
    /// Fenced or indented code. `code` is kept verbatim so each block is
    /// independently copyable; `lines` is filled by the highlight pass.
    CodeBlock {
        language: Option<String>,
        code: String,
        lines: Vec<HighlightedLine>,
    },
    List {
        ordered: bool,
        items: Vec<Vec<Inline>>,
    },
    Blockquote {
        children: Vec<Inline>,
    },
    Table {
        headers: Vec<Vec<Inline>>,
        rows: Vec<Vec<Vec<Inline>>>,
    },
    HorizontalRule,
}

/// Inline element. Link and image URLs are already resolved against the
/// repository context by the parser.
#[derive(Clone, Debug)]
pub enum Inline {
    Text(String),
    Code(String),
    Bold(Vec<Inline>),
    Italic(Vec<Inline>),
    Strikethrough(Vec<Inline>),
    Link { url: String, children: Vec<Inline> },
    Image { src: String, alt: String },
}
