//! Markdown rendering support.
//!
//! Parses markdown into an owned document tree with repository-aware link
//! and image resolution, and highlights fenced code blocks with the same
//! pipeline as whole-file source view.

mod parser;
mod types;

pub use types::{Inline, Node};

use crate::syntax::highlight_snippet;
use crate::theme::SyntaxTheme;

/// A parsed markdown document ready for display. `plain_text` is the flat
/// text of the whole document, used for selection and copy.
#[derive(Clone, Debug, Default)]
pub struct MarkdownDocument {
    pub nodes: Vec<Node>,
    pub plain_text: String,
}

impl MarkdownDocument {
    /// Highlight every code block in place. Blocks with an unknown or
    /// missing language tag fall back to plain text.
    pub fn highlight_code_blocks(&mut self, theme: SyntaxTheme) {
        for node in &mut self.nodes {
            if let Node::CodeBlock {
                language,
                code,
                lines,
            } = node
            {
                *lines = highlight_snippet(code, language.as_deref(), theme);
            }
        }
    }

    /// Convert a node to flat text.
    pub(super) fn node_to_flat_text(node: &Node, text: &mut String) {
        match node {
            Node::Heading { children, .. }
            | Node::Paragraph { children }
            | Node::Blockquote { children } => {
                Self::inlines_to_flat_text(children, text);
                text.push('\n');
            }
            Node::CodeBlock { code, .. } => {
                for line in code.lines() {
                    text.push_str(line);
                    text.push('\n');
                }
            }
            Node::List { items, .. } => {
                for item in items {
                    Self::inlines_to_flat_text(item, text);
                    text.push('\n');
                }
            }
            Node::Table { headers, rows } => {
                for (i, header) in headers.iter().enumerate() {
                    if i > 0 {
                        text.push('\t');
                    }
                    Self::inlines_to_flat_text(header, text);
                }
                text.push('\n');
                for row in rows {
                    for (i, cell) in row.iter().enumerate() {
                        if i > 0 {
                            text.push('\t');
                        }
                        Self::inlines_to_flat_text(cell, text);
                    }
                    text.push('\n');
                }
            }
            Node::HorizontalRule => {
                text.push('\n');
            }
        }
    }

    /// Convert inline elements to flat text.
    pub(super) fn inlines_to_flat_text(inlines: &[Inline], text: &mut String) {
        for inline in inlines {
            match inline {
                Inline::Text(t) => text.push_str(t),
                Inline::Code(c) => text.push_str(c),
                Inline::Bold(children)
                | Inline::Italic(children)
                | Inline::Strikethrough(children)
                | Inline::Link { children, .. } => {
                    Self::inlines_to_flat_text(children, text);
                }
                Inline::Image { alt, .. } => text.push_str(alt),
            }
        }
    }
}
