//! Markdown parsing logic.

use pulldown_cmark::{CodeBlockKind, Event, HeadingLevel, Options, Parser, Tag, TagEnd};

use super::types::{Inline, Node};
use super::MarkdownDocument;
use crate::resolver::{resolve, LinkContext, UrlKind};

impl MarkdownDocument {
    /// Parse markdown content into a document, resolving every link and
    /// image URL against the repository context of the file being rendered.
    pub fn parse(content: &str, ctx: &LinkContext) -> Self {
        let mut options = Options::empty();
        options.insert(Options::ENABLE_TABLES);
        options.insert(Options::ENABLE_STRIKETHROUGH);
        options.insert(Options::ENABLE_TASKLISTS);
        let parser = Parser::new_ext(content, options);

        let mut nodes = Vec::new();
        let mut inline_stack: Vec<Vec<Inline>> = vec![Vec::new()];
        let mut link_stack: Vec<String> = Vec::new();

        // State
        let mut in_heading: Option<u8> = None;
        let mut in_paragraph = false;
        let mut in_code_block = false;
        let mut code_block_lang: Option<String> = None;
        let mut code_block_content = String::new();
        let mut in_list = false;
        let mut list_ordered = false;
        let mut list_items: Vec<Vec<Inline>> = Vec::new();
        let mut in_blockquote = false;
        let mut in_table = false;
        let mut in_table_head = false;
        let mut table_headers: Vec<Vec<Inline>> = Vec::new();
        let mut table_rows: Vec<Vec<Vec<Inline>>> = Vec::new();
        let mut current_row: Vec<Vec<Inline>> = Vec::new();

        for event in parser {
            match event {
                // Block elements
                Event::Start(Tag::Heading { level, .. }) => {
                    in_heading = Some(match level {
                        HeadingLevel::H1 => 1,
                        HeadingLevel::H2 => 2,
                        HeadingLevel::H3 => 3,
                        HeadingLevel::H4 => 4,
                        HeadingLevel::H5 => 5,
                        HeadingLevel::H6 => 6,
                    });
                    inline_stack.push(Vec::new());
                }
                Event::End(TagEnd::Heading(_)) => {
                    if let Some(level) = in_heading.take() {
                        let children = inline_stack.pop().unwrap_or_default();
                        nodes.push(Node::Heading { level, children });
                    }
                }
                Event::Start(Tag::Paragraph) => {
                    in_paragraph = true;
                    inline_stack.push(Vec::new());
                }
                Event::End(TagEnd::Paragraph) => {
                    if in_paragraph {
                        let children = inline_stack.pop().unwrap_or_default();
                        if in_blockquote || in_list || in_table {
                            // Folded into the enclosing construct on its End.
                            if let Some(last) = inline_stack.last_mut() {
                                last.extend(children);
                            }
                        } else {
                            nodes.push(Node::Paragraph { children });
                        }
                        in_paragraph = false;
                    }
                }
                Event::Start(Tag::CodeBlock(kind)) => {
                    in_code_block = true;
                    code_block_lang = match kind {
                        CodeBlockKind::Fenced(lang) if !lang.is_empty() => Some(lang.to_string()),
                        _ => None,
                    };
                    code_block_content.clear();
                }
                Event::End(TagEnd::CodeBlock) => {
                    nodes.push(Node::CodeBlock {
                        language: code_block_lang.take(),
                        code: std::mem::take(&mut code_block_content),
                        lines: Vec::new(),
                    });
                    in_code_block = false;
                }
                Event::Start(Tag::List(first_item)) => {
                    in_list = true;
                    list_ordered = first_item.is_some();
                    list_items.clear();
                }
                Event::End(TagEnd::List(_)) => {
                    nodes.push(Node::List {
                        ordered: list_ordered,
                        items: std::mem::take(&mut list_items),
                    });
                    in_list = false;
                }
                Event::Start(Tag::Item) => {
                    inline_stack.push(Vec::new());
                }
                Event::End(TagEnd::Item) => {
                    let children = inline_stack.pop().unwrap_or_default();
                    list_items.push(children);
                }
                Event::Start(Tag::BlockQuote(_)) => {
                    in_blockquote = true;
                    inline_stack.push(Vec::new());
                }
                Event::End(TagEnd::BlockQuote(_)) => {
                    let children = inline_stack.pop().unwrap_or_default();
                    nodes.push(Node::Blockquote { children });
                    in_blockquote = false;
                }
                Event::Rule => {
                    nodes.push(Node::HorizontalRule);
                }

                // Table elements
                Event::Start(Tag::Table(_)) => {
                    in_table = true;
                    table_headers.clear();
                    table_rows.clear();
                }
                Event::End(TagEnd::Table) => {
                    nodes.push(Node::Table {
                        headers: std::mem::take(&mut table_headers),
                        rows: std::mem::take(&mut table_rows),
                    });
                    in_table = false;
                }
                Event::Start(Tag::TableHead) => {
                    in_table_head = true;
                    current_row.clear();
                }
                Event::End(TagEnd::TableHead) => {
                    table_headers = std::mem::take(&mut current_row);
                    in_table_head = false;
                }
                Event::Start(Tag::TableRow) => {
                    current_row.clear();
                }
                Event::End(TagEnd::TableRow) => {
                    if !in_table_head {
                        table_rows.push(std::mem::take(&mut current_row));
                    }
                }
                Event::Start(Tag::TableCell) => {
                    inline_stack.push(Vec::new());
                }
                Event::End(TagEnd::TableCell) => {
                    let children = inline_stack.pop().unwrap_or_default();
                    current_row.push(children);
                }

                // Inline elements
                Event::Start(Tag::Strong) => {
                    inline_stack.push(Vec::new());
                }
                Event::End(TagEnd::Strong) => {
                    let children = inline_stack.pop().unwrap_or_default();
                    if let Some(last) = inline_stack.last_mut() {
                        last.push(Inline::Bold(children));
                    }
                }
                Event::Start(Tag::Emphasis) => {
                    inline_stack.push(Vec::new());
                }
                Event::End(TagEnd::Emphasis) => {
                    let children = inline_stack.pop().unwrap_or_default();
                    if let Some(last) = inline_stack.last_mut() {
                        last.push(Inline::Italic(children));
                    }
                }
                Event::Start(Tag::Strikethrough) => {
                    inline_stack.push(Vec::new());
                }
                Event::End(TagEnd::Strikethrough) => {
                    let children = inline_stack.pop().unwrap_or_default();
                    if let Some(last) = inline_stack.last_mut() {
                        last.push(Inline::Strikethrough(children));
                    }
                }
                Event::Start(Tag::Link { dest_url, .. }) => {
                    inline_stack.push(Vec::new());
                    link_stack.push(resolve(&dest_url, UrlKind::Link, ctx));
                }
                Event::End(TagEnd::Link) => {
                    let children = inline_stack.pop().unwrap_or_default();
                    let url = link_stack.pop().unwrap_or_default();
                    if let Some(last) = inline_stack.last_mut() {
                        last.push(Inline::Link { url, children });
                    }
                }
                Event::Start(Tag::Image { dest_url, .. }) => {
                    // Text until the matching End is the alt text.
                    inline_stack.push(Vec::new());
                    link_stack.push(resolve(&dest_url, UrlKind::Image, ctx));
                }
                Event::End(TagEnd::Image) => {
                    let children = inline_stack.pop().unwrap_or_default();
                    let src = link_stack.pop().unwrap_or_default();
                    let mut alt = String::new();
                    Self::inlines_to_flat_text(&children, &mut alt);
                    if let Some(last) = inline_stack.last_mut() {
                        last.push(Inline::Image { src, alt });
                    }
                }
                Event::TaskListMarker(checked) => {
                    if let Some(last) = inline_stack.last_mut() {
                        last.push(Inline::Text(if checked {
                            "[x] ".to_string()
                        } else {
                            "[ ] ".to_string()
                        }));
                    }
                }
                Event::Code(text) => {
                    if in_code_block {
                        code_block_content.push_str(&text);
                    } else if let Some(last) = inline_stack.last_mut() {
                        last.push(Inline::Code(text.to_string()));
                    }
                }
                Event::Text(text) => {
                    if in_code_block {
                        code_block_content.push_str(&text);
                    } else if let Some(last) = inline_stack.last_mut() {
                        last.push(Inline::Text(text.to_string()));
                    }
                }
                Event::SoftBreak | Event::HardBreak => {
                    if in_code_block {
                        code_block_content.push('\n');
                    } else if let Some(last) = inline_stack.last_mut() {
                        last.push(Inline::Text(" ".to_string()));
                    }
                }
                _ => {}
            }
        }

        // Build flat text representation
        let mut plain_text = String::new();
        for node in &nodes {
            Self::node_to_flat_text(node, &mut plain_text);
        }

        Self { nodes, plain_text }
    }
}
