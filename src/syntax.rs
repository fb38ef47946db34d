//! Syntax highlighting pipeline.
//!
//! Wraps syntect with the two-face extended syntax set and embedded themes.
//! Output is renderer-agnostic: colored spans grouped per line, with the
//! plain text kept alongside for selection and copy. Unknown languages fall
//! back to plain text; highlighting never errors.

use crate::theme::SyntaxTheme;
use std::sync::OnceLock;
use syntect::easy::HighlightLines;
use syntect::highlighting::Theme;
use syntect::parsing::{SyntaxReference, SyntaxSet};
use syntect::util::LinesWithEndings;
use two_face::theme::EmbeddedLazyThemeSet;

/// Cached syntax set with extended syntaxes (TypeScript, TOML, Dockerfile…).
static SYNTAX_SET: OnceLock<SyntaxSet> = OnceLock::new();

/// Cached embedded theme set; individual themes are borrowed from it.
static THEME_SET: OnceLock<EmbeddedLazyThemeSet> = OnceLock::new();

pub fn load_syntax_set() -> &'static SyntaxSet {
    SYNTAX_SET.get_or_init(two_face::syntax::extra_newlines)
}

/// Resolve the configured syntax theme to the embedded syntect theme.
pub fn load_theme(setting: SyntaxTheme) -> &'static Theme {
    let themes = THEME_SET.get_or_init(two_face::theme::extra);
    themes.get(setting.embedded_name())
}

/// sRGB color with alpha, as stored in syntect themes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

/// Fallback foreground when a line fails to highlight.
pub const DEFAULT_TEXT_COLOR: Color = Color {
    r: 204,
    g: 204,
    b: 204,
    a: 255,
};

/// A run of same-colored text ready for display.
#[derive(Clone, Debug)]
pub struct HighlightedSpan {
    pub color: Color,
    pub text: String,
}

/// A highlighted line with its plain text (for selection/copy).
#[derive(Clone, Debug)]
pub struct HighlightedLine {
    pub spans: Vec<HighlightedSpan>,
    pub plain_text: String,
}

/// Map file extension to a syntax token where the plain extension lookup
/// would miss or pick a worse grammar.
pub fn map_extension_to_syntax(ext: &str) -> Option<&'static str> {
    match ext.to_lowercase().as_str() {
        "ts" | "mts" | "cts" => Some("ts"),
        "tsx" | "jsx" => Some("tsx"),
        "mjs" | "cjs" => Some("js"),
        "vue" | "svelte" => Some("html"),
        "yml" | "yaml" => Some("yaml"),
        "json" | "jsonc" | "json5" => Some("json"),
        "toml" => Some("toml"),
        "ini" | "cfg" | "conf" => Some("ini"),
        "sh" | "bash" | "zsh" | "fish" => Some("sh"),
        "html" | "htm" | "xhtml" => Some("html"),
        "css" | "scss" | "sass" | "less" => Some("css"),
        "xml" | "xsl" | "xslt" => Some("xml"),
        "py" | "pyw" | "pyi" => Some("py"),
        "rb" | "erb" | "rake" => Some("rb"),
        "rs" => Some("rs"),
        "go" => Some("go"),
        "c" | "h" => Some("c"),
        "cpp" | "cc" | "cxx" | "hpp" | "hxx" | "hh" => Some("cpp"),
        "java" => Some("java"),
        "kt" | "kts" => Some("kt"),
        "swift" => Some("swift"),
        "cs" => Some("cs"),
        "php" => Some("php"),
        "lua" => Some("lua"),
        "sql" => Some("sql"),
        "md" | "markdown" => Some("md"),
        "diff" | "patch" => Some("diff"),
        "dockerfile" => Some("dockerfile"),
        _ => None,
    }
}

/// Pick a grammar for a repository path. Tries the mapped extension, then
/// the raw extension, then well-known filenames, then plain text.
pub fn syntax_for_path<'a>(path: &str, syntax_set: &'a SyntaxSet) -> &'a SyntaxReference {
    let name = path.rsplit('/').next().unwrap_or(path);
    let ext = name.rsplit_once('.').map(|(_, e)| e);

    ext.and_then(map_extension_to_syntax)
        .and_then(|mapped| syntax_set.find_syntax_by_extension(mapped))
        .or_else(|| ext.and_then(|e| syntax_set.find_syntax_by_extension(e)))
        .or_else(|| match name.to_lowercase().as_str() {
            "makefile" | "gnumakefile" => syntax_set.find_syntax_by_extension("makefile"),
            "dockerfile" => syntax_set.find_syntax_by_extension("dockerfile"),
            "cargo.lock" => syntax_set.find_syntax_by_extension("toml"),
            ".gitignore" | ".dockerignore" | ".npmignore" => {
                syntax_set.find_syntax_by_name("Git Ignore")
            }
            ".bashrc" | ".zshrc" | ".profile" | ".env" => {
                syntax_set.find_syntax_by_extension("sh")
            }
            _ => None,
        })
        .unwrap_or_else(|| syntax_set.find_syntax_plain_text())
}

/// Pick a grammar for a fenced code block's language token.
pub fn syntax_for_token<'a>(token: Option<&str>, syntax_set: &'a SyntaxSet) -> &'a SyntaxReference {
    token
        .and_then(|t| {
            syntax_set
                .find_syntax_by_token(t)
                .or_else(|| map_extension_to_syntax(t).and_then(|m| syntax_set.find_syntax_by_extension(m)))
        })
        .unwrap_or_else(|| syntax_set.find_syntax_plain_text())
}

/// Highlight whole-file content. `max_lines` of 0 means unlimited.
pub fn highlight_content(
    content: &str,
    path: &str,
    theme_setting: SyntaxTheme,
    max_lines: usize,
) -> Vec<HighlightedLine> {
    let syntax_set = load_syntax_set();
    let syntax = syntax_for_path(path, syntax_set);
    highlight_with(content, syntax, syntax_set, load_theme(theme_setting), max_lines)
}

/// Highlight a fenced code block by its language token.
pub fn highlight_snippet(
    code: &str,
    language: Option<&str>,
    theme_setting: SyntaxTheme,
) -> Vec<HighlightedLine> {
    let syntax_set = load_syntax_set();
    let syntax = syntax_for_token(language, syntax_set);
    highlight_with(code, syntax, syntax_set, load_theme(theme_setting), 0)
}

fn highlight_with(
    content: &str,
    syntax: &SyntaxReference,
    syntax_set: &SyntaxSet,
    theme: &Theme,
    max_lines: usize,
) -> Vec<HighlightedLine> {
    let mut highlighter = HighlightLines::new(syntax, theme);
    let mut lines = Vec::new();

    for line in LinesWithEndings::from(content) {
        if max_lines > 0 && lines.len() >= max_lines {
            break;
        }
        lines.push(highlight_line(line, &mut highlighter, syntax_set));
    }

    lines
}

fn highlight_line(
    line: &str,
    highlighter: &mut HighlightLines,
    syntax_set: &SyntaxSet,
) -> HighlightedLine {
    match highlighter.highlight_line(line, syntax_set) {
        Ok(regions) => {
            let mut spans: Vec<HighlightedSpan> = Vec::new();
            let mut plain = String::new();

            for (style, text) in regions {
                let color = Color {
                    r: style.foreground.r,
                    g: style.foreground.g,
                    b: style.foreground.b,
                    a: style.foreground.a,
                };
                let processed = clean_fragment(text);
                if processed.is_empty() {
                    continue;
                }
                plain.push_str(&processed);

                // Merge adjacent same-color runs.
                if let Some(last) = spans.last_mut() {
                    if last.color == color {
                        last.text.push_str(&processed);
                        continue;
                    }
                }
                spans.push(HighlightedSpan {
                    color,
                    text: processed,
                });
            }

            HighlightedLine {
                spans,
                plain_text: plain,
            }
        }
        Err(_) => {
            let text = clean_fragment(line);
            HighlightedLine {
                spans: vec![HighlightedSpan {
                    color: DEFAULT_TEXT_COLOR,
                    text: text.clone(),
                }],
                plain_text: text,
            }
        }
    }
}

fn clean_fragment(text: &str) -> String {
    text.trim_end_matches(['\n', '\r']).replace('\t', "    ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rust_source_highlights_without_error() {
        let lines = highlight_content("fn main() {}\n", "src/main.rs", SyntaxTheme::Dracula, 0);
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].plain_text, "fn main() {}");
        assert!(!lines[0].spans.is_empty());
    }

    #[test]
    fn unknown_extension_falls_back_to_plain_text() {
        let lines = highlight_content("hello\nworld\n", "data.xyzzy", SyntaxTheme::Github, 0);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1].plain_text, "world");
    }

    #[test]
    fn special_filenames_get_a_grammar() {
        let set = load_syntax_set();
        assert_ne!(syntax_for_path("Makefile", set).name, "Plain Text");
        assert_ne!(syntax_for_path("deep/path/Dockerfile", set).name, "Plain Text");
    }

    #[test]
    fn snippet_token_fallback_never_panics() {
        let lines = highlight_snippet("x = 1\n", Some("no-such-lang"), SyntaxTheme::Nord);
        assert_eq!(lines[0].plain_text, "x = 1");
        let lines = highlight_snippet("x = 1\n", None, SyntaxTheme::Nord);
        assert_eq!(lines[0].plain_text, "x = 1");
    }

    #[test]
    fn max_lines_truncates() {
        let content = "a\nb\nc\nd\n";
        let lines = highlight_content(content, "f.txt", SyntaxTheme::Dracula, 2);
        assert_eq!(lines.len(), 2);
    }

    #[test]
    fn tabs_expand_in_plain_text() {
        let lines = highlight_content("\tindented\n", "f.txt", SyntaxTheme::Dracula, 0);
        assert_eq!(lines[0].plain_text, "    indented");
    }
}
