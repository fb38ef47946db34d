//! File content resolution and render-mode classification.
//!
//! Given a selected entry, fetches its content, decodes the base64 body and
//! classifies it into one of three render modes: markdown (parsed document
//! with repository-aware links), image (rendered from the raw download URL,
//! no decode), or highlighted source. Content is resolved fresh on every
//! selection and dropped when the view closes; nothing is cached here.

mod selection;

pub use selection::{AnchorPoint, RawSelection, SelectionSpan, SelectionTracker};

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use thiserror::Error;

use crate::explorer::RepoRef;
use crate::markdown::MarkdownDocument;
use crate::resolver::LinkContext;
use crate::source::ContentSource;
use crate::syntax::{highlight_content, HighlightedLine};
use crate::theme::SyntaxTheme;
use repolens_github::{ApiError, ContentEntry, ContentsResponse};

/// Hard cap on highlighted lines for whole-file source view.
const MAX_LINES: usize = 10000;

/// How a file will be rendered, decided purely by extension.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RenderKind {
    Markdown,
    Image,
    Source,
}

impl RenderKind {
    /// Classify a path. Unrecognized extensions (and none at all) fall
    /// through to plain source rendering; this never fails.
    pub fn classify(path: &str) -> Self {
        let name = path.rsplit('/').next().unwrap_or(path);
        let ext = name
            .rsplit_once('.')
            .map(|(_, e)| e.to_ascii_lowercase())
            .unwrap_or_default();
        match ext.as_str() {
            "md" | "markdown" => Self::Markdown,
            "png" | "jpg" | "jpeg" | "gif" | "svg" => Self::Image,
            _ => Self::Source,
        }
    }
}

#[derive(Debug, Error)]
pub enum ViewError {
    /// File view was invoked on a path that is a directory. This is a
    /// caller bug, not a provider failure.
    #[error("path is a directory: {0}")]
    DirectoryMismatch(String),
    #[error("could not decode file content: {0}")]
    Decode(String),
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// A resolved file ready for display.
#[derive(Clone, Debug)]
pub enum FileView {
    Markdown {
        name: String,
        path: String,
        document: MarkdownDocument,
    },
    /// Rendered straight from the raw-content URL; the base64 body is
    /// never decoded for images.
    Image {
        name: String,
        download_url: Option<String>,
    },
    Source {
        name: String,
        path: String,
        raw: String,
        lines: Vec<HighlightedLine>,
        truncated: bool,
    },
    /// The provider omitted the body because the blob is over its inline
    /// content limit. Shown as a placeholder, not an error.
    TooLarge {
        name: String,
        size: u64,
        download_url: Option<String>,
    },
}

impl FileView {
    pub fn name(&self) -> &str {
        match self {
            Self::Markdown { name, .. }
            | Self::Image { name, .. }
            | Self::Source { name, .. }
            | Self::TooLarge { name, .. } => name,
        }
    }
}

/// Fetch and resolve a single file for viewing.
pub async fn load_file<S: ContentSource>(
    source: &S,
    repo: &RepoRef,
    path: &str,
    theme: SyntaxTheme,
) -> Result<FileView, ViewError> {
    let response = source
        .get_contents(&repo.owner, &repo.name, path, Some(&repo.branch))
        .await?;
    resolve_file(response, repo, path, theme)
}

/// Classify and decode an already-fetched contents response.
pub fn resolve_file(
    response: ContentsResponse,
    repo: &RepoRef,
    path: &str,
    theme: SyntaxTheme,
) -> Result<FileView, ViewError> {
    let entry = match response {
        ContentsResponse::Listing(_) => {
            return Err(ViewError::DirectoryMismatch(path.to_string()));
        }
        ContentsResponse::File(entry) => entry,
    };

    match RenderKind::classify(&entry.path) {
        RenderKind::Image => Ok(FileView::Image {
            name: entry.name,
            download_url: entry.download_url,
        }),
        RenderKind::Markdown => {
            let Some(text) = decoded_text(&entry)? else {
                return Ok(too_large(entry));
            };
            let ctx = LinkContext::new(&repo.owner, &repo.name, &repo.branch, &entry.path);
            let mut document = MarkdownDocument::parse(&text, &ctx);
            document.highlight_code_blocks(theme);
            Ok(FileView::Markdown {
                name: entry.name,
                path: entry.path,
                document,
            })
        }
        RenderKind::Source => {
            let Some(text) = decoded_text(&entry)? else {
                return Ok(too_large(entry));
            };
            let lines = highlight_content(&text, &entry.path, theme, MAX_LINES);
            let truncated = text.lines().count() > lines.len();
            Ok(FileView::Source {
                name: entry.name,
                path: entry.path,
                raw: text,
                lines,
                truncated,
            })
        }
    }
}

fn too_large(entry: ContentEntry) -> FileView {
    FileView::TooLarge {
        name: entry.name,
        size: entry.size,
        download_url: entry.download_url,
    }
}

/// Decode the base64 body to text. `None` means the provider omitted the
/// body (size-limited blob). The encoded form carries embedded newlines,
/// so ASCII whitespace is stripped before decoding; non-UTF-8 bytes are
/// replaced rather than rejected.
fn decoded_text(entry: &ContentEntry) -> Result<Option<String>, ViewError> {
    let Some(encoded) = entry.content.as_deref() else {
        return Ok(None);
    };
    let cleaned: String = encoded.chars().filter(|c| !c.is_ascii_whitespace()).collect();
    let bytes = STANDARD
        .decode(cleaned)
        .map_err(|e| ViewError::Decode(e.to_string()))?;
    Ok(Some(String::from_utf8_lossy(&bytes).into_owned()))
}
