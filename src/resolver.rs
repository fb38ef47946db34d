//! Link and image URL resolution for rendered markdown.
//!
//! Relative references in a README only make sense against the repository,
//! branch and file they were written in. This module rewrites them so they
//! work from inside the app: images point at the raw-content host, links at
//! the in-app viewer route. Resolution never fails — anything that cannot
//! be resolved passes through unchanged.

use regex::Regex;
use std::sync::OnceLock;
use url::Url;

/// What the resolved URL will be used for. Images need raw bytes; links
/// need to keep navigation inside the app.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UrlKind {
    Image,
    Link,
}

/// Repository/branch/file context a markdown document is rendered in.
/// All fields optional: a readme rendered outside a full navigation context
/// still resolves absolute URLs correctly and passes relative ones through.
#[derive(Clone, Debug, Default)]
pub struct LinkContext {
    pub owner: Option<String>,
    pub repo: Option<String>,
    pub branch: Option<String>,
    /// Root-relative path of the file being rendered ("" for none).
    pub file_path: String,
}

impl LinkContext {
    pub fn new(owner: &str, repo: &str, branch: &str, file_path: &str) -> Self {
        Self {
            owner: Some(owner.to_string()),
            repo: Some(repo.to_string()),
            branch: Some(branch.to_string()),
            file_path: file_path.to_string(),
        }
    }
}

/// `https://github.com/<owner>/<repo>/blob/<branch>/<path>` — the web UI
/// page for a file, which serves HTML, not bytes.
fn blob_url_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^https?://github\.com/([^/]+)/([^/]+)/blob/([^/]+)/(.+)$")
            .expect("blob URL pattern is valid")
    })
}

/// Resolve a URI found in markdown. First matching rule wins:
/// absolute blob-view image URLs are rewritten to the raw host, other
/// absolute URLs and non-navigable schemes pass through, protocol-relative
/// URLs get `https:`, and relative paths resolve against the directory of
/// the current file (when the context is complete).
pub fn resolve(uri: &str, kind: UrlKind, ctx: &LinkContext) -> String {
    if uri.is_empty() {
        return String::new();
    }

    if uri.starts_with("http://") || uri.starts_with("https://") {
        if kind == UrlKind::Image {
            if let Some(caps) = blob_url_pattern().captures(uri) {
                return format!(
                    "https://raw.githubusercontent.com/{}/{}/{}/{}",
                    &caps[1], &caps[2], &caps[3], &caps[4]
                );
            }
        }
        return uri.to_string();
    }

    if uri.starts_with("data:")
        || uri.starts_with("mailto:")
        || uri.starts_with("tel:")
        || uri.starts_with('#')
    {
        return uri.to_string();
    }

    if uri.starts_with("//") {
        return format!("https:{uri}");
    }

    let (Some(owner), Some(repo), Some(branch)) = (
        ctx.owner.as_deref(),
        ctx.repo.as_deref(),
        ctx.branch.as_deref(),
    ) else {
        // Best effort without full context.
        return uri.to_string();
    };

    let dir = match ctx.file_path.rfind('/') {
        Some(idx) => &ctx.file_path[..=idx],
        None => "",
    };
    let Some(resolved_path) = resolve_relative(uri, dir) else {
        return uri.to_string();
    };

    match kind {
        UrlKind::Image => format!(
            "https://raw.githubusercontent.com/{owner}/{repo}/{branch}/{resolved_path}"
        ),
        UrlKind::Link => format!("#/repo/{owner}/{repo}/blob/{branch}/{resolved_path}"),
    }
}

/// Standard relative-reference resolution (`.`/`..` collapse) against a
/// dummy origin; returns the root-relative result path.
fn resolve_relative(uri: &str, dir: &str) -> Option<String> {
    let base = Url::parse("https://resolve.invalid/").ok()?.join(dir).ok()?;
    let joined = base.join(uri).ok()?;
    Some(joined.path().trim_start_matches('/').to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx() -> LinkContext {
        LinkContext::new("o", "r", "main", "docs/guide.md")
    }

    #[test]
    fn absolute_urls_pass_through() {
        let uri = "https://example.com/x.png";
        assert_eq!(resolve(uri, UrlKind::Image, &ctx()), uri);
        assert_eq!(resolve(uri, UrlKind::Link, &ctx()), uri);
        assert_eq!(resolve(uri, UrlKind::Image, &LinkContext::default()), uri);
    }

    #[test]
    fn blob_view_image_rewrites_to_raw() {
        assert_eq!(
            resolve(
                "https://github.com/o/r/blob/main/img.png",
                UrlKind::Image,
                &ctx()
            ),
            "https://raw.githubusercontent.com/o/r/main/img.png"
        );
    }

    #[test]
    fn blob_view_link_is_not_rewritten() {
        let uri = "https://github.com/o/r/blob/main/README.md";
        assert_eq!(resolve(uri, UrlKind::Link, &ctx()), uri);
    }

    #[test]
    fn opaque_schemes_and_fragments_pass_through() {
        for uri in ["data:image/png;base64,AAAA", "mailto:a@b.c", "tel:+123", "#section"] {
            assert_eq!(resolve(uri, UrlKind::Link, &ctx()), uri);
        }
    }

    #[test]
    fn protocol_relative_gets_https() {
        assert_eq!(
            resolve("//cdn.example.com/a.png", UrlKind::Image, &ctx()),
            "https://cdn.example.com/a.png"
        );
    }

    #[test]
    fn relative_image_resolves_against_file_directory() {
        assert_eq!(
            resolve("../assets/pic.png", UrlKind::Image, &ctx()),
            "https://raw.githubusercontent.com/o/r/main/assets/pic.png"
        );
        assert_eq!(
            resolve("img/shot.png", UrlKind::Image, &ctx()),
            "https://raw.githubusercontent.com/o/r/main/docs/img/shot.png"
        );
    }

    #[test]
    fn relative_link_routes_into_the_app() {
        assert_eq!(
            resolve("../CONTRIBUTING.md", UrlKind::Link, &ctx()),
            "#/repo/o/r/blob/main/CONTRIBUTING.md"
        );
    }

    #[test]
    fn root_file_resolves_from_repository_root() {
        let ctx = LinkContext::new("o", "r", "main", "README.md");
        assert_eq!(
            resolve("docs/intro.md", UrlKind::Link, &ctx),
            "#/repo/o/r/blob/main/docs/intro.md"
        );
    }

    #[test]
    fn missing_context_passes_relative_through() {
        let ctx = LinkContext {
            owner: Some("o".into()),
            ..Default::default()
        };
        assert_eq!(resolve("img/x.png", UrlKind::Image, &ctx), "img/x.png");
    }

    #[test]
    fn empty_uri_stays_empty() {
        assert_eq!(resolve("", UrlKind::Image, &ctx()), "");
    }
}
