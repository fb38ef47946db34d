//! repolens — a repository browsing engine for GitHub-hosted code.
//!
//! The engine turns the provider's read-only REST surface into state a UI
//! can render directly: sorted and filtered directory listings annotated
//! with aggregated folder sizes, decoded file content classified into
//! markdown / image / highlighted-source render modes, resolved markdown
//! links and images, branch context, and text-selection spans for the
//! explanation affordance. It owns no UI and persists nothing except the
//! settings file.

pub mod explorer;
pub mod format;
pub mod markdown;
pub mod resolver;
pub mod settings;
pub mod source;
pub mod syntax;
pub mod theme;
pub mod tree;
pub mod viewer;

pub use repolens_github as github;

pub use explorer::{Breadcrumb, DirectoryEntry, EntryKind, Explorer, NavOutcome, RepoRef};
pub use resolver::{resolve, LinkContext, UrlKind};
pub use settings::AppSettings;
pub use source::ContentSource;
pub use tree::FolderSizeIndex;
pub use viewer::{FileView, RenderKind, SelectionSpan, SelectionTracker, ViewError};
