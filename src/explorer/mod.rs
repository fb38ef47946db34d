//! Directory listing controller.
//!
//! Owns the navigation state for one repository/branch: the current path,
//! the last good listing (sorted dirs-first), the live name filter, and the
//! folder-size index derived from a recursive tree fetch. Fetches happen
//! through [`ContentSource`]; every navigation gets a ticket and a result is
//! applied only while its ticket is still current, so a slow response for an
//! abandoned path can never overwrite a newer listing.

pub mod branches;

use crate::format::format_size;
use crate::source::ContentSource;
use crate::tree::FolderSizeIndex;
use repolens_github::{ApiError, ContentEntry, ContentKind, ContentsResponse};

/// Identifies the repository/ref context a navigation runs in.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RepoRef {
    pub owner: String,
    pub name: String,
    pub branch: String,
}

impl RepoRef {
    pub fn new(owner: &str, name: &str, branch: &str) -> Self {
        Self {
            owner: owner.to_string(),
            name: name.to_string(),
            branch: branch.to_string(),
        }
    }
}

/// Listing row kind. The contents API also reports symlinks and submodules;
/// for ordering and display they behave like files.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum EntryKind {
    Dir,
    File,
}

/// One row of a directory listing.
#[derive(Clone, Debug)]
pub struct DirectoryEntry {
    pub name: String,
    pub path: String,
    pub kind: EntryKind,
    pub size: u64,
    /// Identity key for list rendering.
    pub sha: String,
    pub download_url: Option<String>,
}

impl From<ContentEntry> for DirectoryEntry {
    fn from(entry: ContentEntry) -> Self {
        let kind = match entry.kind {
            ContentKind::Dir => EntryKind::Dir,
            _ => EntryKind::File,
        };
        Self {
            name: entry.name,
            path: entry.path,
            kind,
            size: entry.size,
            sha: entry.sha,
            download_url: entry.download_url,
        }
    }
}

/// Listing display state. An empty `Ready` listing is a valid success
/// ("this directory is empty"), kept distinct from `Failed`.
#[derive(Clone, Debug)]
pub enum ListingState {
    Loading,
    Ready(Vec<DirectoryEntry>),
    Failed(String),
}

/// Handle for one navigation; results are applied only while it is current.
#[derive(Clone, Debug)]
pub struct NavTicket {
    seq: u64,
    path: String,
}

/// Handle for one folder-size aggregation run.
#[derive(Clone, Copy, Debug)]
pub struct SizeTicket {
    seq: u64,
}

/// What applying a navigation result did.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NavOutcome {
    /// Listing applied and displayed.
    Listed,
    /// The path turned out to be a file; redirect to the viewer for this
    /// exact path, replacing the current navigation entry.
    FileRedirect(String),
    /// Fetch failed; a retryable error state is now displayed.
    Failed,
    /// A newer navigation superseded this one; the result was discarded.
    Stale,
}

/// Size annotation for a listing row.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SizeLabel {
    Bytes(u64),
    /// Directory with no aggregated size available.
    Unknown,
}

impl SizeLabel {
    pub fn display(self) -> String {
        match self {
            SizeLabel::Bytes(bytes) => format_size(bytes),
            SizeLabel::Unknown => "Folder".to_string(),
        }
    }
}

/// Breadcrumb segment of the current path.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Breadcrumb {
    pub name: String,
    pub path: String,
}

pub struct Explorer {
    repo: RepoRef,
    path: String,
    state: ListingState,
    filter: String,
    sizes: FolderSizeIndex,
    nav_seq: u64,
    size_seq: u64,
}

impl Explorer {
    pub fn new(repo: RepoRef) -> Self {
        Self {
            repo,
            path: String::new(),
            state: ListingState::Loading,
            filter: String::new(),
            sizes: FolderSizeIndex::default(),
            nav_seq: 0,
            size_seq: 0,
        }
    }

    pub fn repo(&self) -> &RepoRef {
        &self.repo
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn state(&self) -> &ListingState {
        &self.state
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, ListingState::Loading)
    }

    pub fn error(&self) -> Option<&str> {
        match &self.state {
            ListingState::Failed(message) => Some(message),
            _ => None,
        }
    }

    // ── Navigation ──────────────────────────────────────────────────────

    /// Start navigating to `path`. Marks the listing as loading, resets the
    /// name filter, and invalidates any still-inflight navigation.
    pub fn begin_navigation(&mut self, path: &str) -> NavTicket {
        self.nav_seq += 1;
        self.state = ListingState::Loading;
        self.filter.clear();
        NavTicket {
            seq: self.nav_seq,
            path: path.to_string(),
        }
    }

    /// Apply a fetch result for a prior [`begin_navigation`]. Last
    /// navigation wins: stale tickets are discarded without touching state.
    pub fn complete_navigation(
        &mut self,
        ticket: NavTicket,
        result: Result<ContentsResponse, ApiError>,
    ) -> NavOutcome {
        if ticket.seq != self.nav_seq {
            log::debug!("discarding stale listing for {:?}", ticket.path);
            return NavOutcome::Stale;
        }
        match result {
            Ok(ContentsResponse::Listing(entries)) => {
                let mut entries: Vec<DirectoryEntry> =
                    entries.into_iter().map(DirectoryEntry::from).collect();
                sort_entries(&mut entries);
                self.path = ticket.path;
                self.state = ListingState::Ready(entries);
                NavOutcome::Listed
            }
            Ok(ContentsResponse::File(entry)) => {
                // Not an error: the caller redirects to the file viewer,
                // replacing the navigation entry to avoid a history double.
                NavOutcome::FileRedirect(entry.path)
            }
            Err(err) => {
                log::warn!("directory fetch for {:?} failed: {err}", ticket.path);
                self.state = ListingState::Failed("Could not fetch file contents.".to_string());
                NavOutcome::Failed
            }
        }
    }

    /// Fetch and apply one level of `path` in a single call.
    pub async fn load_directory<S: ContentSource>(
        &mut self,
        source: &S,
        path: &str,
    ) -> NavOutcome {
        let ticket = self.begin_navigation(path);
        let branch = self.repo.branch.clone();
        let result = source
            .get_contents(&self.repo.owner, &self.repo.name, path, Some(&branch))
            .await;
        self.complete_navigation(ticket, result)
    }

    // ── Folder sizes ────────────────────────────────────────────────────

    /// Start a folder-size aggregation for the current branch.
    pub fn begin_aggregation(&mut self) -> SizeTicket {
        self.size_seq += 1;
        SizeTicket { seq: self.size_seq }
    }

    /// Apply a recursive tree fetch. Failure is soft: the index stays empty
    /// and every directory renders as size-unknown - listings are never
    /// blocked on aggregation.
    pub fn complete_aggregation(
        &mut self,
        ticket: SizeTicket,
        result: Result<repolens_github::TreeResponse, ApiError>,
    ) {
        if ticket.seq != self.size_seq {
            log::debug!("discarding stale tree for {}", self.repo.branch);
            return;
        }
        match result {
            Ok(response) => {
                if response.truncated {
                    log::warn!(
                        "tree listing for {}/{}@{} truncated; folder sizes are partial",
                        self.repo.owner,
                        self.repo.name,
                        self.repo.branch
                    );
                }
                self.sizes = FolderSizeIndex::build(&response.tree);
            }
            Err(err) => {
                log::warn!(
                    "tree fetch for {}/{}@{} failed ({err}); folder sizes unavailable",
                    self.repo.owner,
                    self.repo.name,
                    self.repo.branch
                );
                self.sizes = FolderSizeIndex::default();
            }
        }
    }

    /// Fetch the recursive tree once per branch and build the size index.
    pub async fn load_folder_sizes<S: ContentSource>(&mut self, source: &S) {
        let ticket = self.begin_aggregation();
        let branch = self.repo.branch.clone();
        let result = source
            .get_tree(&self.repo.owner, &self.repo.name, &branch, true)
            .await;
        self.complete_aggregation(ticket, result);
    }

    pub fn folder_sizes(&self) -> &FolderSizeIndex {
        &self.sizes
    }

    /// Size annotation for a row: files use their own size, directories the
    /// aggregated index, unknown directories the neutral label.
    pub fn size_label(&self, entry: &DirectoryEntry) -> SizeLabel {
        match entry.kind {
            EntryKind::File => SizeLabel::Bytes(entry.size),
            EntryKind::Dir => match self.sizes.lookup(&entry.path) {
                Some(bytes) => SizeLabel::Bytes(bytes),
                None => SizeLabel::Unknown,
            },
        }
    }

    // ── View transforms ─────────────────────────────────────────────────

    /// Set the live name filter. A pure view transform; never refetches.
    pub fn set_filter(&mut self, filter: &str) {
        self.filter = filter.to_string();
    }

    pub fn filter(&self) -> &str {
        &self.filter
    }

    /// Entries matching the filter (case-insensitive substring), in the
    /// sorted order of the last successful load. Empty when not `Ready`.
    pub fn visible_entries(&self) -> Vec<&DirectoryEntry> {
        let ListingState::Ready(entries) = &self.state else {
            return Vec::new();
        };
        let needle = self.filter.to_lowercase();
        entries
            .iter()
            .filter(|e| needle.is_empty() || e.name.to_lowercase().contains(&needle))
            .collect()
    }

    /// Breadcrumb for each path segment; the i-th crumb links to the path
    /// of segments[0..=i].
    pub fn breadcrumbs(&self) -> Vec<Breadcrumb> {
        let segments: Vec<&str> = self.path.split('/').filter(|s| !s.is_empty()).collect();
        segments
            .iter()
            .enumerate()
            .map(|(i, name)| Breadcrumb {
                name: (*name).to_string(),
                path: segments[..=i].join("/"),
            })
            .collect()
    }

    /// Path of the parent directory, or `None` at the repository root.
    pub fn parent_path(&self) -> Option<String> {
        if self.path.is_empty() {
            return None;
        }
        Some(match self.path.rfind('/') {
            Some(idx) => self.path[..idx].to_string(),
            None => String::new(),
        })
    }

    // ── Branch context ──────────────────────────────────────────────────

    /// Switch the active branch. Resets the path to the branch root, clears
    /// the filter and listing, empties the size index, and invalidates any
    /// in-flight navigation or aggregation. No-op when the name is
    /// unchanged. Returns whether a switch happened.
    pub fn switch_branch(&mut self, branch: &str) -> bool {
        if branch == self.repo.branch {
            return false;
        }
        self.repo.branch = branch.to_string();
        self.path.clear();
        self.filter.clear();
        self.state = ListingState::Loading;
        self.sizes = FolderSizeIndex::default();
        self.nav_seq += 1;
        self.size_seq += 1;
        true
    }
}

/// Stable two-key sort: directories before files, then name. Name ordering
/// is case-insensitive with a raw-byte tiebreak, mirroring locale-style
/// collation closely enough for listing display.
fn sort_entries(entries: &mut [DirectoryEntry]) {
    entries.sort_by(|a, b| {
        a.kind
            .cmp(&b.kind)
            .then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
            .then_with(|| a.name.cmp(&b.name))
    });
}
