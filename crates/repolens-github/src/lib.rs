//! Wire types and client for the GitHub REST v3 API.
//!
//! `types` mirrors the JSON shapes the API returns and always compiles.
//! The reqwest-backed async client lives behind the `client` feature so
//! consumers that only need the types stay free of networking deps.

pub mod error;
pub mod types;

#[cfg(feature = "client")]
pub mod client;

pub use error::ApiError;
pub use types::{
    Branch, BranchCommit, Commit, ContentEntry, ContentKind, ContentsResponse, Contributor, Issue, IssueState,
    Label, License, PullRequest, RepoSearchResults, Repository, TreeItem, TreeItemKind,
    TreeResponse, UserProfile,
};

#[cfg(feature = "client")]
pub use client::GithubClient;
