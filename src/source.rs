//! Fetch boundary between the engine and the hosting provider.
//!
//! The engine only ever needs three reads: one level of contents, a
//! recursive tree, and the branch list. Keeping them behind a trait lets
//! tests drive the explorer and viewer with canned responses and keeps the
//! HTTP client an external collaborator.

use repolens_github::{ApiError, Branch, ContentsResponse, GithubClient, TreeResponse};

#[allow(async_fn_in_trait)]
pub trait ContentSource {
    async fn get_contents(
        &self,
        owner: &str,
        repo: &str,
        path: &str,
        git_ref: Option<&str>,
    ) -> Result<ContentsResponse, ApiError>;

    async fn get_tree(
        &self,
        owner: &str,
        repo: &str,
        git_ref: &str,
        recursive: bool,
    ) -> Result<TreeResponse, ApiError>;

    async fn get_branches(&self, owner: &str, repo: &str) -> Result<Vec<Branch>, ApiError>;
}

impl ContentSource for GithubClient {
    async fn get_contents(
        &self,
        owner: &str,
        repo: &str,
        path: &str,
        git_ref: Option<&str>,
    ) -> Result<ContentsResponse, ApiError> {
        GithubClient::get_contents(self, owner, repo, path, git_ref).await
    }

    async fn get_tree(
        &self,
        owner: &str,
        repo: &str,
        git_ref: &str,
        recursive: bool,
    ) -> Result<TreeResponse, ApiError> {
        GithubClient::get_tree(self, owner, repo, git_ref, recursive).await
    }

    async fn get_branches(&self, owner: &str, repo: &str) -> Result<Vec<Branch>, ApiError> {
        GithubClient::get_branches(self, owner, repo).await
    }
}
