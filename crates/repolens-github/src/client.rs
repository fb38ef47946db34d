//! Async client for the GitHub REST v3 API.
//!
//! Thin wrapper over reqwest: one method per endpoint the browser reads,
//! shared status-to-error mapping, bearer auth from an optional token.

use crate::error::ApiError;
use crate::types::{
    Branch, Commit, ContentEntry, ContentsResponse, Contributor, Issue, Languages, License,
    PullRequest, RepoSearchResults, Repository, TreeResponse, UserProfile,
};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use std::time::Duration;

const DEFAULT_API_BASE: &str = "https://api.github.com";

/// Search and user-repo pages are 12 items; commit/issue/PR pages are 20.
/// Matches what the listing views lay out per page.
pub const CARD_PAGE_SIZE: u32 = 12;
pub const LIST_PAGE_SIZE: u32 = 20;

#[derive(Clone)]
pub struct GithubClient {
    http: reqwest::Client,
    base: String,
}

impl GithubClient {
    /// Build a client. `token` is an optional personal access token; without
    /// one the API still works, at the anonymous rate limit.
    pub fn new(token: Option<&str>) -> Result<Self, ApiError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/vnd.github.v3+json"),
        );
        if let Some(token) = token {
            match HeaderValue::from_str(&format!("Bearer {token}")) {
                Ok(mut value) => {
                    value.set_sensitive(true);
                    headers.insert(AUTHORIZATION, value);
                }
                Err(_) => log::warn!("ignoring malformed API token"),
            }
        }

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent(concat!("repolens/", env!("CARGO_PKG_VERSION")))
            .default_headers(headers)
            .build()?;

        Ok(Self {
            http,
            base: DEFAULT_API_BASE.to_string(),
        })
    }

    /// Point the client at a different API root. Used by tests and by
    /// GitHub Enterprise installs.
    pub fn with_base_url(mut self, base: impl Into<String>) -> Self {
        self.base = base.into();
        self
    }

    pub async fn search_repositories(
        &self,
        query: &str,
        sort: Option<&str>,
        order: &str,
        page: u32,
    ) -> Result<RepoSearchResults, ApiError> {
        let mut params = vec![
            ("q", query.to_string()),
            ("page", page.to_string()),
            ("per_page", CARD_PAGE_SIZE.to_string()),
        ];
        // The API defaults to best-match ranking when no sort is sent.
        if let Some(sort) = sort.filter(|s| *s != "best-match") {
            params.push(("sort", sort.to_string()));
            params.push(("order", order.to_string()));
        }
        self.get_json("/search/repositories", &params).await
    }

    pub async fn get_repository(&self, owner: &str, repo: &str) -> Result<Repository, ApiError> {
        self.get_json(&format!("/repos/{owner}/{repo}"), &[]).await
    }

    /// Fetch one level of `path`. The response is a listing for a directory
    /// and a single descriptor for a file; both decode into
    /// [`ContentsResponse`] and the caller branches on the variant.
    pub async fn get_contents(
        &self,
        owner: &str,
        repo: &str,
        path: &str,
        git_ref: Option<&str>,
    ) -> Result<ContentsResponse, ApiError> {
        let mut params = Vec::new();
        if let Some(git_ref) = git_ref {
            params.push(("ref", git_ref.to_string()));
        }
        self.get_json(&format!("/repos/{owner}/{repo}/contents/{path}"), &params)
            .await
    }

    /// Fetch a git tree. With `recursive` the whole branch comes back in one
    /// response (possibly `truncated` for very large repositories).
    pub async fn get_tree(
        &self,
        owner: &str,
        repo: &str,
        sha: &str,
        recursive: bool,
    ) -> Result<TreeResponse, ApiError> {
        let mut params = Vec::new();
        if recursive {
            params.push(("recursive", "1".to_string()));
        }
        self.get_json(&format!("/repos/{owner}/{repo}/git/trees/{sha}"), &params)
            .await
    }

    pub async fn get_readme(
        &self,
        owner: &str,
        repo: &str,
        git_ref: Option<&str>,
    ) -> Result<ContentEntry, ApiError> {
        let mut params = Vec::new();
        if let Some(git_ref) = git_ref {
            params.push(("ref", git_ref.to_string()));
        }
        self.get_json(&format!("/repos/{owner}/{repo}/readme"), &params)
            .await
    }

    pub async fn get_commits(
        &self,
        owner: &str,
        repo: &str,
        page: u32,
    ) -> Result<Vec<Commit>, ApiError> {
        self.get_json(
            &format!("/repos/{owner}/{repo}/commits"),
            &page_params(page, LIST_PAGE_SIZE),
        )
        .await
    }

    pub async fn get_languages(&self, owner: &str, repo: &str) -> Result<Languages, ApiError> {
        self.get_json(&format!("/repos/{owner}/{repo}/languages"), &[])
            .await
    }

    pub async fn get_license(&self, owner: &str, repo: &str) -> Result<License, ApiError> {
        self.get_json(&format!("/repos/{owner}/{repo}/license"), &[])
            .await
    }

    pub async fn get_contributors(
        &self,
        owner: &str,
        repo: &str,
    ) -> Result<Vec<Contributor>, ApiError> {
        self.get_json(&format!("/repos/{owner}/{repo}/contributors"), &[])
            .await
    }

    pub async fn get_issues(
        &self,
        owner: &str,
        repo: &str,
        page: u32,
    ) -> Result<Vec<Issue>, ApiError> {
        self.get_json(
            &format!("/repos/{owner}/{repo}/issues"),
            &page_params(page, LIST_PAGE_SIZE),
        )
        .await
    }

    pub async fn get_pull_requests(
        &self,
        owner: &str,
        repo: &str,
        page: u32,
    ) -> Result<Vec<PullRequest>, ApiError> {
        self.get_json(
            &format!("/repos/{owner}/{repo}/pulls"),
            &page_params(page, LIST_PAGE_SIZE),
        )
        .await
    }

    pub async fn get_branches(&self, owner: &str, repo: &str) -> Result<Vec<Branch>, ApiError> {
        self.get_json(&format!("/repos/{owner}/{repo}/branches"), &[])
            .await
    }

    pub async fn get_user(&self, username: &str) -> Result<UserProfile, ApiError> {
        self.get_json(&format!("/users/{username}"), &[]).await
    }

    pub async fn get_user_repos(
        &self,
        username: &str,
        page: u32,
    ) -> Result<Vec<Repository>, ApiError> {
        let mut params = page_params(page, CARD_PAGE_SIZE);
        params.push(("sort", "updated".to_string()));
        self.get_json(&format!("/users/{username}/repos"), &params)
            .await
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> Result<T, ApiError> {
        let url = format!("{}{}", self.base, path);
        let mut request = self.http.get(&url);
        if !params.is_empty() {
            request = request.query(params);
        }
        let response = request.send().await?;
        let response = check_status(response)?;
        Ok(response.json::<T>().await?)
    }
}

fn page_params(page: u32, per_page: u32) -> Vec<(&'static str, String)> {
    vec![
        ("page", page.to_string()),
        ("per_page", per_page.to_string()),
    ]
}

fn check_status(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let exhausted = response
        .headers()
        .get("x-ratelimit-remaining")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v == "0");
    log::warn!("GitHub API {} -> {}", response.url().path(), status);
    Err(ApiError::from_status(status.as_u16(), exhausted))
}
