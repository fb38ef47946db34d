//! JSON shapes returned by the GitHub REST v3 API.
//!
//! Field names track the API exactly; everything a page can live without is
//! `#[serde(default)]` so a partial or older payload still deserializes.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Minimal owner/author record embedded in several responses.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Account {
    pub login: String,
    #[serde(default)]
    pub avatar_url: String,
}

/// GET /repos/{owner}/{repo} response (also the search-result item shape).
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Repository {
    pub id: u64,
    pub name: String,
    pub full_name: String,
    pub owner: Account,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub stargazers_count: u64,
    #[serde(default)]
    pub forks_count: u64,
    #[serde(default)]
    pub watchers_count: u64,
    #[serde(default)]
    pub updated_at: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub license: Option<LicenseInfo>,
    #[serde(default)]
    pub topics: Vec<String>,
    #[serde(default)]
    pub default_branch: Option<String>,
    #[serde(default)]
    pub homepage: Option<String>,
    pub html_url: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LicenseInfo {
    pub name: String,
    #[serde(default)]
    pub spdx_id: Option<String>,
}

/// GET /search/repositories response.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RepoSearchResults {
    pub total_count: u64,
    #[serde(default)]
    pub incomplete_results: bool,
    pub items: Vec<Repository>,
}

/// Entry type reported by the contents API.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentKind {
    File,
    Dir,
    Symlink,
    Submodule,
}

/// One resource descriptor from GET /repos/{owner}/{repo}/contents/{path}.
///
/// `content` is present (base64, with embedded newlines) only when a single
/// file was requested and the provider considered it small enough;
/// `download_url` is null for directories and for oversized blobs.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ContentEntry {
    pub name: String,
    pub path: String,
    pub sha: String,
    #[serde(default)]
    pub size: u64,
    #[serde(rename = "type")]
    pub kind: ContentKind,
    #[serde(default)]
    pub download_url: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
}

/// The contents API returns an array for a directory and a bare object for a
/// file. That ambiguity is load-bearing for navigation, so it is decided
/// exactly once, here, at deserialization.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ContentsResponse {
    Listing(Vec<ContentEntry>),
    File(ContentEntry),
}

/// Entry type in a git tree listing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TreeItemKind {
    Blob,
    Tree,
    /// Submodule pointer (gitlink); carries no size and no children.
    Commit,
}

/// One entry from GET /repos/{owner}/{repo}/git/trees/{sha}?recursive=1.
/// `size` is present only for blobs; tree entries never carry one.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TreeItem {
    pub path: String,
    #[serde(rename = "type")]
    pub kind: TreeItemKind,
    #[serde(default)]
    pub size: Option<u64>,
    pub sha: String,
}

/// GET /repos/{owner}/{repo}/git/trees/{sha} response. `truncated` means the
/// listing was cut off by provider limits; what is present is still usable.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TreeResponse {
    pub tree: Vec<TreeItem>,
    #[serde(default)]
    pub truncated: bool,
}

/// GET /repos/{owner}/{repo}/branches item.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Branch {
    pub name: String,
    pub commit: BranchCommit,
    #[serde(default)]
    pub protected: bool,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BranchCommit {
    pub sha: String,
}

/// GET /repos/{owner}/{repo}/commits item.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Commit {
    pub sha: String,
    pub commit: CommitDetail,
    #[serde(default)]
    pub author: Option<Account>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CommitDetail {
    pub message: String,
    pub author: CommitAuthor,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CommitAuthor {
    pub name: String,
    pub date: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueState {
    Open,
    Closed,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Label {
    pub name: String,
    #[serde(default)]
    pub color: String,
}

/// GET /repos/{owner}/{repo}/issues item.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Issue {
    pub id: u64,
    pub number: u64,
    pub title: String,
    pub user: Account,
    pub created_at: String,
    pub state: IssueState,
    #[serde(default)]
    pub labels: Vec<Label>,
}

/// Pull requests share the issue shape for everything this client reads.
pub type PullRequest = Issue;

/// GET /repos/{owner}/{repo}/contributors item.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Contributor {
    pub id: u64,
    pub login: String,
    #[serde(default)]
    pub avatar_url: String,
    pub contributions: u64,
}

/// GET /repos/{owner}/{repo}/license response.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct License {
    #[serde(default)]
    pub license: Option<LicenseInfo>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub download_url: Option<String>,
}

/// GET /users/{username} response.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct UserProfile {
    pub login: String,
    pub id: u64,
    #[serde(default)]
    pub avatar_url: String,
    pub html_url: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub blog: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub twitter_username: Option<String>,
    #[serde(default)]
    pub public_repos: u64,
    #[serde(default)]
    pub public_gists: u64,
    #[serde(default)]
    pub followers: u64,
    #[serde(default)]
    pub following: u64,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// GET /repos/{owner}/{repo}/languages response: language name -> bytes.
pub type Languages = HashMap<String, u64>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contents_response_listing_branch() {
        let json = r#"[
            {"name":"src","path":"src","sha":"a1","size":0,"type":"dir","download_url":null},
            {"name":"README.md","path":"README.md","sha":"b2","size":120,"type":"file",
             "download_url":"https://raw.githubusercontent.com/o/r/main/README.md"}
        ]"#;
        let parsed: ContentsResponse = serde_json::from_str(json).unwrap();
        match parsed {
            ContentsResponse::Listing(entries) => {
                assert_eq!(entries.len(), 2);
                assert_eq!(entries[0].kind, ContentKind::Dir);
                assert_eq!(entries[1].size, 120);
            }
            ContentsResponse::File(_) => panic!("array must decode as a listing"),
        }
    }

    #[test]
    fn contents_response_single_file_branch() {
        let json = r#"{"name":"lib.rs","path":"src/lib.rs","sha":"c3","size":42,
            "type":"file","download_url":"https://example.com/lib.rs",
            "content":"Zm4gbWFpbigpIHt9\n"}"#;
        let parsed: ContentsResponse = serde_json::from_str(json).unwrap();
        match parsed {
            ContentsResponse::File(entry) => {
                assert_eq!(entry.path, "src/lib.rs");
                assert!(entry.content.is_some());
            }
            ContentsResponse::Listing(_) => panic!("object must decode as a single file"),
        }
    }

    #[test]
    fn tree_response_round_trip() {
        let json = r#"{"tree":[
            {"path":"a/b/c.txt","type":"blob","size":10,"sha":"s1"},
            {"path":"a/b","type":"tree","sha":"s2"},
            {"path":"vendored","type":"commit","sha":"s3"}
        ],"truncated":false}"#;
        let parsed: TreeResponse = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.tree.len(), 3);
        assert_eq!(parsed.tree[0].kind, TreeItemKind::Blob);
        assert_eq!(parsed.tree[0].size, Some(10));
        assert_eq!(parsed.tree[1].kind, TreeItemKind::Tree);
        assert_eq!(parsed.tree[1].size, None);
        assert_eq!(parsed.tree[2].kind, TreeItemKind::Commit);
        assert!(!parsed.truncated);

        let back = serde_json::to_string(&parsed).unwrap();
        let again: TreeResponse = serde_json::from_str(&back).unwrap();
        assert_eq!(again.tree.len(), 3);
    }

    #[test]
    fn truncated_defaults_to_false() {
        let parsed: TreeResponse = serde_json::from_str(r#"{"tree":[]}"#).unwrap();
        assert!(!parsed.truncated);
    }

    #[test]
    fn repository_tolerates_sparse_payload() {
        let json = r#"{"id":1,"name":"r","full_name":"o/r",
            "owner":{"login":"o"},"html_url":"https://github.com/o/r"}"#;
        let repo: Repository = serde_json::from_str(json).unwrap();
        assert_eq!(repo.owner.login, "o");
        assert!(repo.description.is_none());
        assert!(repo.topics.is_empty());
        assert_eq!(repo.stargazers_count, 0);
    }

    #[test]
    fn issue_round_trip() {
        let issue = Issue {
            id: 7,
            number: 12,
            title: "Broken link".into(),
            user: Account {
                login: "alice".into(),
                avatar_url: String::new(),
            },
            created_at: "2026-01-03T10:00:00Z".into(),
            state: IssueState::Open,
            labels: vec![Label {
                name: "bug".into(),
                color: "d73a4a".into(),
            }],
        };
        let json = serde_json::to_string(&issue).unwrap();
        assert!(json.contains(r#""state":"open""#));
        let parsed: Issue = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.number, 12);
        assert_eq!(parsed.labels[0].name, "bug");
    }

    #[test]
    fn branch_parse() {
        let json = r#"[{"name":"main","commit":{"sha":"abc"},"protected":true},
                       {"name":"dev","commit":{"sha":"def"}}]"#;
        let branches: Vec<Branch> = serde_json::from_str(json).unwrap();
        assert!(branches[0].protected);
        assert!(!branches[1].protected);
    }
}
