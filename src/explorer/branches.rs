//! Branch enumeration, filtering and selection.
//!
//! Selection only records the new active name; the caller drives
//! [`Explorer::switch_branch`](super::Explorer::switch_branch) with it so
//! the listing and size index reset together.

use crate::source::ContentSource;
use repolens_github::{ApiError, Branch};

pub struct BranchSwitcher {
    branches: Vec<Branch>,
    active: String,
    filter: String,
}

impl BranchSwitcher {
    pub fn new(active: &str) -> Self {
        Self {
            branches: Vec::new(),
            active: active.to_string(),
            filter: String::new(),
        }
    }

    /// Fetch the branch list for a repository.
    pub async fn load<S: ContentSource>(
        &mut self,
        source: &S,
        owner: &str,
        repo: &str,
    ) -> Result<(), ApiError> {
        self.branches = source.get_branches(owner, repo).await?;
        Ok(())
    }

    pub fn set_branches(&mut self, branches: Vec<Branch>) {
        self.branches = branches;
    }

    pub fn branches(&self) -> &[Branch] {
        &self.branches
    }

    pub fn active(&self) -> &str {
        &self.active
    }

    pub fn set_filter(&mut self, filter: &str) {
        self.filter = filter.to_string();
    }

    /// Branches matching the filter, case-insensitive substring on name.
    pub fn filtered(&self) -> Vec<&Branch> {
        let needle = self.filter.to_lowercase();
        self.branches
            .iter()
            .filter(|b| needle.is_empty() || b.name.to_lowercase().contains(&needle))
            .collect()
    }

    /// Select a branch by name. Clears the filter; returns `true` when the
    /// active branch actually changed (the signal to reload navigation).
    pub fn select(&mut self, name: &str) -> bool {
        self.filter.clear();
        if name == self.active {
            return false;
        }
        self.active = name.to_string();
        true
    }
}
