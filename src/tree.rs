//! Folder-size aggregation over a recursive tree listing.
//!
//! A recursive git tree reports sizes for blobs only, so directory sizes are
//! always derived: every blob's size is added to each of its proper
//! ancestors. The root is deliberately never a key; callers treat a missing
//! key as "size unknown", which is distinct from zero.

use repolens_github::{TreeItem, TreeItemKind};
use std::collections::HashMap;

/// Cumulative byte size per directory path (slash-separated, no trailing
/// slash). Built once per (repository, branch); an empty index means the
/// tree fetch failed or has not completed, and every lookup is "unknown".
#[derive(Clone, Debug, Default)]
pub struct FolderSizeIndex {
    sizes: HashMap<String, u64>,
}

impl FolderSizeIndex {
    /// Aggregate blob sizes from a recursive tree listing.
    ///
    /// Tree- and commit-type entries are skipped: the provider reports no
    /// size for them, and a directory's size must come from its blobs alone.
    /// A truncated listing still aggregates whatever entries are present.
    pub fn build(items: &[TreeItem]) -> Self {
        let mut sizes: HashMap<String, u64> = HashMap::new();
        for item in items {
            if item.kind != TreeItemKind::Blob {
                continue;
            }
            let Some(size) = item.size else { continue };
            let segments: Vec<&str> = item.path.split('/').collect();
            // Every proper ancestor of the blob; the blob's own path and the
            // root are excluded.
            for depth in 1..segments.len() {
                let ancestor = segments[..depth].join("/");
                *sizes.entry(ancestor).or_insert(0) += size;
            }
        }
        Self { sizes }
    }

    /// Cumulative size of every blob beneath `dir_path`, or `None` when the
    /// size is unknown (index empty, path absent, or path is a file).
    pub fn lookup(&self, dir_path: &str) -> Option<u64> {
        self.sizes.get(dir_path).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.sizes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.sizes.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn blob(path: &str, size: u64) -> TreeItem {
        TreeItem {
            path: path.into(),
            kind: TreeItemKind::Blob,
            size: Some(size),
            sha: "s".into(),
        }
    }

    fn tree(path: &str) -> TreeItem {
        TreeItem {
            path: path.into(),
            kind: TreeItemKind::Tree,
            size: None,
            sha: "s".into(),
        }
    }

    #[test]
    fn aggregates_into_every_proper_ancestor() {
        let items = vec![blob("a/b/c.txt", 10), blob("a/d.txt", 5)];
        let index = FolderSizeIndex::build(&items);
        assert_eq!(index.lookup("a"), Some(15));
        assert_eq!(index.lookup("a/b"), Some(10));
        assert_eq!(index.len(), 2);
    }

    #[test]
    fn root_is_never_a_key() {
        let index = FolderSizeIndex::build(&[blob("README.md", 100), blob("a/x.txt", 1)]);
        assert_eq!(index.lookup(""), None);
        assert_eq!(index.lookup("a"), Some(1));
    }

    #[test]
    fn tree_entries_contribute_nothing() {
        let index = FolderSizeIndex::build(&[tree("a"), tree("a/b"), blob("a/b/f.rs", 7)]);
        assert_eq!(index.lookup("a"), Some(7));
        assert_eq!(index.lookup("a/b"), Some(7));
    }

    #[test]
    fn blob_without_size_is_skipped() {
        let item = TreeItem {
            path: "a/sparse.bin".into(),
            kind: TreeItemKind::Blob,
            size: None,
            sha: "s".into(),
        };
        let index = FolderSizeIndex::build(&[item, blob("a/real.txt", 3)]);
        assert_eq!(index.lookup("a"), Some(3));
    }

    #[test]
    fn submodule_pointers_are_skipped() {
        let gitlink = TreeItem {
            path: "vendor/dep".into(),
            kind: TreeItemKind::Commit,
            size: None,
            sha: "s".into(),
        };
        let index = FolderSizeIndex::build(&[gitlink]);
        assert!(index.is_empty());
    }

    #[test]
    fn empty_input_gives_unknown_everywhere() {
        let index = FolderSizeIndex::build(&[]);
        assert!(index.is_empty());
        assert_eq!(index.lookup("src"), None);
    }
}
