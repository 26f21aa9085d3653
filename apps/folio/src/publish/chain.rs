//! The publish chain as a typestate machine:
//!
//! `Idle → HeadFetched → TreeBuilt → CommitCreated → BranchUpdated`
//!
//! Each transition consumes the previous state, so a later step cannot run
//! without the results of the earlier ones. The branch ref is only touched by
//! the last transition; a failure anywhere before it leaves the branch where
//! it was (orphaned blobs, trees, or commits may remain on the remote).

use tracing::{debug, info};

use crate::publish::files::LocalFile;
use crate::publish::{GitObjectStore, PublishError, TreeEntry};

#[derive(Debug, Clone)]
pub struct Idle {
    pub branch: String,
}

#[derive(Debug, Clone)]
pub struct HeadFetched {
    pub branch: String,
    pub head_sha: String,
    pub base_tree_sha: String,
}

#[derive(Debug, Clone)]
pub struct TreeBuilt {
    pub branch: String,
    pub parent_sha: String,
    pub tree_sha: String,
    pub entries: Vec<TreeEntry>,
}

#[derive(Debug, Clone)]
pub struct CommitCreated {
    pub branch: String,
    pub parent_sha: String,
    pub tree_sha: String,
    pub commit_sha: String,
}

/// Terminal state: the branch now points at `commit_sha`.
#[derive(Debug, Clone)]
pub struct BranchUpdated {
    pub branch: String,
    pub previous_sha: String,
    pub tree_sha: String,
    pub commit_sha: String,
    pub files: usize,
}

impl Idle {
    pub fn new(branch: impl Into<String>) -> Self {
        Self {
            branch: branch.into(),
        }
    }

    /// Reads the branch tip and that commit's tree.
    pub async fn fetch_head(self, store: &dyn GitObjectStore) -> Result<HeadFetched, PublishError> {
        let head_sha = store.branch_head(&self.branch).await?;
        let base_tree_sha = store.commit_tree(&head_sha).await?;
        debug!(
            "{} is at {} (tree {})",
            self.branch, head_sha, base_tree_sha
        );
        Ok(HeadFetched {
            branch: self.branch,
            head_sha,
            base_tree_sha,
        })
    }
}

impl HeadFetched {
    /// Uploads one blob per file, serially, then creates a single tree layered
    /// on the head's tree. Paths not in `files` keep their current blobs.
    pub async fn build_tree(
        self,
        store: &dyn GitObjectStore,
        files: &[LocalFile],
    ) -> Result<TreeBuilt, PublishError> {
        let mut entries = Vec::with_capacity(files.len());
        for file in files {
            let content = file.read()?;
            let sha = store.create_blob(&content).await?;
            debug!("blob {} <- {} ({} bytes)", sha, file.repo_path, content.len());
            entries.push(TreeEntry::blob(&file.repo_path, sha));
        }

        let tree_sha = store.create_tree(&self.base_tree_sha, &entries).await?;
        Ok(TreeBuilt {
            branch: self.branch,
            parent_sha: self.head_sha,
            tree_sha,
            entries,
        })
    }
}

impl TreeBuilt {
    /// Creates a commit for the new tree with the previous head as sole parent.
    pub async fn commit(
        self,
        store: &dyn GitObjectStore,
        message: &str,
    ) -> Result<CommitCreated, PublishError> {
        let parents = [self.parent_sha.clone()];
        let commit_sha = store
            .create_commit(message, &self.tree_sha, &parents)
            .await?;
        Ok(CommitCreated {
            branch: self.branch,
            parent_sha: self.parent_sha,
            tree_sha: self.tree_sha,
            commit_sha,
        })
    }

    pub fn file_count(&self) -> usize {
        self.entries.len()
    }
}

impl CommitCreated {
    pub async fn update_branch(
        self,
        store: &dyn GitObjectStore,
        files: usize,
    ) -> Result<BranchUpdated, PublishError> {
        store.update_branch(&self.branch, &self.commit_sha).await?;
        Ok(BranchUpdated {
            branch: self.branch,
            previous_sha: self.parent_sha,
            tree_sha: self.tree_sha,
            commit_sha: self.commit_sha,
            files,
        })
    }
}

/// Publishes `files` to `branch` as a single commit.
pub async fn publish(
    store: &dyn GitObjectStore,
    branch: &str,
    files: &[LocalFile],
    message: &str,
) -> Result<BranchUpdated, PublishError> {
    if files.is_empty() {
        return Err(PublishError::NothingToPublish);
    }
    info!("Publishing {} files to {}", files.len(), branch);

    let head = Idle::new(branch).fetch_head(store).await?;
    let tree = head.build_tree(store, files).await?;
    let file_count = tree.file_count();
    let commit = tree.commit(store, message).await?;
    let updated = commit.update_branch(store, file_count).await?;

    info!(
        "{} advanced {} -> {} (tree {}, {} files)",
        updated.branch, updated.previous_sha, updated.commit_sha, updated.tree_sha, updated.files
    );
    Ok(updated)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    use crate::publish::files::{collect_files, ExclusionRules};
    use crate::publish::memory::{MemoryStore, Step};

    fn write(root: &Path, rel: &str, contents: &str) {
        let path = root.join(rel);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, contents).unwrap();
    }

    /// A site of `n` unchanged files plus index.html, already committed.
    fn seeded_site(n: usize) -> (tempfile::TempDir, MemoryStore) {
        let dir = tempfile::tempdir().unwrap();
        let mut seed = Vec::new();
        for i in 0..n {
            let rel = format!("assets/file{i}.txt");
            let contents = format!("asset {i}");
            write(dir.path(), &rel, &contents);
            seed.push((rel, contents));
        }
        seed.push(("index.html".to_string(), "<h1>old</h1>".to_string()));
        write(dir.path(), "index.html", "<h1>new</h1>");

        let store = MemoryStore::with_branch("main", &seed);
        (dir, store)
    }

    fn all_files(root: &Path) -> Vec<LocalFile> {
        let rules = ExclusionRules::default();
        collect_files(root, |rel| rules.allows(rel)).unwrap()
    }

    #[tokio::test]
    async fn test_publish_changed_file_keeps_unchanged_blobs() {
        let n = 3;
        let (dir, store) = seeded_site(n);
        let old_head = store.head("main");
        let old_tree = store.tree_of_commit(&old_head);

        let updated = publish(&store, "main", &all_files(dir.path()), "Update site")
            .await
            .unwrap();

        let new_tree = store.tree(&updated.tree_sha);
        assert_eq!(new_tree.len(), n + 1);

        let unchanged = new_tree
            .iter()
            .filter(|(path, sha)| old_tree.get(*path) == Some(*sha))
            .count();
        assert_eq!(unchanged, n);
        assert_ne!(new_tree.get("index.html"), old_tree.get("index.html"));

        assert_eq!(store.head("main"), updated.commit_sha);
        assert_eq!(store.parents(&updated.commit_sha), vec![old_head.clone()]);
        assert_eq!(updated.previous_sha, old_head);
        assert_eq!(store.message(&updated.commit_sha), "Update site");
    }

    #[tokio::test]
    async fn test_unlisted_paths_are_preserved() {
        let (dir, store) = seeded_site(2);
        let only_index: Vec<_> = all_files(dir.path())
            .into_iter()
            .filter(|f| f.repo_path == "index.html")
            .collect();

        let updated = publish(&store, "main", &only_index, "Update index.html")
            .await
            .unwrap();

        let tree = store.tree(&updated.tree_sha);
        assert_eq!(tree.len(), 3);
        assert!(tree.contains_key("assets/file0.txt"));
        assert_eq!(updated.files, 1);
    }

    #[tokio::test]
    async fn test_blobs_are_created_one_per_file() {
        let (dir, store) = seeded_site(4);
        let files = all_files(dir.path());
        let before = store.calls(Step::CreateBlob);

        publish(&store, "main", &files, "m").await.unwrap();

        assert_eq!(store.calls(Step::CreateBlob) - before, files.len());
        assert_eq!(store.calls(Step::CreateTree), 1);
        assert_eq!(store.calls(Step::CreateCommit), 1);
        assert_eq!(store.calls(Step::UpdateBranch), 1);
    }

    #[tokio::test]
    async fn test_failure_at_any_step_leaves_branch_untouched() {
        for step in [
            Step::ReadHead,
            Step::ReadCommit,
            Step::CreateBlob,
            Step::CreateTree,
            Step::CreateCommit,
            Step::UpdateBranch,
        ] {
            let (dir, store) = seeded_site(2);
            let old_head = store.head("main");
            store.fail_on(step);

            let err = publish(&store, "main", &all_files(dir.path()), "m")
                .await
                .unwrap_err();

            assert!(
                matches!(err, PublishError::Api { status: 500, .. }),
                "{step:?}: {err}"
            );
            assert_eq!(store.head("main"), old_head, "{step:?} moved the branch");
        }
    }

    #[tokio::test]
    async fn test_failed_tree_stops_before_commit() {
        let (dir, store) = seeded_site(1);
        store.fail_on(Step::CreateTree);

        let head = Idle::new("main").fetch_head(&store).await.unwrap();
        let result = head.build_tree(&store, &all_files(dir.path())).await;

        assert!(result.is_err());
        assert_eq!(store.calls(Step::CreateCommit), 0);
    }

    #[tokio::test]
    async fn test_empty_file_set_is_rejected_before_any_remote_call() {
        let (_dir, store) = seeded_site(1);

        let err = publish(&store, "main", &[], "m").await.unwrap_err();

        assert!(matches!(err, PublishError::NothingToPublish));
        assert_eq!(store.calls(Step::ReadHead), 0);
        assert_eq!(store.calls(Step::CreateBlob), 0);
        assert_eq!(store.calls(Step::CreateTree), 0);
    }

    #[tokio::test]
    async fn test_unknown_branch_fails_at_head() {
        let (dir, store) = seeded_site(1);
        let err = publish(&store, "gh-pages", &all_files(dir.path()), "m")
            .await
            .unwrap_err();
        assert!(matches!(err, PublishError::Api { status: 404, .. }));
    }
}
