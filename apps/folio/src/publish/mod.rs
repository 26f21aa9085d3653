// Turns a set of local files into one commit on a remote branch.
// The remote is treated as a git object store (blobs, trees, commits, refs)
// behind the `GitObjectStore` trait; `github::GitHubClient` is the real one.

use std::path::PathBuf;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod chain;
pub mod files;
pub mod github;
#[cfg(test)]
pub mod memory;

pub use chain::publish;

/// Regular, non-executable file.
pub const FILE_MODE: &str = "100644";

#[derive(Debug, Error)]
pub enum PublishError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{endpoint} failed (status {status}): {message}")]
    Api {
        endpoint: String,
        status: u16,
        message: String,
    },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("No files to publish")]
    NothingToPublish,
}

/// One `{path, mode, type, sha}` row of a tree creation request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeEntry {
    pub path: String,
    pub mode: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub sha: String,
}

impl TreeEntry {
    pub fn blob(path: impl Into<String>, sha: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            mode: FILE_MODE.to_string(),
            kind: "blob".to_string(),
            sha: sha.into(),
        }
    }
}

/// The six git data operations a publish needs. Every call is one round trip.
#[async_trait]
pub trait GitObjectStore: Send + Sync {
    /// Commit SHA at the tip of `branch`.
    async fn branch_head(&self, branch: &str) -> Result<String, PublishError>;

    /// Tree SHA of `commit_sha`.
    async fn commit_tree(&self, commit_sha: &str) -> Result<String, PublishError>;

    async fn create_blob(&self, content: &[u8]) -> Result<String, PublishError>;

    /// New tree = `base_tree` with `entries` layered on top.
    async fn create_tree(
        &self,
        base_tree: &str,
        entries: &[TreeEntry],
    ) -> Result<String, PublishError>;

    async fn create_commit(
        &self,
        message: &str,
        tree_sha: &str,
        parents: &[String],
    ) -> Result<String, PublishError>;

    /// Force-moves `branch` to `commit_sha`.
    async fn update_branch(&self, branch: &str, commit_sha: &str) -> Result<(), PublishError>;
}
