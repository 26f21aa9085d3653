//! GitHub git data API client. Every call is a single request; any non-2xx
//! status becomes `PublishError::Api` and aborts the publish.

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use reqwest::{Client, RequestBuilder};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tracing::debug;

use crate::config::GitHubConfig;
use crate::publish::{GitObjectStore, PublishError, TreeEntry};

const GITHUB_ACCEPT: &str = "application/vnd.github+json";
const GITHUB_API_VERSION: &str = "2022-11-28";
const REQUEST_TIMEOUT_SECS: u64 = 60;

// ────────────────────────────────────────────────────────────────────────────
// Wire types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct ShaOnly {
    sha: String,
}

#[derive(Debug, Deserialize)]
struct RefResponse {
    object: ShaOnly,
}

#[derive(Debug, Deserialize)]
struct CommitResponse {
    tree: ShaOnly,
}

#[derive(Debug, Serialize)]
struct CreateBlob {
    content: String,
    encoding: &'static str,
}

impl CreateBlob {
    fn new(content: &[u8]) -> Self {
        Self {
            content: STANDARD.encode(content),
            encoding: "base64",
        }
    }
}

#[derive(Debug, Serialize)]
struct CreateTree<'a> {
    base_tree: &'a str,
    tree: &'a [TreeEntry],
}

#[derive(Debug, Serialize)]
struct CreateCommit<'a> {
    message: &'a str,
    tree: &'a str,
    parents: &'a [String],
}

#[derive(Debug, Serialize)]
struct UpdateRef<'a> {
    sha: &'a str,
    force: bool,
}

#[derive(Debug, Deserialize)]
struct GitHubErrorBody {
    message: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Client
// ────────────────────────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct GitHubClient {
    client: Client,
    config: GitHubConfig,
}

impl GitHubClient {
    pub fn new(config: GitHubConfig) -> Result<Self, PublishError> {
        let client = Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;
        Ok(Self { client, config })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.config.repo_url(), path)
    }

    fn authed(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .bearer_auth(&self.config.token)
            .header(reqwest::header::ACCEPT, GITHUB_ACCEPT)
            .header("X-GitHub-Api-Version", GITHUB_API_VERSION)
    }

    /// Sends `request` and decodes a 2xx body as `T`.
    async fn send<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        request: RequestBuilder,
    ) -> Result<T, PublishError> {
        let response = self.authed(request).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(PublishError::Api {
                endpoint: endpoint.to_string(),
                status: status.as_u16(),
                message: error_message(&body),
            });
        }

        debug!("{} -> {}", endpoint, status);
        Ok(serde_json::from_str(&body)?)
    }
}

/// GitHub puts a human-readable `message` in error bodies; fall back to the raw body.
fn error_message(body: &str) -> String {
    serde_json::from_str::<GitHubErrorBody>(body)
        .map(|e| e.message)
        .unwrap_or_else(|_| body.to_string())
}

#[async_trait]
impl GitObjectStore for GitHubClient {
    async fn branch_head(&self, branch: &str) -> Result<String, PublishError> {
        let endpoint = format!("GET git/ref/heads/{branch}");
        let request = self.client.get(self.url(&format!("git/ref/heads/{branch}")));
        let reference: RefResponse = self.send(&endpoint, request).await?;
        Ok(reference.object.sha)
    }

    async fn commit_tree(&self, commit_sha: &str) -> Result<String, PublishError> {
        let endpoint = format!("GET git/commits/{commit_sha}");
        let request = self.client.get(self.url(&format!("git/commits/{commit_sha}")));
        let commit: CommitResponse = self.send(&endpoint, request).await?;
        Ok(commit.tree.sha)
    }

    async fn create_blob(&self, content: &[u8]) -> Result<String, PublishError> {
        let request = self
            .client
            .post(self.url("git/blobs"))
            .json(&CreateBlob::new(content));
        let blob: ShaOnly = self.send("POST git/blobs", request).await?;
        Ok(blob.sha)
    }

    async fn create_tree(
        &self,
        base_tree: &str,
        entries: &[TreeEntry],
    ) -> Result<String, PublishError> {
        let request = self.client.post(self.url("git/trees")).json(&CreateTree {
            base_tree,
            tree: entries,
        });
        let tree: ShaOnly = self.send("POST git/trees", request).await?;
        Ok(tree.sha)
    }

    async fn create_commit(
        &self,
        message: &str,
        tree_sha: &str,
        parents: &[String],
    ) -> Result<String, PublishError> {
        let request = self.client.post(self.url("git/commits")).json(&CreateCommit {
            message,
            tree: tree_sha,
            parents,
        });
        let commit: ShaOnly = self.send("POST git/commits", request).await?;
        Ok(commit.sha)
    }

    async fn update_branch(&self, branch: &str, commit_sha: &str) -> Result<(), PublishError> {
        let endpoint = format!("PATCH git/refs/heads/{branch}");
        let request = self
            .client
            .patch(self.url(&format!("git/refs/heads/{branch}")))
            .json(&UpdateRef {
                sha: commit_sha,
                force: true,
            });
        let _: serde_json::Value = self.send(&endpoint, request).await?;
        Ok(())
    }
}
