use std::path::PathBuf;

use anyhow::{Context, Result};

pub const DEFAULT_LLM_API_URL: &str = "https://api.groq.com/openai/v1/chat/completions";
pub const DEFAULT_GITHUB_API_URL: &str = "https://api.github.com";
pub const DEFAULT_BRANCH: &str = "main";

/// Application configuration loaded from environment variables.
/// Secrets are only required by the subcommands that use them, see
/// [`LlmConfig::from_env`] and [`GitHubConfig::from_env`].
#[derive(Debug, Clone)]
pub struct Config {
    pub resume_path: PathBuf,
    pub output_dir: PathBuf,
    pub template_path: Option<PathBuf>,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            resume_path: env_or("RESUME_PATH", "resume.txt").into(),
            output_dir: env_or("OUTPUT_DIR", ".").into(),
            template_path: std::env::var("FOLIO_TEMPLATE_PATH").ok().map(PathBuf::from),
            rust_log: env_or("RUST_LOG", "info"),
        })
    }
}

/// Credentials and endpoint for the completion service.
#[derive(Debug, Clone)]
pub struct LlmConfig {
    pub api_key: String,
    pub api_url: String,
}

impl LlmConfig {
    pub fn from_env() -> Result<Self> {
        Ok(LlmConfig {
            api_key: require_env("LLM_API_KEY")?,
            api_url: env_or("LLM_API_URL", DEFAULT_LLM_API_URL),
        })
    }
}

/// Target repository for publishing. Passed explicitly to the GitHub client
/// so nothing in the publish path reads process-wide state.
#[derive(Debug, Clone)]
pub struct GitHubConfig {
    pub token: String,
    pub owner: String,
    pub repo: String,
    pub branch: String,
    pub api_url: String,
}

impl GitHubConfig {
    pub fn from_env() -> Result<Self> {
        Ok(GitHubConfig {
            token: require_env("GITHUB_TOKEN")?,
            owner: require_env("GITHUB_OWNER")?,
            repo: require_env("GITHUB_REPO")?,
            branch: env_or("GITHUB_BRANCH", DEFAULT_BRANCH),
            api_url: env_or("GITHUB_API_URL", DEFAULT_GITHUB_API_URL),
        })
    }

    /// `{api_url}/repos/{owner}/{repo}`, the prefix of every git data endpoint.
    pub fn repo_url(&self) -> String {
        format!(
            "{}/repos/{}/{}",
            self.api_url.trim_end_matches('/'),
            self.owner,
            self.repo
        )
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn github_config(api_url: &str) -> GitHubConfig {
        GitHubConfig {
            token: "t".to_string(),
            owner: "jd".to_string(),
            repo: "site".to_string(),
            branch: "main".to_string(),
            api_url: api_url.to_string(),
        }
    }

    #[test]
    fn test_repo_url_joins_owner_and_repo() {
        assert_eq!(
            github_config("https://api.github.com").repo_url(),
            "https://api.github.com/repos/jd/site"
        );
    }

    #[test]
    fn test_repo_url_tolerates_trailing_slash() {
        assert_eq!(
            github_config("http://localhost:8080/").repo_url(),
            "http://localhost:8080/repos/jd/site"
        );
    }

    #[test]
    fn test_require_env_names_missing_key() {
        let err = require_env("FOLIO_TEST_DEFINITELY_UNSET").unwrap_err();
        assert!(err.to_string().contains("FOLIO_TEST_DEFINITELY_UNSET"));
    }
}
