mod cli;
mod config;
mod errors;
mod llm_client;
mod output;
mod portfolio;
mod publish;
mod resume;
mod summary;

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::cli::{Cli, Commands};
use crate::config::{Config, GitHubConfig, LlmConfig};
use crate::errors::AppError;
use crate::llm_client::LlmClient;
use crate::portfolio::generator::{generate_portfolio, PORTFOLIO_FILE};
use crate::portfolio::template::{current_year, load_template};
use crate::publish::files::{collect_files, files_from_paths, ExclusionRules};
use crate::publish::github::GitHubClient;
use crate::resume::ResumeText;
use crate::summary::generator::{generate_summary, SUMMARY_CSS_FILE, SUMMARY_HTML_FILE};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Folio v{}", env!("CARGO_PKG_VERSION"));

    let result = match cli.command {
        Commands::Portfolio { no_publish } => run_portfolio(&config, !no_publish).await,
        Commands::Summary { no_publish } => run_summary(&config, !no_publish).await,
        Commands::Push { root, message } => run_push(&root, &message).await,
    };

    if let Err(e) = &result {
        error!(code = e.code(), "Run aborted: {e}");
    }
    Ok(result?)
}

/// Publishing credentials are checked up front so a missing token fails the
/// run before any completion call is paid for.
fn github_config(publish: bool) -> Result<Option<GitHubConfig>, AppError> {
    if publish {
        Ok(Some(GitHubConfig::from_env()?))
    } else {
        Ok(None)
    }
}

fn build_llm_client() -> Result<LlmClient, AppError> {
    let llm = LlmClient::new(LlmConfig::from_env()?)?;
    info!("LLM client initialized (model: {})", llm_client::MODEL);
    Ok(llm)
}

async fn run_portfolio(config: &Config, publish: bool) -> Result<(), AppError> {
    let github = github_config(publish)?;
    let llm = build_llm_client()?;
    let resume = ResumeText::load(&config.resume_path)?;
    let template = load_template(config.template_path.as_deref())?;

    let output = generate_portfolio(
        &llm,
        &resume,
        &template,
        current_year(),
        &config.output_dir,
    )
    .await?;
    info!("{} generated for {}", PORTFOLIO_FILE, output.profile.name);

    if let Some(github) = github {
        let message = format!("Update {PORTFOLIO_FILE}");
        publish_paths(github, &config.output_dir, &[output.path], &message).await?;
    }
    Ok(())
}

async fn run_summary(config: &Config, publish: bool) -> Result<(), AppError> {
    let github = github_config(publish)?;
    let llm = build_llm_client()?;
    let resume = ResumeText::load(&config.resume_path)?;

    let output = generate_summary(&llm, &resume, &config.output_dir).await?;
    info!("{SUMMARY_HTML_FILE} and {SUMMARY_CSS_FILE} generated and linked");

    if let Some(github) = github {
        let message = format!("Update {SUMMARY_HTML_FILE}, {SUMMARY_CSS_FILE}");
        publish_paths(github, &config.output_dir, &output.paths(), &message).await?;
    }
    Ok(())
}

async fn run_push(root: &Path, message: &str) -> Result<(), AppError> {
    let github = GitHubConfig::from_env()?;
    let rules = ExclusionRules::for_current_exe();
    let files = collect_files(root, |rel| rules.allows(rel))?;
    info!("Pushing {} files from {}", files.len(), root.display());

    let client = GitHubClient::new(github.clone())?;
    publish::publish(&client, &github.branch, &files, message).await?;
    Ok(())
}

async fn publish_paths(
    github: GitHubConfig,
    root: &Path,
    paths: &[PathBuf],
    message: &str,
) -> Result<(), AppError> {
    let files = files_from_paths(root, paths);
    let client = GitHubClient::new(github.clone())?;
    publish::publish(&client, &github.branch, &files, message).await?;
    Ok(())
}
