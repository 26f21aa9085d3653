//! Portfolio generation: orchestrates the labeled-text pipeline.
//!
//! Flow: resume → completion → extract_profile → render fragments →
//!       fill template → write index.html.

use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::errors::AppError;
use crate::llm_client::prompts::PLAIN_TEXT_SYSTEM;
use crate::llm_client::CompletionBackend;
use crate::output::write_document;
use crate::portfolio::extractor::{extract_profile, ExtractedProfile};
use crate::portfolio::prompts::PORTFOLIO_PROMPT_TEMPLATE;
use crate::portfolio::template::{fill, unfilled_tokens, TemplateValues};
use crate::resume::ResumeText;

pub const PORTFOLIO_FILE: &str = "index.html";

#[derive(Debug)]
pub struct PortfolioOutput {
    pub profile: ExtractedProfile,
    pub path: PathBuf,
}

/// Runs one completion call and renders the portfolio page into `output_dir`.
pub async fn generate_portfolio(
    llm: &dyn CompletionBackend,
    resume: &ResumeText,
    template: &str,
    year: i32,
    output_dir: &Path,
) -> Result<PortfolioOutput, AppError> {
    let prompt = PORTFOLIO_PROMPT_TEMPLATE.replace("{resume}", resume.as_str());

    info!("Requesting portfolio content");
    let raw = llm.complete(&prompt, PLAIN_TEXT_SYSTEM).await?;

    let profile = extract_profile(&raw)?;
    info!(
        "Extracted profile for {}: {} projects, {} links",
        profile.name,
        profile.projects.len(),
        profile.links.len()
    );

    let html = fill(template, &TemplateValues::for_profile(&profile, year));

    // A custom template may carry tokens we have no value for.
    let leftover = unfilled_tokens(&html);
    if !leftover.is_empty() {
        warn!("Template tokens left unfilled: {}", leftover.join(", "));
    }

    let path = write_document(output_dir, PORTFOLIO_FILE, &html)?;
    Ok(PortfolioOutput { profile, path })
}
