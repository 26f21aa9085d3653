//! Summary section generation.
//!
//! Flow: resume → {"html"} completion → {"css"} completion on that HTML →
//!       wrap HTML in a page shell → write summary.html and summary.css.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::info;

use crate::errors::AppError;
use crate::llm_client::prompts::JSON_ONLY_SYSTEM;
use crate::llm_client::{complete_structured, CompletionBackend};
use crate::output::write_document;
use crate::resume::ResumeText;
use crate::summary::prompts::{
    SUMMARY_CSS_PROMPT_TEMPLATE, SUMMARY_HTML_PROMPT_TEMPLATE, SUMMARY_PAGE_SHELL,
};

pub const SUMMARY_HTML_FILE: &str = "summary.html";
pub const SUMMARY_CSS_FILE: &str = "summary.css";

/// `{"html": "..."}`, the generated summary section.
#[derive(Debug, Clone, Deserialize)]
pub struct SummaryHtml {
    pub html: String,
}

/// `{"css": "..."}`, the stylesheet for the generated section.
#[derive(Debug, Clone, Deserialize)]
pub struct SummaryCss {
    pub css: String,
}

#[derive(Debug)]
pub struct SummaryOutput {
    pub html_path: PathBuf,
    pub css_path: PathBuf,
}

impl SummaryOutput {
    pub fn paths(&self) -> Vec<PathBuf> {
        vec![self.html_path.clone(), self.css_path.clone()]
    }
}

pub fn wrap_page(fragment: &str) -> String {
    SUMMARY_PAGE_SHELL.replace("{body}", fragment)
}

/// Generates the summary section and its stylesheet into `output_dir`.
/// Nothing is written unless both completions validate.
pub async fn generate_summary(
    llm: &dyn CompletionBackend,
    resume: &ResumeText,
    output_dir: &Path,
) -> Result<SummaryOutput, AppError> {
    info!("Requesting summary HTML");
    let html_prompt = SUMMARY_HTML_PROMPT_TEMPLATE.replace("{resume_text}", resume.as_str());
    let SummaryHtml { html } = complete_structured::<SummaryHtml>(llm, &html_prompt, JSON_ONLY_SYSTEM).await?;

    info!("Requesting summary CSS ({} bytes of HTML)", html.len());
    let css_prompt = SUMMARY_CSS_PROMPT_TEMPLATE.replace("{html_content}", &html);
    let SummaryCss { css } = complete_structured::<SummaryCss>(llm, &css_prompt, JSON_ONLY_SYSTEM).await?;

    let html_path = write_document(output_dir, SUMMARY_HTML_FILE, &wrap_page(&html))?;
    let css_path = write_document(output_dir, SUMMARY_CSS_FILE, &css)?;

    Ok(SummaryOutput {
        html_path,
        css_path,
    })
}
