//! Slices labeled sections out of the free-text portfolio completion.
//!
//! The format is the one requested by `PORTFOLIO_PROMPT_TEMPLATE`: a `LABEL:`
//! marker followed by the value, terminated by a blank line. There is no
//! tolerance for drift: a missing label fails the run.

use serde::Serialize;

use crate::errors::AppError;
use crate::portfolio::fragments::{parse_links, parse_projects, Link, Project};

pub const LABEL_NAME: &str = "NAME";
pub const LABEL_INITIALS: &str = "INITIALS";
pub const LABEL_TAGLINE: &str = "TAGLINE";
pub const LABEL_ABOUT: &str = "ABOUT";
pub const LABEL_PROJECTS: &str = "PROJECTS";
pub const LABEL_LINKS: &str = "LINKS";

/// Everything the portfolio template needs, pulled from one completion.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExtractedProfile {
    pub name: String,
    pub initials: String,
    pub tagline: String,
    pub about: String,
    pub projects: Vec<Project>,
    pub links: Vec<Link>,
}

/// Returns the trimmed text between the first `"<label>:"` and the next blank line.
///
/// The segment also stops at a repeat of the same marker, so
/// `"NAME: a NAME: b"` yields `"a"`.
pub fn extract<'a>(raw: &'a str, label: &str) -> Result<&'a str, AppError> {
    let marker = format!("{label}:");
    let start = raw
        .find(&marker)
        .map(|idx| idx + marker.len())
        .ok_or_else(|| AppError::Extraction {
            label: label.to_string(),
        })?;

    let rest = &raw[start..];
    let rest = rest.find(&marker).map_or(rest, |end| &rest[..end]);
    let section = rest.find("\n\n").map_or(rest, |end| &rest[..end]);

    Ok(section.trim())
}

/// Extracts every required section and parses PROJECTS and LINKS into items.
pub fn extract_profile(raw: &str) -> Result<ExtractedProfile, AppError> {
    Ok(ExtractedProfile {
        name: extract(raw, LABEL_NAME)?.to_string(),
        initials: extract(raw, LABEL_INITIALS)?.to_string(),
        tagline: extract(raw, LABEL_TAGLINE)?.to_string(),
        about: extract(raw, LABEL_ABOUT)?.to_string(),
        projects: parse_projects(extract(raw, LABEL_PROJECTS)?)?,
        links: parse_links(extract(raw, LABEL_LINKS)?)?,
    })
}
