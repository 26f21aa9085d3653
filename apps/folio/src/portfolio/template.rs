//! The portfolio HTML template: where it comes from and how its `{{TOKEN}}`
//! placeholders get filled.
//!
//! The filler makes a single left-to-right pass over the template. Each
//! `{{TOKEN}}` with a supplied value is replaced; anything else, including
//! tokens that appear inside substituted values, is copied through verbatim.

use std::collections::BTreeMap;
use std::path::Path;

use chrono::Datelike;

use crate::errors::AppError;
use crate::portfolio::extractor::ExtractedProfile;
use crate::portfolio::fragments::{render_links, render_projects};

/// Built-in portfolio skeleton.
pub const PORTFOLIO_TEMPLATE: &str = include_str!("../../templates/portfolio.html");

pub const TOKEN_NAME: &str = "NAME";
pub const TOKEN_INITIALS: &str = "INITIALS";
pub const TOKEN_TAGLINE: &str = "TAGLINE";
pub const TOKEN_ABOUT: &str = "ABOUT";
pub const TOKEN_PROJECTS: &str = "PROJECTS";
pub const TOKEN_SOCIALS: &str = "SOCIALS";
pub const TOKEN_YEAR: &str = "YEAR";

/// Every token the portfolio template is expected to use.
pub const KNOWN_TOKENS: [&str; 7] = [
    TOKEN_NAME,
    TOKEN_INITIALS,
    TOKEN_TAGLINE,
    TOKEN_ABOUT,
    TOKEN_PROJECTS,
    TOKEN_SOCIALS,
    TOKEN_YEAR,
];

const OPEN: &str = "{{";
const CLOSE: &str = "}}";

/// Loads the template override at `path`, or the built-in one.
pub fn load_template(path: Option<&Path>) -> Result<String, AppError> {
    match path {
        Some(path) => std::fs::read_to_string(path).map_err(|e| AppError::io(path, e)),
        None => Ok(PORTFOLIO_TEMPLATE.to_string()),
    }
}

/// Token name to replacement text.
#[derive(Debug, Clone, Default)]
pub struct TemplateValues(BTreeMap<String, String>);

impl TemplateValues {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, token: &str, value: impl Into<String>) -> &mut Self {
        self.0.insert(token.to_string(), value.into());
        self
    }

    pub fn get(&self, token: &str) -> Option<&str> {
        self.0.get(token).map(String::as_str)
    }

    /// Values for every known token, rendering projects and links into HTML.
    pub fn for_profile(profile: &ExtractedProfile, year: i32) -> Self {
        let mut values = Self::new();
        values
            .set(TOKEN_NAME, &profile.name)
            .set(TOKEN_INITIALS, &profile.initials)
            .set(TOKEN_TAGLINE, &profile.tagline)
            .set(TOKEN_ABOUT, &profile.about)
            .set(TOKEN_PROJECTS, render_projects(&profile.projects))
            .set(TOKEN_SOCIALS, render_links(&profile.links))
            .set(TOKEN_YEAR, year.to_string());
        debug_assert!(KNOWN_TOKENS.iter().all(|t| values.get(t).is_some()));
        values
    }
}

/// Current local year, for `{{YEAR}}`.
pub fn current_year() -> i32 {
    chrono::Local::now().year()
}

/// Substitutes every `{{TOKEN}}` that has a value. Unknown tokens stay as-is.
pub fn fill(template: &str, values: &TemplateValues) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find(OPEN) {
        out.push_str(&rest[..open]);
        let after_open = &rest[open + OPEN.len()..];

        match after_open
            .find(CLOSE)
            .and_then(|close| values.get(&after_open[..close]).map(|v| (close, v)))
        {
            Some((close, value)) => {
                out.push_str(value);
                rest = &after_open[close + CLOSE.len()..];
            }
            None => {
                // Step past one brace only, so `{{{NAME}}}` still finds `{{NAME}}`.
                out.push('{');
                rest = &rest[open + 1..];
            }
        }
    }

    out.push_str(rest);
    out
}

/// Names of `{{TOKEN}}` placeholders still present in `document`.
pub fn unfilled_tokens(document: &str) -> Vec<&str> {
    let mut found = Vec::new();
    let mut rest = document;
    while let Some(open) = rest.find(OPEN) {
        let after_open = &rest[open + OPEN.len()..];
        let Some(close) = after_open.find(CLOSE) else {
            break;
        };
        let token = &after_open[..close];
        if !token.is_empty() && token.chars().all(|c| c.is_ascii_uppercase() || c == '_') {
            found.push(token);
            rest = &after_open[close + CLOSE.len()..];
        } else {
            rest = &rest[open + 1..];
        }
    }
    found
}
