//! Parses the PROJECTS and LINKS sections of a completion and renders them
//! as repeated HTML blocks. Item order always follows input order.

use serde::Serialize;

use crate::errors::AppError;

const ITEM_DELIMITER: &str = "||";
const PROJECT_DELIMITER: char = '|';
const LINK_DELIMITER: char = ':';
const SOCIAL_ICON_DIR: &str = "img/social_icons";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Project {
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Link {
    pub label: String,
    pub url: String,
}

impl Link {
    /// `img/social_icons/<label>.svg` with the label lowercased and trimmed.
    pub fn icon_path(&self) -> String {
        format!("{SOCIAL_ICON_DIR}/{}.svg", self.label.to_lowercase().trim())
    }
}

/// `Title | Description || Title | Description`
pub fn parse_projects(section: &str) -> Result<Vec<Project>, AppError> {
    section
        .split(ITEM_DELIMITER)
        .map(|item| -> Result<Project, AppError> {
            let (title, description) =
                item.split_once(PROJECT_DELIMITER)
                    .ok_or_else(|| AppError::MalformedFragment {
                        kind: "project",
                        delimiter: "|",
                        item: item.trim().to_string(),
                    })?;
            Ok(Project {
                title: title.trim().to_string(),
                description: description.trim().to_string(),
            })
        })
        .collect()
}

/// `Label: url || Label: url`. Splits on the first `:` only, so the url keeps its scheme.
pub fn parse_links(section: &str) -> Result<Vec<Link>, AppError> {
    section
        .split(ITEM_DELIMITER)
        .map(|item| -> Result<Link, AppError> {
            let malformed = || AppError::MalformedFragment {
                kind: "link",
                delimiter: ":",
                item: item.trim().to_string(),
            };
            let (label, url) = item.split_once(LINK_DELIMITER).ok_or_else(malformed)?;
            // The only colon belongs to the url scheme, so there is no label.
            if url.starts_with("//") {
                return Err(malformed());
            }
            Ok(Link {
                label: label.trim().to_string(),
                url: url.trim().to_string(),
            })
        })
        .collect()
}

pub fn render_project(project: &Project) -> String {
    format!(
        r#"
          <div class="project-box" data-aos="fade-zoom-in">
            <div class="project-mask">
              <div class="project-caption">
                <h5 class="white">{}</h5>
                <p class="white">{}</p>
              </div>
            </div>
          </div>"#,
        project.title, project.description
    )
}

pub fn render_link(link: &Link) -> String {
    format!(
        r#"
                <a href="{}" target="_blank">
                  <img src="{}" alt="{}">
                </a>"#,
        link.url,
        link.icon_path(),
        link.label
    )
}

pub fn render_projects(projects: &[Project]) -> String {
    projects.iter().map(render_project).collect()
}

pub fn render_links(links: &[Link]) -> String {
    links.iter().map(render_link).collect()
}
