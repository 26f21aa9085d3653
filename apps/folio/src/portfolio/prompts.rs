// Prompt constants for the portfolio pipeline.
// The labels here must match the ones `extractor::extract_profile` looks up.

/// Portfolio extraction prompt template. Replace `{resume}` before sending.
pub const PORTFOLIO_PROMPT_TEMPLATE: &str = r#"Extract clean portfolio content from the resume.

Return EXACTLY this format:

NAME:
Full Name

INITIALS:
Initials (e.g. J.S.)

TAGLINE:
Short professional headline

ABOUT:
Professional summary paragraph

PROJECTS:
Title | Description || Title | Description

LINKS:
GitHub: url || LinkedIn: url || Website: url

Rules:
- Separate sections with exactly one blank line.
- Do not put blank lines inside a section.
- Use "||" only between items and "|" only between a project title and its description.

Resume:
{resume}"#;
