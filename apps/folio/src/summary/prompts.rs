// Prompt constants for the summary section pipeline.
// Both calls are schema-validated, so each prompt names the exact JSON shape.

/// Summary HTML prompt template. Replace `{resume_text}` before sending.
pub const SUMMARY_HTML_PROMPT_TEMPLATE: &str = r#"You are an expert web developer and personal branding specialist.
Generate a portfolio-style summary section in HTML for this resume.

Requirements:
- Tone: first-person, as if the person is introducing themselves.
- Structure: a hero section with <section id="about">, an <h1> for the name, and two <p> paragraphs.
- Content: highlight experience, skills, and career focus in 2 paragraphs.
- Use semantic HTML5 tags.
- Keep it clean and minimal like a modern portfolio site.
- HTML content only: no CSS, no <html> or <body> wrapper, no extra text.

Return a JSON object with this EXACT schema:
{"html": "<section id=\"about\">...</section>"}

Resume:
{resume_text}"#;

/// Summary CSS prompt template. Replace `{html_content}` before sending.
pub const SUMMARY_CSS_PROMPT_TEMPLATE: &str = r#"You are a skilled web designer.
You are given the following HTML summary section:

{html_content}

Your task:
- Generate beautiful, modern, responsive CSS for this HTML.
- Follow a professional portfolio style.
- Include colors, spacing, typography, hero section styling, and mobile responsiveness.
- CSS content only, no HTML or extra text.

Return a JSON object with this EXACT schema:
{"css": "..."}"#;

/// Full-page shell the generated fragment is wrapped in. Replace `{body}`.
pub const SUMMARY_PAGE_SHELL: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Summary</title>
    <link rel="stylesheet" href="summary.css">
</head>
<body>
{body}
</body>
</html>
"#;
