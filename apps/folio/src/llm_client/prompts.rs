// Shared prompt constants.
// Each pipeline that needs completion calls defines its own prompts.rs alongside it.
// This file contains cross-cutting system prompts.

/// System prompt that enforces JSON-only output for schema-validated calls.
pub const JSON_ONLY_SYSTEM: &str = "You are a precise, structured assistant. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// System prompt for labeled plain-text extraction.
pub const PLAIN_TEXT_SYSTEM: &str = "You are a careful content editor. \
    Follow the requested output format exactly. \
    Do NOT add commentary, markdown, or extra sections.";
