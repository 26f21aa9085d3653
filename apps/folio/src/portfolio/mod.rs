// Portfolio pipeline: labeled-text completion → profile → fragments → filled template.
// All completion calls go through llm_client.

pub mod extractor;
pub mod fragments;
pub mod generator;
pub mod prompts;
pub mod template;
