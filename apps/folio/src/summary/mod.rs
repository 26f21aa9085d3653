// Summary section pipeline: two schema-validated completions (HTML, then CSS for that HTML).

pub mod generator;
pub mod prompts;
