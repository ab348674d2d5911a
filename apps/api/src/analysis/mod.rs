// Resume analysis pipeline: text extraction, LLM match scoring and keyword
// gaps, ATS scan, and experience rewriting.
// All LLM calls go through llm_client; the scanner never touches the network.

pub mod handlers;
pub mod prompts;
pub mod service;
