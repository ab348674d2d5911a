// Shared prompt constants.
// Each service that needs LLM calls defines its own prompts.rs alongside it.
// This file contains cross-cutting system prompts.

/// System prompt that enforces JSON-only output.
pub const JSON_ONLY_SYSTEM: &str = "You are a precise, structured assistant. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON value. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// System prompt for free-text rewriting calls.
pub const RESUME_WRITER_SYSTEM: &str = "You are an expert resume writer who optimizes \
    resumes for Applicant Tracking Systems. \
    Return only the requested text, with no preamble or commentary.";
