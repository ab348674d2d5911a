//! LLM-backed resume analysis: job match scoring, missing-keyword extraction
//! and experience rewriting.
//!
//! `AppState` holds an `Arc<dyn ResumeAnalyzer>`; `LlmResumeAnalyzer` is the
//! production backend and every call goes through `LlmClient`.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::analysis::prompts::{
    MATCH_SCORE_PROMPT, MISSING_KEYWORDS_PROMPT, REWRITE_EXPERIENCE_PROMPT,
};
use crate::errors::AppError;
use crate::llm_client::prompts::{JSON_ONLY_SYSTEM, RESUME_WRITER_SYSTEM};
use crate::llm_client::{parse_json_reply, LlmClient};

pub const DEFAULT_MAX_KEYWORDS: usize = 10;
/// Only the highest-ranked missing keywords are woven into a rewrite.
pub const MAX_REWRITE_KEYWORDS: usize = 5;

const MATCH_SCORE_MAX_TOKENS: u32 = 1500;
const KEYWORDS_MAX_TOKENS: u32 = 400;
const REWRITE_MAX_TOKENS: u32 = 2000;

const FALLBACK_MATCH_SCORE: u8 = 5;
const MIN_MATCH_SCORE: i64 = 1;
const MAX_MATCH_SCORE: i64 = 10;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub match_score: u8, // 1 – 10
    pub reasoning: String,
    pub summary: String,
    pub strengths: Vec<String>,
    pub gaps: Vec<String>,
}

/// Raw model reply before the score is clamped.
#[derive(Debug, Deserialize)]
struct MatchReply {
    match_score: i64,
    #[serde(default)]
    reasoning: String,
    #[serde(default)]
    summary: String,
    #[serde(default)]
    strengths: Vec<String>,
    #[serde(default)]
    gaps: Vec<String>,
}

#[async_trait]
pub trait ResumeAnalyzer: Send + Sync {
    async fn match_score(
        &self,
        resume_text: &str,
        job_description: &str,
        job_title: &str,
    ) -> Result<MatchResult, AppError>;

    async fn missing_keywords(
        &self,
        resume_text: &str,
        job_description: &str,
        max_keywords: usize,
    ) -> Result<Vec<String>, AppError>;

    async fn rewrite_experience(
        &self,
        experience_text: &str,
        job_description: &str,
        missing_keywords: &[String],
    ) -> Result<String, AppError>;
}

pub struct LlmResumeAnalyzer {
    llm: LlmClient,
}

impl LlmResumeAnalyzer {
    pub fn new(llm: LlmClient) -> Self {
        Self { llm }
    }
}

#[async_trait]
impl ResumeAnalyzer for LlmResumeAnalyzer {
    async fn match_score(
        &self,
        resume_text: &str,
        job_description: &str,
        job_title: &str,
    ) -> Result<MatchResult, AppError> {
        let prompt = build_match_prompt(resume_text, job_description, job_title);
        let reply = self
            .llm
            .call_text(&prompt, JSON_ONLY_SYSTEM, MATCH_SCORE_MAX_TOKENS)
            .await
            .map_err(|e| AppError::Llm(format!("Failed to score resume match: {e}")))?;

        let result = parse_match_result(&reply);
        debug!(score = result.match_score, "Match score computed");
        Ok(result)
    }

    async fn missing_keywords(
        &self,
        resume_text: &str,
        job_description: &str,
        max_keywords: usize,
    ) -> Result<Vec<String>, AppError> {
        let prompt = build_keywords_prompt(resume_text, job_description, max_keywords);
        let reply = self
            .llm
            .call_text(&prompt, JSON_ONLY_SYSTEM, KEYWORDS_MAX_TOKENS)
            .await
            .map_err(|e| AppError::Llm(format!("Failed to extract keywords: {e}")))?;

        Ok(parse_keywords(&reply, max_keywords))
    }

    async fn rewrite_experience(
        &self,
        experience_text: &str,
        job_description: &str,
        missing_keywords: &[String],
    ) -> Result<String, AppError> {
        let prompt = build_rewrite_prompt(experience_text, job_description, missing_keywords);
        self.llm
            .call_text(&prompt, RESUME_WRITER_SYSTEM, REWRITE_MAX_TOKENS)
            .await
            .map_err(|e| AppError::Llm(format!("Failed to rewrite experience: {e}")))
    }
}

pub fn build_match_prompt(resume_text: &str, job_description: &str, job_title: &str) -> String {
    fill_template(
        MATCH_SCORE_PROMPT,
        &[
            ("{job_title}", job_title),
            ("{job_description}", job_description),
            ("{resume_text}", resume_text),
        ],
    )
}

pub fn build_keywords_prompt(resume_text: &str, job_description: &str, max_keywords: usize) -> String {
    let max_keywords = max_keywords.to_string();
    fill_template(
        MISSING_KEYWORDS_PROMPT,
        &[
            ("{max_keywords}", max_keywords.as_str()),
            ("{job_description}", job_description),
            ("{resume_text}", resume_text),
        ],
    )
}

pub fn build_rewrite_prompt(
    experience_text: &str,
    job_description: &str,
    missing_keywords: &[String],
) -> String {
    let keywords = rewrite_keywords(missing_keywords).join(", ");
    fill_template(
        REWRITE_EXPERIENCE_PROMPT,
        &[
            ("{keywords}", keywords.as_str()),
            ("{job_description}", job_description),
            ("{experience_text}", experience_text),
        ],
    )
}

/// Substitutes placeholders in a single left-to-right pass. Substituted text
/// is never rescanned, so braces inside user input stay literal.
fn fill_template(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let tail = &rest[start..];
        match values.iter().find(|(placeholder, _)| tail.starts_with(placeholder)) {
            Some((placeholder, value)) => {
                out.push_str(value);
                rest = &tail[placeholder.len()..];
            }
            None => {
                out.push('{');
                rest = &tail[1..];
            }
        }
    }

    out.push_str(rest);
    out
}

pub fn rewrite_keywords(missing_keywords: &[String]) -> &[String] {
    &missing_keywords[..missing_keywords.len().min(MAX_REWRITE_KEYWORDS)]
}

/// Parses the match reply. A reply that is not the requested JSON still
/// yields a result: a neutral score with the raw text as reasoning.
pub fn parse_match_result(reply: &str) -> MatchResult {
    match parse_json_reply::<MatchReply>(reply) {
        Ok(parsed) => MatchResult {
            match_score: parsed.match_score.clamp(MIN_MATCH_SCORE, MAX_MATCH_SCORE) as u8,
            reasoning: parsed.reasoning,
            summary: parsed.summary,
            strengths: parsed.strengths,
            gaps: parsed.gaps,
        },
        Err(e) => {
            warn!("Match reply was not valid JSON, using fallback: {e}");
            MatchResult {
                match_score: FALLBACK_MATCH_SCORE,
                reasoning: reply.to_string(),
                summary: "Analysis completed".to_string(),
                strengths: vec![],
                gaps: vec![],
            }
        }
    }
}

/// Parses the keyword reply as a JSON array, falling back to one keyword per
/// line with list markers and numbering stripped.
pub fn parse_keywords(reply: &str, max_keywords: usize) -> Vec<String> {
    match parse_json_reply::<Vec<String>>(reply) {
        Ok(keywords) => keywords.into_iter().take(max_keywords).collect(),
        Err(e) => {
            warn!("Keyword reply was not a JSON array, parsing lines: {e}");
            reply
                .lines()
                .map(|line| {
                    line.trim_start_matches(|c: char| {
                        matches!(c, '-' | '"' | '\'' | '[' | ']' | '•' | '.') || c.is_ascii_digit()
                    })
                    .trim()
                })
                .filter(|k| !k.is_empty())
                .take(max_keywords)
                .map(String::from)
                .collect()
        }
    }
}
