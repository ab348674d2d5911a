use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::scanner::checks::EMAIL_PATTERN;

lazy_static! {
    static ref PHONE_PATTERN: Regex =
        Regex::new(r"(\+\d{1,3}[-.\s]?)?\(?\d{3}\)?[-.\s]?\d{3}[-.\s]?\d{4}").unwrap();
    static ref LINKEDIN_PATTERN: Regex = Regex::new(r"linkedin\.com/in/[\w-]+").unwrap();
}

/// Contact details found in the resume text. First match wins for each field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResumeMetadata {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub linkedin: Option<String>,
}

pub fn extract_metadata(text: &str) -> ResumeMetadata {
    ResumeMetadata {
        email: EMAIL_PATTERN.find(text).map(|m| m.as_str().to_string()),
        phone: PHONE_PATTERN.find(text).map(|m| m.as_str().to_string()),
        // Profile slugs are case-insensitive; report the lower-cased form.
        linkedin: LINKEDIN_PATTERN
            .find(&text.to_lowercase())
            .map(|m| m.as_str().to_string()),
    }
}
