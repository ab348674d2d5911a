use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::scanner::ScanError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    High,
    Medium,
    Low,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::High => "high",
            Severity::Medium => "medium",
            Severity::Low => "low",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unknown severity labels are rejected instead of being treated as `Low`.
impl FromStr for Severity {
    type Err = ScanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "high" => Ok(Severity::High),
            "medium" => Ok(Severity::Medium),
            "low" => Ok(Severity::Low),
            other => Err(ScanError::InvalidInput(format!(
                "unknown severity '{other}'"
            ))),
        }
    }
}

/// Closed set of finding categories. Serialized as the display label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IssueCategory {
    #[serde(rename = "File Format")]
    FileFormat,
    #[serde(rename = "File Size")]
    FileSize,
    #[serde(rename = "Missing Section")]
    MissingSection,
    #[serde(rename = "Contact Info")]
    ContactInfo,
    #[serde(rename = "Content Length")]
    ContentLength,
    #[serde(rename = "Special Characters")]
    SpecialCharacters,
}

impl IssueCategory {
    pub fn label(&self) -> &'static str {
        match self {
            IssueCategory::FileFormat => "File Format",
            IssueCategory::FileSize => "File Size",
            IssueCategory::MissingSection => "Missing Section",
            IssueCategory::ContactInfo => "Contact Info",
            IssueCategory::ContentLength => "Content Length",
            IssueCategory::SpecialCharacters => "Special Characters",
        }
    }
}

impl fmt::Display for IssueCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A single detected problem. Issues and warnings share this shape; which
/// list a finding lands in decides how it is scored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    pub category: IssueCategory,
    pub severity: Severity,
    pub description: String,
    pub recommendation: String,
}

pub type Issue = Finding;
pub type Warning = Finding;

impl Finding {
    pub fn new(
        category: IssueCategory,
        severity: Severity,
        description: impl Into<String>,
        recommendation: impl Into<String>,
    ) -> Self {
        Self {
            category,
            severity,
            description: description.into(),
            recommendation: recommendation.into(),
        }
    }
}

/// Request body for a standalone scan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanInput {
    pub file_size_bytes: u64,
    pub file_extension: String,
    pub resume_text: String,
}

impl ScanInput {
    pub fn validate(&self) -> Result<(), ScanError> {
        if self.file_extension.trim().trim_start_matches('.').is_empty() {
            return Err(ScanError::InvalidInput(
                "file_extension cannot be empty".to_string(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanReport {
    pub compatibility_score: u8, // 0 – 100
    pub total_issues: usize,
    pub total_warnings: usize,
    pub issues: Vec<Issue>,
    pub warnings: Vec<Warning>,
    pub recommendations: Vec<String>,
}
