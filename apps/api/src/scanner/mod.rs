//! ATS compatibility scanner.
//!
//! Deterministic, rule-based scoring over a resume's file characteristics and
//! extracted text. Checks run in a fixed order (file format, structure,
//! content), each contributing issues or warnings, and the report's score and
//! recommendations are derived from those findings alone. No network, no
//! shared state: one `AtsScanner` can serve any number of concurrent scans.

pub mod checks;
pub mod handlers;
pub mod models;
pub mod scoring;

use std::path::Path;

use thiserror::Error;
use tracing::debug;

use crate::scanner::checks::{check_content, check_file_format, check_structure};
use crate::scanner::models::{ScanInput, ScanReport};
use crate::scanner::scoring::{build_recommendations, compute_score};

#[derive(Debug, Error)]
pub enum ScanError {
    #[error("Invalid scan input: {0}")]
    InvalidInput(String),

    #[error("Cannot read resume file {path}: {source}")]
    Storage {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Clone, Copy, Default)]
pub struct AtsScanner;

impl AtsScanner {
    pub fn new() -> Self {
        Self
    }

    /// Scans a resume. Never fails: an empty text is valid input and simply
    /// scores low.
    pub fn scan(&self, file_size_bytes: u64, file_extension: &str, resume_text: &str) -> ScanReport {
        let mut issues = Vec::new();
        let mut warnings = Vec::new();

        issues.extend(check_file_format(file_size_bytes, file_extension));
        issues.extend(check_structure(resume_text));
        warnings.extend(check_content(resume_text));

        let compatibility_score = compute_score(&issues, &warnings, resume_text);
        let recommendations = build_recommendations(&issues, &warnings);

        debug!(
            score = compatibility_score,
            issues = issues.len(),
            warnings = warnings.len(),
            "ATS scan complete"
        );

        ScanReport {
            compatibility_score,
            total_issues: issues.len(),
            total_warnings: warnings.len(),
            issues,
            warnings,
            recommendations,
        }
    }

    pub fn scan_input(&self, input: &ScanInput) -> Result<ScanReport, ScanError> {
        input.validate()?;
        Ok(self.scan(
            input.file_size_bytes,
            &input.file_extension,
            &input.resume_text,
        ))
    }

    /// Stats the file once for its size and takes the extension from its
    /// name. A missing or unreadable file is a storage error, not a finding.
    #[allow(dead_code)]
    pub fn scan_path(&self, path: &Path, resume_text: &str) -> Result<ScanReport, ScanError> {
        let metadata = std::fs::metadata(path).map_err(|source| ScanError::Storage {
            path: path.display().to_string(),
            source,
        })?;
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default();

        Ok(self.scan(metadata.len(), extension, resume_text))
    }
}
