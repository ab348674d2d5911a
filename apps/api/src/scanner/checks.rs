//! Individual ATS checks. Each check is independent and purely additive:
//! it inspects the input and returns zero or more findings, in a fixed order.

use lazy_static::lazy_static;
use regex::Regex;

use crate::scanner::models::{Finding, Issue, IssueCategory, Severity, Warning};

pub const SUPPORTED_EXTENSIONS: &[&str] = &[".pdf", ".docx", ".doc"];

/// Files below this size are treated as near-empty documents.
pub const MIN_FILE_SIZE_BYTES: u64 = 1000;

pub const MIN_WORD_COUNT: usize = 200;
pub const MAX_WORD_COUNT: usize = 1000;

/// Reported in this order regardless of where they appear in the text.
pub const SPECIAL_CHARACTERS: &[char] = &['©', '®', '™', '★', '→'];

lazy_static! {
    /// Word boundaries are ASCII-only, so a non-ASCII letter touching the
    /// address does not hide it.
    pub static ref EMAIL_PATTERN: Regex = Regex::new(
        r"(?-u:\b)[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}(?-u:\b)"
    )
    .unwrap();

    /// ECMAScript whitespace: includes U+FEFF, excludes U+0085.
    static ref WHITESPACE_RUN: Regex = Regex::new(
        r"[\t\n\x0B\f\r \x{a0}\x{1680}\x{2000}-\x{200a}\x{2028}\x{2029}\x{202f}\x{205f}\x{3000}\x{feff}]+"
    )
    .unwrap();
}

/// Lower-cases the extension and ensures a leading dot: `"PDF"` → `".pdf"`.
/// A blank extension stays blank.
pub fn normalize_extension(extension: &str) -> String {
    let trimmed = extension.trim().trim_start_matches('.');
    if trimmed.is_empty() {
        return String::new();
    }
    format!(".{}", trimmed.to_lowercase())
}

/// Number of whitespace-delimited, non-empty tokens.
pub fn count_words(text: &str) -> usize {
    WHITESPACE_RUN.split(text).filter(|t| !t.is_empty()).count()
}

/// Number of pieces produced by splitting on whitespace runs, empty pieces
/// included. `""` is one token and surrounding whitespace adds an empty token
/// on each side. Only the score bonus uses this count.
pub fn count_raw_tokens(text: &str) -> usize {
    WHITESPACE_RUN.split(text).count()
}

pub fn check_file_format(file_size_bytes: u64, extension: &str) -> Vec<Issue> {
    let mut issues = Vec::new();
    let ext = normalize_extension(extension);

    if !SUPPORTED_EXTENSIONS.contains(&ext.as_str()) {
        issues.push(Finding::new(
            IssueCategory::FileFormat,
            Severity::High,
            format!("Unsupported format: {ext}"),
            "Use PDF or DOCX format",
        ));
    }

    if file_size_bytes < MIN_FILE_SIZE_BYTES {
        issues.push(Finding::new(
            IssueCategory::FileSize,
            Severity::High,
            "File appears to be empty or too small",
            "Ensure resume has sufficient content",
        ));
    }

    issues
}

pub fn check_structure(text: &str) -> Vec<Issue> {
    let mut issues = Vec::new();
    let lower = text.to_lowercase();

    if !lower.contains("experience") && !lower.contains("work") {
        issues.push(Finding::new(
            IssueCategory::MissingSection,
            Severity::High,
            "No 'Experience' section found",
            "Add a clearly labeled 'Professional Experience' section",
        ));
    }

    if !lower.contains("education") {
        issues.push(Finding::new(
            IssueCategory::MissingSection,
            Severity::Medium,
            "No 'Education' section found",
            "Add a clearly labeled 'Education' section",
        ));
    }

    if !EMAIL_PATTERN.is_match(text) {
        issues.push(Finding::new(
            IssueCategory::ContactInfo,
            Severity::High,
            "No email address found",
            "Include your email address in the contact section",
        ));
    }

    issues
}

pub fn check_content(text: &str) -> Vec<Warning> {
    let mut warnings = Vec::new();
    let word_count = count_words(text);

    if word_count < MIN_WORD_COUNT {
        warnings.push(Finding::new(
            IssueCategory::ContentLength,
            Severity::Medium,
            format!("Resume is short ({word_count} words)"),
            "Expand with more details about your experience and skills",
        ));
    }

    if word_count > MAX_WORD_COUNT {
        warnings.push(Finding::new(
            IssueCategory::ContentLength,
            Severity::Low,
            format!("Resume is long ({word_count} words)"),
            "Consider condensing to 1-2 pages for better ATS parsing",
        ));
    }

    let found: Vec<String> = SPECIAL_CHARACTERS
        .iter()
        .filter(|c| text.contains(**c))
        .map(|c| c.to_string())
        .collect();
    if !found.is_empty() {
        warnings.push(Finding::new(
            IssueCategory::SpecialCharacters,
            Severity::Low,
            format!("Special characters found: {}", found.join(" ")),
            "Replace with standard text equivalents",
        ));
    }

    warnings
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(n: usize) -> String {
        vec!["word"; n].join(" ")
    }

    #[test]
    fn test_normalize_extension() {
        assert_eq!(normalize_extension("PDF"), ".pdf");
        assert_eq!(normalize_extension(".Docx"), ".docx");
        assert_eq!(normalize_extension("  "), "");
    }

    #[test]
    fn test_supported_formats_pass() {
        for ext in ["pdf", ".docx", "DOC"] {
            assert!(check_file_format(5000, ext).is_empty(), "{ext} flagged");
        }
    }

    #[test]
    fn test_unsupported_format_is_high_issue() {
        let issues = check_file_format(5000, ".TXT");
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].category, IssueCategory::FileFormat);
        assert_eq!(issues[0].severity, Severity::High);
        assert_eq!(issues[0].description, "Unsupported format: .txt");
        assert_eq!(issues[0].recommendation, "Use PDF or DOCX format");
    }

    #[test]
    fn test_small_file_is_flagged() {
        let issues = check_file_format(999, "pdf");
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].category, IssueCategory::FileSize);

        assert!(check_file_format(1000, "pdf").is_empty());
    }

    #[test]
    fn test_format_issue_precedes_size_issue() {
        let issues = check_file_format(10, "rtf");
        let categories: Vec<_> = issues.iter().map(|i| i.category).collect();
        assert_eq!(
            categories,
            vec![IssueCategory::FileFormat, IssueCategory::FileSize]
        );
    }

    #[test]
    fn test_work_counts_as_experience_section() {
        let issues = check_structure("WORK HISTORY\nEducation\njane@example.com");
        assert!(issues.is_empty(), "{issues:?}");
    }

    #[test]
    fn test_missing_sections_and_email() {
        let issues = check_structure("Skills: Rust, Go");
        let severities: Vec<_> = issues.iter().map(|i| i.severity).collect();
        assert_eq!(
            severities,
            vec![Severity::High, Severity::Medium, Severity::High]
        );
        assert_eq!(issues[2].category, IssueCategory::ContactInfo);
    }

    #[test]
    fn test_email_requires_two_letter_tld() {
        assert!(!EMAIL_PATTERN.is_match("jane@example.c"));
        assert!(EMAIL_PATTERN.is_match("reach me at jane.doe+jobs@mail.example.io"));
    }

    #[test]
    fn test_email_found_next_to_non_ascii_letters() {
        for text in [
            "邮箱jane@example.com Experience Education",
            "jane@example.comé Experience Education",
        ] {
            let issues = check_structure(text);
            assert!(
                issues.iter().all(|i| i.category != IssueCategory::ContactInfo),
                "{text}: {issues:?}"
            );
        }
    }

    #[test]
    fn test_short_resume_warning() {
        let warnings = check_content("");
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].severity, Severity::Medium);
        assert_eq!(warnings[0].description, "Resume is short (0 words)");
    }

    #[test]
    fn test_word_count_boundaries() {
        assert_eq!(check_content(&words(199)).len(), 1);
        assert!(check_content(&words(200)).is_empty());
        assert!(check_content(&words(1000)).is_empty());

        let long = check_content(&words(1001));
        assert_eq!(long.len(), 1);
        assert_eq!(long[0].severity, Severity::Low);
        assert_eq!(long[0].description, "Resume is long (1001 words)");
    }

    #[test]
    fn test_special_characters_listed_in_fixed_order() {
        let text = format!("{} → ★ © again ©", words(300));
        let warnings = check_content(&text);
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].category, IssueCategory::SpecialCharacters);
        assert_eq!(warnings[0].description, "Special characters found: © ★ →");
    }

    #[test]
    fn test_word_counts_differ_on_irregular_whitespace() {
        let text = "  alpha   beta\n\tgamma  ";
        assert_eq!(count_words(text), 3);
        assert_eq!(count_raw_tokens(text), 5);
        assert_eq!(count_raw_tokens(""), 1);
        assert_eq!(count_words(""), 0);
    }

    #[test]
    fn test_byte_order_mark_separates_words_but_nel_does_not() {
        assert_eq!(count_words("alpha\u{feff}beta"), 2);
        assert_eq!(count_raw_tokens("\u{feff}alpha"), 2);
        assert_eq!(count_words("alpha\u{85}beta"), 1);
        assert_eq!(count_raw_tokens("alpha\u{85}beta"), 1);
    }
}
