use serde::{Deserialize, Serialize};

const SECTION_HEADERS: &[&str] = &["experience", "education", "skills", "summary"];

/// Header lines are short; anything longer is body text that happens to
/// mention a header word.
const MAX_HEADER_CHARS: usize = 50;

const PREAMBLE_SECTION: &str = "other";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResumeSection {
    pub name: String,
    pub content: String,
}

/// Splits resume text into coarse sections keyed by the first recognised
/// header word on each short line. Text before the first header lands in
/// `"other"`. A repeated header replaces the earlier section's content but
/// keeps its position.
pub fn extract_sections(text: &str) -> Vec<ResumeSection> {
    let mut sections: Vec<ResumeSection> = Vec::new();
    let mut current = PREAMBLE_SECTION;
    let mut content: Vec<&str> = Vec::new();

    for line in text.lines() {
        let trimmed = line.trim();
        let lower = trimmed.to_lowercase();

        let header = SECTION_HEADERS
            .iter()
            .find(|h| lower.contains(**h) && trimmed.chars().count() < MAX_HEADER_CHARS);

        match header {
            Some(header) => {
                if !content.is_empty() {
                    upsert(&mut sections, current, &content);
                }
                current = *header;
                content.clear();
            }
            None if !trimmed.is_empty() => content.push(line),
            None => {}
        }
    }

    if !content.is_empty() {
        upsert(&mut sections, current, &content);
    }

    sections
}

fn upsert(sections: &mut Vec<ResumeSection>, name: &str, lines: &[&str]) {
    let content = lines.join("\n").trim().to_string();
    match sections.iter_mut().find(|s| s.name == name) {
        Some(existing) => existing.content = content,
        None => sections.push(ResumeSection {
            name: name.to_string(),
            content,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(sections: &[ResumeSection]) -> Vec<&str> {
        sections.iter().map(|s| s.name.as_str()).collect()
    }

    #[test]
    fn test_splits_on_headers() {
        let text = "Jane Doe\n\nPROFESSIONAL EXPERIENCE\nAcme Corp\n  Shipped v2\nEducation\nBSc CS\nSkills\nRust, SQL";
        let sections = extract_sections(text);
        assert_eq!(names(&sections), vec!["other", "experience", "education", "skills"]);
        assert_eq!(sections[1].content, "Acme Corp\n  Shipped v2");
    }

    #[test]
    fn test_long_line_is_not_header() {
        let text = "Summary\nI have ten years of experience building distributed systems at scale";
        let sections = extract_sections(text);
        assert_eq!(names(&sections), vec!["summary"]);
    }

    #[test]
    fn test_empty_section_is_dropped() {
        let sections = extract_sections("Experience\nEducation\nMIT");
        assert_eq!(names(&sections), vec!["education"]);
    }

    #[test]
    fn test_repeated_header_overwrites_in_place() {
        let text = "Skills\nGo\nEducation\nMIT\nSkills\nRust";
        let sections = extract_sections(text);
        assert_eq!(names(&sections), vec!["skills", "education"]);
        assert_eq!(sections[0].content, "Rust");
    }

    #[test]
    fn test_empty_text_has_no_sections() {
        assert!(extract_sections("").is_empty());
    }
}
