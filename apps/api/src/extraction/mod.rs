//! Resume text extraction: PDF / DOCX bytes → plain UTF-8 text plus
//! best-effort contact metadata and a coarse section split.
//!
//! Extraction failures are their own error kind and never reach the scanner.

pub mod metadata;
pub mod sections;

use serde::Serialize;
use thiserror::Error;
use tracing::debug;

use crate::scanner::checks::{count_words, normalize_extension};

pub use metadata::{extract_metadata, ResumeMetadata};
pub use sections::{extract_sections, ResumeSection};

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(String),

    #[error("Error parsing {format}: {message}")]
    Corrupt { format: &'static str, message: String },

    #[error("Extraction task failed: {0}")]
    Task(String),
}

#[derive(Debug, Clone, Serialize)]
pub struct ExtractedResume {
    pub raw_text: String,
    pub metadata: ResumeMetadata,
    pub sections: Vec<ResumeSection>,
    pub word_count: usize,
}

impl ExtractedResume {
    pub fn from_text(raw_text: String) -> Self {
        let metadata = extract_metadata(&raw_text);
        let sections = extract_sections(&raw_text);
        let word_count = count_words(&raw_text);
        Self {
            raw_text,
            metadata,
            sections,
            word_count,
        }
    }
}

/// Extracts text from an uploaded document, dispatching on its extension.
pub fn extract_document(data: &[u8], extension: &str) -> Result<ExtractedResume, ExtractionError> {
    let ext = normalize_extension(extension);
    let text = match ext.as_str() {
        ".pdf" => extract_text_from_pdf(data)?,
        ".docx" | ".doc" => extract_text_from_docx(data)?,
        _ => return Err(ExtractionError::UnsupportedFormat(ext)),
    };

    debug!(format = %ext, chars = text.len(), "Extracted resume text");
    Ok(ExtractedResume::from_text(text))
}

/// Runs `extract_document` on the blocking pool; PDF parsing is CPU-bound.
pub async fn extract_document_blocking(
    data: bytes::Bytes,
    extension: String,
) -> Result<ExtractedResume, ExtractionError> {
    tokio::task::spawn_blocking(move || extract_document(&data, &extension))
        .await
        .map_err(|e| ExtractionError::Task(e.to_string()))?
}

fn extract_text_from_pdf(data: &[u8]) -> Result<String, ExtractionError> {
    pdf_extract::extract_text_from_mem(data)
        .map(|text| text.trim().to_string())
        .map_err(|e| ExtractionError::Corrupt {
            format: "PDF",
            message: e.to_string(),
        })
}

fn extract_text_from_docx(data: &[u8]) -> Result<String, ExtractionError> {
    use docx_rs::{DocumentChild, ParagraphChild, RunChild};

    let docx = docx_rs::read_docx(data).map_err(|e| ExtractionError::Corrupt {
        format: "DOCX",
        message: e.to_string(),
    })?;

    let mut text = String::new();
    for child in docx.document.children {
        if let DocumentChild::Paragraph(paragraph) = child {
            for paragraph_child in &paragraph.children {
                if let ParagraphChild::Run(run) = paragraph_child {
                    for run_child in &run.children {
                        if let RunChild::Text(t) = run_child {
                            text.push_str(&t.text);
                        }
                    }
                }
            }
            text.push('\n');
        }
    }

    Ok(text.trim().to_string())
}
