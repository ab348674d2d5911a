//! Axum route handlers for the analysis pipeline.

use std::path::Path;

use axum::{
    extract::{Multipart, State},
    Json,
};
use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::analysis::service::{rewrite_keywords, DEFAULT_MAX_KEYWORDS};
use crate::errors::AppError;
use crate::extraction::{extract_document_blocking, ResumeMetadata, ResumeSection};
use crate::scanner::checks::{normalize_extension, SUPPORTED_EXTENSIONS};
use crate::scanner::models::{Issue, ScanReport, Warning};
use crate::state::AppState;

const MIN_JOB_DESCRIPTION_CHARS: usize = 10;
const MATCH_SCORE_OUT_OF: u8 = 10;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug)]
pub struct UploadedResume {
    pub file_name: String,
    pub data: Bytes,
}

/// Raw multipart fields as received.
#[derive(Debug, Default)]
pub struct AnalysisForm {
    pub resume: Option<UploadedResume>,
    pub job_title: Option<String>,
    pub job_description: Option<String>,
    pub company_name: Option<String>,
}

#[derive(Debug)]
pub struct AnalysisRequest {
    pub resume: UploadedResume,
    pub extension: String,
    pub job_title: String,
    pub job_description: String,
    pub company_name: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct MatchScoreSummary {
    pub score: u8,
    pub out_of: u8,
    pub percentage: u16,
    pub reasoning: String,
    pub summary: String,
}

#[derive(Debug, Serialize)]
pub struct AtsCompatibility {
    pub score: u8,
    pub total_issues: usize,
    pub total_warnings: usize,
    pub issues: Vec<Issue>,
    pub warnings: Vec<Warning>,
    pub recommendations: Vec<String>,
}

impl From<ScanReport> for AtsCompatibility {
    fn from(report: ScanReport) -> Self {
        Self {
            score: report.compatibility_score,
            total_issues: report.total_issues,
            total_warnings: report.total_warnings,
            issues: report.issues,
            warnings: report.warnings,
            recommendations: report.recommendations,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct AnalysisResponse {
    pub analysis_id: Uuid,
    pub resume_filename: String,
    pub job_title: String,
    pub company_name: Option<String>,
    pub match_score: MatchScoreSummary,
    pub strengths: Vec<String>,
    pub gaps: Vec<String>,
    pub missing_keywords: Vec<String>,
    pub ats_compatibility: AtsCompatibility,
    pub resume_metadata: ResumeMetadata,
    pub resume_sections: Vec<ResumeSection>,
    pub word_count: usize,
    pub analyzed_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct RewriteRequest {
    pub experience_text: String,
    pub job_description: String,
    #[serde(default)]
    pub missing_keywords: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct RewriteResponse {
    pub original: String,
    pub rewritten: String,
    pub keywords_integrated: Vec<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Form parsing and validation
// ────────────────────────────────────────────────────────────────────────────

async fn read_analysis_form(mut multipart: Multipart) -> Result<AnalysisForm, AppError> {
    let mut form = AnalysisForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(e.body_text()))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "resume" => {
                let file_name = field.file_name().unwrap_or_default().to_string();
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::Validation(e.body_text()))?;
                form.resume = Some(UploadedResume { file_name, data });
            }
            "job_title" | "job_description" | "company_name" => {
                let value = field
                    .text()
                    .await
                    .map_err(|e| AppError::Validation(e.body_text()))?;
                match name.as_str() {
                    "job_title" => form.job_title = Some(value),
                    "job_description" => form.job_description = Some(value),
                    _ => form.company_name = Some(value),
                }
            }
            // Unknown fields are ignored.
            _ => {}
        }
    }

    Ok(form)
}

impl AnalysisForm {
    pub fn validate(self) -> Result<AnalysisRequest, AppError> {
        let job_title = self
            .job_title
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .ok_or_else(|| AppError::Validation("Job title is required".to_string()))?;

        let job_description = self
            .job_description
            .filter(|d| !d.is_empty())
            .ok_or_else(|| AppError::Validation("Job description is required".to_string()))?;
        if job_description.chars().count() < MIN_JOB_DESCRIPTION_CHARS {
            return Err(AppError::Validation(format!(
                "Job description must be at least {MIN_JOB_DESCRIPTION_CHARS} characters"
            )));
        }

        let company_name = self
            .company_name
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty());

        let resume = self
            .resume
            .ok_or_else(|| AppError::Validation("Resume file is required".to_string()))?;

        let extension = Path::new(&resume.file_name)
            .extension()
            .and_then(|e| e.to_str())
            .map(normalize_extension)
            .unwrap_or_default();
        if !SUPPORTED_EXTENSIONS.contains(&extension.as_str()) {
            return Err(AppError::Validation(format!(
                "Unsupported file type. Allowed: {}",
                SUPPORTED_EXTENSIONS.join(", ")
            )));
        }

        Ok(AnalysisRequest {
            resume,
            extension,
            job_title,
            job_description,
            company_name,
        })
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/analysis
///
/// Full pipeline: extract text → match score + missing keywords → ATS scan.
/// Nothing is persisted; the caller stores the response if it needs to.
pub async fn handle_analysis(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<AnalysisResponse>, AppError> {
    let request = read_analysis_form(multipart).await?.validate()?;
    let file_size_bytes = request.resume.data.len() as u64;

    let extracted =
        extract_document_blocking(request.resume.data.clone(), request.extension.clone()).await?;
    let resume_text = extracted.raw_text.as_str();

    let (match_result, missing_keywords) = tokio::try_join!(
        state
            .analyzer
            .match_score(resume_text, &request.job_description, &request.job_title),
        state
            .analyzer
            .missing_keywords(resume_text, &request.job_description, DEFAULT_MAX_KEYWORDS),
    )?;

    let ats_report = state
        .scanner
        .scan(file_size_bytes, &request.extension, resume_text);

    info!(
        file = %request.resume.file_name,
        match_score = match_result.match_score,
        ats_score = ats_report.compatibility_score,
        "Resume analysis complete"
    );

    Ok(Json(AnalysisResponse {
        analysis_id: Uuid::new_v4(),
        resume_filename: request.resume.file_name,
        job_title: request.job_title,
        company_name: request.company_name,
        match_score: MatchScoreSummary {
            score: match_result.match_score,
            out_of: MATCH_SCORE_OUT_OF,
            percentage: u16::from(match_result.match_score) * 10,
            reasoning: match_result.reasoning,
            summary: match_result.summary,
        },
        strengths: match_result.strengths,
        gaps: match_result.gaps,
        missing_keywords,
        ats_compatibility: ats_report.into(),
        resume_metadata: extracted.metadata,
        resume_sections: extracted.sections,
        word_count: extracted.word_count,
        analyzed_at: Utc::now(),
    }))
}

/// POST /api/v1/optimizer/rewrite
///
/// Rewrites an experience section toward a job description, weaving in up to
/// five missing keywords.
pub async fn handle_rewrite(
    State(state): State<AppState>,
    Json(request): Json<RewriteRequest>,
) -> Result<Json<RewriteResponse>, AppError> {
    if request.experience_text.trim().is_empty() {
        return Err(AppError::Validation(
            "Experience text is required".to_string(),
        ));
    }
    if request.job_description.trim().is_empty() {
        return Err(AppError::Validation(
            "Job description is required".to_string(),
        ));
    }

    let rewritten = state
        .analyzer
        .rewrite_experience(
            &request.experience_text,
            &request.job_description,
            &request.missing_keywords,
        )
        .await?;

    Ok(Json(RewriteResponse {
        keywords_integrated: rewrite_keywords(&request.missing_keywords).to_vec(),
        original: request.experience_text,
        rewritten,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
    };
    use docx_rs::{Docx, Paragraph, Run};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::routes::build_router;
    use crate::state::test_state;

    const BOUNDARY: &str = "resume-test-boundary";

    fn multipart_body(fields: &[(&str, &str)], file: Option<(&str, &[u8])>) -> Vec<u8> {
        let mut body = Vec::new();
        for (name, value) in fields {
            body.extend_from_slice(
                format!(
                    "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
                )
                .as_bytes(),
            );
        }
        if let Some((file_name, data)) = file {
            body.extend_from_slice(
                format!(
                    "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"resume\"; filename=\"{file_name}\"\r\nContent-Type: application/octet-stream\r\n\r\n"
                )
                .as_bytes(),
            );
            body.extend_from_slice(data);
            body.extend_from_slice(b"\r\n");
        }
        body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
        body
    }

    async fn post(uri: &str, content_type: String, body: Vec<u8>) -> (StatusCode, Value) {
        let response = build_router(test_state())
            .oneshot(
                Request::post(uri)
                    .header("content-type", content_type)
                    .body(Body::from(body))
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    async fn post_analysis(body: Vec<u8>) -> (StatusCode, Value) {
        post(
            "/api/v1/analysis",
            format!("multipart/form-data; boundary={BOUNDARY}"),
            body,
        )
        .await
    }

    fn sample_docx(lines: &[&str]) -> Vec<u8> {
        let mut docx = Docx::new();
        for line in lines {
            docx = docx.add_paragraph(Paragraph::new().add_run(Run::new().add_text(*line)));
        }
        let mut cursor = std::io::Cursor::new(Vec::new());
        docx.build().pack(&mut cursor).unwrap();
        cursor.into_inner()
    }

    const JOB_FIELDS: &[(&str, &str)] = &[
        ("job_title", "  Backend Engineer "),
        ("job_description", "Build Rust services on Kubernetes"),
        ("company_name", "   "),
    ];

    #[tokio::test]
    async fn test_docx_upload_runs_full_pipeline() {
        let docx = sample_docx(&[
            "Jane Doe",
            "jane@example.com | linkedin.com/in/janedoe",
            "Experience",
            "Built payment APIs in Rust",
            "Education",
            "BSc Computer Science",
        ]);
        let (status, body) =
            post_analysis(multipart_body(JOB_FIELDS, Some(("jane.docx", docx.as_slice())))).await;

        assert_eq!(status, StatusCode::OK, "{body}");
        assert_eq!(body["resume_filename"], "jane.docx");
        assert_eq!(body["job_title"], "Backend Engineer");
        assert_eq!(body["company_name"], Value::Null);
        assert_eq!(body["match_score"]["score"], 7);
        assert_eq!(body["match_score"]["percentage"], 70);
        assert_eq!(body["missing_keywords"], json!(["kubernetes", "terraform", "grpc"]));
        assert_eq!(body["resume_metadata"]["email"], "jane@example.com");
        assert_eq!(body["word_count"], 15);
        assert_eq!(
            body["resume_sections"],
            json!([
                {"name": "other", "content": "Jane Doe\njane@example.com | linkedin.com/in/janedoe"},
                {"name": "experience", "content": "Built payment APIs in Rust"},
                {"name": "education", "content": "BSc Computer Science"},
            ])
        );

        // Sections and email present; the text is short.
        let ats = &body["ats_compatibility"];
        assert_eq!(ats["total_issues"], 0);
        assert_eq!(ats["total_warnings"], 1);
        assert_eq!(ats["warnings"][0]["category"], "Content Length");
        // 100 - 5 (short) + 5 (@)
        assert_eq!(ats["score"], 100);
    }

    #[tokio::test]
    async fn test_missing_file_is_rejected() {
        let (status, body) = post_analysis(multipart_body(JOB_FIELDS, None)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["message"], "Resume file is required");
    }

    #[tokio::test]
    async fn test_unsupported_upload_extension_is_rejected() {
        let (status, body) =
            post_analysis(multipart_body(JOB_FIELDS, Some(("cv.txt", b"plain".as_slice())))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body["error"]["message"],
            "Unsupported file type. Allowed: .pdf, .docx, .doc"
        );
    }

    #[tokio::test]
    async fn test_short_job_description_is_rejected() {
        let fields = [("job_title", "Engineer"), ("job_description", "Rust")];
        let (status, _) =
            post_analysis(multipart_body(&fields, Some(("cv.pdf", b"%PDF".as_slice())))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_corrupt_pdf_is_unprocessable() {
        let (status, body) =
            post_analysis(multipart_body(JOB_FIELDS, Some(("cv.pdf", b"not a pdf".as_slice())))).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error"]["code"], "EXTRACTION_ERROR");
    }

    #[tokio::test]
    async fn test_rewrite_reports_integrated_keywords() {
        let request = json!({
            "experience_text": "Maintained billing services",
            "job_description": "Platform engineer",
            "missing_keywords": ["a", "b", "c", "d", "e", "f", "g"]
        });
        let (status, body) = post(
            "/api/v1/optimizer/rewrite",
            "application/json".to_string(),
            request.to_string().into_bytes(),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["original"], "Maintained billing services");
        assert_eq!(body["rewritten"], "Maintained billing services [a, b, c, d, e]");
        assert_eq!(body["keywords_integrated"], json!(["a", "b", "c", "d", "e"]));
    }

    #[tokio::test]
    async fn test_rewrite_requires_experience_text() {
        let request = json!({ "experience_text": "  ", "job_description": "Platform engineer" });
        let (status, _) = post(
            "/api/v1/optimizer/rewrite",
            "application/json".to_string(),
            request.to_string().into_bytes(),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_form_validation_trims_and_normalizes() {
        let form = AnalysisForm {
            resume: Some(UploadedResume {
                file_name: "Resume.PDF".to_string(),
                data: Bytes::from_static(b"%PDF"),
            }),
            job_title: Some(" Engineer ".to_string()),
            job_description: Some("Build reliable systems".to_string()),
            company_name: Some(" Acme ".to_string()),
        };
        let request = form.validate().unwrap();
        assert_eq!(request.extension, ".pdf");
        assert_eq!(request.job_title, "Engineer");
        assert_eq!(request.company_name.as_deref(), Some("Acme"));
    }
}
