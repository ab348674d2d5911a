use axum::{extract::rejection::JsonRejection, extract::State, Json};

use crate::errors::AppError;
use crate::scanner::models::{ScanInput, ScanReport};
use crate::state::AppState;

/// POST /api/v1/scan
///
/// Standalone ATS scan over already-extracted text. Missing or mistyped
/// fields are a 400, not axum's default 422.
pub async fn handle_scan(
    State(state): State<AppState>,
    payload: Result<Json<ScanInput>, JsonRejection>,
) -> Result<Json<ScanReport>, AppError> {
    let Json(input) = payload.map_err(|e| AppError::Validation(e.body_text()))?;
    let report = state.scanner.scan_input(&input)?;
    Ok(Json(report))
}
