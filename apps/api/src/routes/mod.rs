pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::analysis::handlers as analysis;
use crate::scanner::handlers as scanner;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let upload_limit = DefaultBodyLimit::max(state.config.max_upload_bytes);

    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/scan", post(scanner::handle_scan))
        .route(
            "/api/v1/analysis",
            post(analysis::handle_analysis).layer(upload_limit),
        )
        .route("/api/v1/optimizer/rewrite", post(analysis::handle_rewrite))
        .with_state(state)
}
