use std::sync::Arc;

use crate::analysis::service::ResumeAnalyzer;
use crate::config::Config;
use crate::scanner::AtsScanner;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Stateless; constructed once at startup.
    pub scanner: AtsScanner,
    /// Pluggable analysis backend. Default: `LlmResumeAnalyzer`.
    pub analyzer: Arc<dyn ResumeAnalyzer>,
}

#[cfg(test)]
pub fn test_state() -> AppState {
    use crate::analysis::service::stub::StubAnalyzer;

    AppState {
        config: Config {
            anthropic_api_key: "test-key".to_string(),
            port: 0,
            rust_log: "debug".to_string(),
            max_upload_bytes: 1024 * 1024,
            cors_origins: vec![],
        },
        scanner: AtsScanner::new(),
        analyzer: Arc::new(StubAnalyzer),
    }
}
