use std::sync::Arc;

use crate::config::Config;
use crate::llm_client::SummaryGenerator;

/// Shared application state injected into all route handlers via Axum extractors.
/// Read-only after startup.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    /// Generation backend. `LlmClient` in production, scripted fakes in tests.
    pub generator: Arc<dyn SummaryGenerator>,
}
