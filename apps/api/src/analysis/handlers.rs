//! Axum route handler for the Analysis API.

use std::any::Any;

use axum::{
    extract::State,
    response::{IntoResponse, Response},
    Json,
};
use bytes::Bytes;
use tracing::{debug, error};

use crate::analysis::{analyze, Analysis, AnalyzeResponse};
use crate::state::AppState;

/// POST /analyze
///
/// Takes the body as raw bytes so that a malformed payload reaches the
/// recovery policy instead of being rejected by the JSON extractor.
/// Always answers 200 with `success: true`.
pub async fn handle_analyze(
    State(state): State<AppState>,
    body: Bytes,
) -> Json<AnalyzeResponse> {
    let analysis = analyze(&body, state.generator.as_ref()).await;
    debug!("Analysis answered from {:?} tier", analysis.source);
    Json(analysis.into())
}

/// Panic handler for the `/analyze` route: logs the panic and answers with the
/// apology summary instead of a 500.
pub fn apology_on_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.as_str()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s
    } else {
        "unknown panic"
    };
    error!("Server exception: {detail}");

    Json(AnalyzeResponse::from(Analysis::apology())).into_response()
}
