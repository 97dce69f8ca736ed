use axum::Json;
use serde_json::{json, Value};

/// GET /health
/// Liveness probe.
pub async fn health_handler() -> Json<Value> {
    Json(json!({ "ok": true }))
}
