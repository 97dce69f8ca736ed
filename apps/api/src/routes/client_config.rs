use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::state::AppState;

/// Limits the front-end needs to size its candidate list.
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct ClientConfig {
    pub max_total_candidates: u32,
    pub top_n_to_display: u32,
}

/// GET /config
pub async fn client_config_handler(State(state): State<AppState>) -> Json<ClientConfig> {
    Json(ClientConfig {
        max_total_candidates: state.config.max_total_candidates,
        top_n_to_display: state.config.top_n_to_display,
    })
}
