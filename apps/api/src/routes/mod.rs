pub mod client_config;
pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_http::{catch_panic::CatchPanicLayer, services::ServeDir};

use crate::analysis::handlers::{apology_on_panic, handle_analyze};
use crate::state::AppState;

/// API routes first; anything else is looked up in the static directory,
/// with `/` resolving to its `index.html`.
pub fn build_router(state: AppState) -> Router {
    let static_files = ServeDir::new(&state.config.static_dir);

    Router::new()
        .route("/health", get(health::health_handler))
        .route("/config", get(client_config::client_config_handler))
        .route(
            "/analyze",
            post(handle_analyze)
                .layer::<_, std::convert::Infallible>(DefaultBodyLimit::disable())
                .layer(CatchPanicLayer::custom(apology_on_panic)),
        )
        .fallback_service(static_files)
        .with_state(state)
}
