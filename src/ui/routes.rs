use crate::ui::handlers::{self, UiState};
use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;

/// Build the dashboard UI router
pub fn build_ui_router(state: UiState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/api/eda", get(handlers::eda_report))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}
