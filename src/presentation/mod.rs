// Presentation layer - HTTP routes over the shared page view
pub mod app_state;
pub mod handlers;
pub mod page;

use crate::presentation::app_state::AppState;
use crate::presentation::handlers::{dashboard_view, health_check, index, threshold};
use axum::{Router, routing::get};
use std::sync::Arc;
use tower_http::compression::CompressionLayer;
use tower_http::trace::TraceLayer;

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/healthz", get(health_check))
        .route("/api/dashboard", get(dashboard_view))
        .route("/api/thresholds/:metric", get(threshold))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
