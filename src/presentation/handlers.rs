// HTTP request handlers
use crate::domain::telemetry::Metric;
use crate::domain::thresholds::{Status, compliance_note, evaluate, who_threshold};
use crate::presentation::app_state::AppState;
use crate::presentation::page::index_html;
use axum::{
    Json,
    extract::{Path, Query, State},
    http::{StatusCode, header},
    response::{Html, IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Deserialize)]
pub struct EvaluateQuery {
    pub value: Option<f64>,
}

#[derive(Serialize)]
pub struct ThresholdResponse {
    pub metric: Metric,
    pub label: &'static str,
    pub min: Option<f64>,
    pub max: f64,
    pub value: Option<f64>,
    pub status: Option<Status>,
    pub note: Option<String>,
}

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

/// Dashboard page
pub async fn index(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    (
        [(header::CACHE_CONTROL, "no-cache")],
        Html(index_html(state.poll_interval_ms)),
    )
}

/// Current page view: slots, charts and the last cycle outcome
pub async fn dashboard_view(State(state): State<Arc<AppState>>) -> Response {
    let page = state.page.read().await;
    ([(header::CACHE_CONTROL, "no-store")], Json(&*page)).into_response()
}

/// WHO range for a metric, optionally evaluating `?value=`
pub async fn threshold(
    Path(key): Path<String>,
    Query(query): Query<EvaluateQuery>,
) -> Response {
    let metric: Metric = match key.parse() {
        Ok(metric) => metric,
        Err(e) => return (StatusCode::NOT_FOUND, e.to_string()).into_response(),
    };
    let range = who_threshold(metric);

    Json(ThresholdResponse {
        metric,
        label: metric.label(),
        min: range.min,
        max: range.max,
        value: query.value,
        status: query.value.map(|v| evaluate(metric, v)),
        note: query.value.map(|v| compliance_note(metric, v)),
    })
    .into_response()
}
