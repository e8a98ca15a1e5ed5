use crate::check::ExpiryView;
use crate::infra::{resolve_today, AppState};
use axum::http::{header, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use ihic::error::AppError;
use ihic::expiry::parse_date;
use ihic::site::INDEX_FILE_NAME;
use serde::Deserialize;
use serde_json::json;
use std::path::{Component, Path, PathBuf};

#[derive(Debug, Deserialize)]
pub(crate) struct ExpiryEvaluateRequest {
    #[serde(default)]
    pub(crate) value: String,
    #[serde(default)]
    pub(crate) today: Option<String>,
}

pub(crate) fn site_router() -> Router {
    Router::new()
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .route("/api/v1/expiry/evaluate", post(evaluate_expiry_endpoint))
        .fallback(static_page)
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn evaluate_expiry_endpoint(
    Json(payload): Json<ExpiryEvaluateRequest>,
) -> Result<Json<ExpiryView>, AppError> {
    let ExpiryEvaluateRequest { value, today } = payload;

    let today = match today.as_deref() {
        Some(raw) => parse_date(Some(raw))?,
        None => resolve_today(None),
    };

    Ok(Json(ExpiryView::evaluate(&value, today)))
}

pub(crate) async fn static_page(Extension(state): Extension<AppState>, uri: Uri) -> Response {
    let Some(relative) = site_relative_path(uri.path()) else {
        return not_found();
    };

    let path = state.site_dir.join(relative);
    match tokio::fs::read(&path).await {
        Ok(bytes) => {
            let mime = mime_guess::from_path(&path).first_or_octet_stream();
            (
                StatusCode::OK,
                [(header::CONTENT_TYPE, mime.essence_str().to_string())],
                bytes,
            )
                .into_response()
        }
        Err(_) => not_found(),
    }
}

fn not_found() -> Response {
    (StatusCode::NOT_FOUND, "page not found").into_response()
}

// Only plain path segments are allowed; `..`, roots and prefixes never reach
// the filesystem.
fn site_relative_path(request_path: &str) -> Option<PathBuf> {
    let trimmed = request_path.trim_start_matches('/');
    let relative = if trimmed.is_empty() {
        INDEX_FILE_NAME
    } else {
        trimmed
    };

    let mut resolved = PathBuf::new();
    for component in Path::new(relative).components() {
        match component {
            Component::Normal(part) => resolved.push(part),
            _ => return None,
        }
    }

    if resolved.as_os_str().is_empty() {
        None
    } else {
        Some(resolved)
    }
}
