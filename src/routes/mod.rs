pub mod api;
pub mod dashboard;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::json;

use crate::server::appstate::AppState;

async fn get_healthz() -> Json<serde_json::Value> {
    Json(json!({"ok": true}))
}

async fn not_found() -> Response {
    (StatusCode::NOT_FOUND, Json(json!({"error": "Not found"}))).into_response()
}

pub fn router() -> Router<AppState> {
    Router::new()
        .merge(dashboard::router())
        .nest("/api", api::router())
        .route("/healthz", get(get_healthz))
        .fallback(not_found)
}
