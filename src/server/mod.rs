pub mod appstate;
pub mod http;

use axum::extract::Request;
use axum::routing::IntoMakeService;
use axum::{Router, ServiceExt};
use tower_http::normalize_path::NormalizePath;
use tower_http::trace::TraceLayer;

use crate::routes;
use crate::server::appstate::AppState;

#[must_use]
pub fn build_router(appstate: AppState) -> Router {
    routes::router()
        .with_state(appstate)
        .layer(TraceLayer::new_for_http())
}

#[must_use]
pub fn build_service(appstate: AppState) -> IntoMakeService<NormalizePath<Router>> {
    let normalized = NormalizePath::trim_trailing_slash(build_router(appstate));
    ServiceExt::<Request>::into_make_service(normalized)
}
