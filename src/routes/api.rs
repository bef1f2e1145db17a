use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};

use homeops_api::doctor::DoctorResponse;

use crate::doctor;
use crate::server::appstate::AppState;

async fn get_report(State(state): State<AppState>) -> Json<DoctorResponse> {
    let source = state.source();
    Json(doctor::diagnose(source.as_ref(), state.uptime()).await)
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/report", get(get_report))
        .route("/doctor", get(get_report))
}
