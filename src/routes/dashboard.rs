use axum::Router;
use axum::response::Html;
use axum::routing::get;

use crate::server::appstate::AppState;

const INDEX_HTML: &str = include_str!("dashboard.html");

async fn get_index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_index))
        .route("/index.html", get(get_index))
}
