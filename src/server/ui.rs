// Embedded single-page UI

use axum::response::Html;

const UI_HTML: &str = include_str!("ui.html");

/// Handler for GET /: the workshop demo page.
pub async fn index_handler() -> Html<&'static str> {
    Html(UI_HTML)
}
