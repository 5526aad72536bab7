//! GET / — the embedded chat page.

use axum::response::Html;

/// Handler: GET /
///
/// Serves the single-page chat UI baked into the binary, so the server has
/// no static-file directory to configure.
pub async fn home() -> Html<&'static str> {
    Html(include_str!("../../assets/chat.html"))
}
