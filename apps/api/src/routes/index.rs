use axum::response::Html;

pub(crate) const INDEX_HTML: &str = include_str!("../../templates/index.html");

/// GET /
pub async fn index_handler() -> Html<&'static str> {
    Html(INDEX_HTML)
}
