pub mod health;
pub mod index;

use axum::{
    extract::DefaultBodyLimit,
    http::Uri,
    routing::{get, post},
    Router,
};

use crate::errors::AppError;
use crate::state::AppState;
use crate::suggestions::handlers;

async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound(format!("No route for {}", uri.path()))
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index::index_handler))
        .route("/health", get(health::health_handler))
        // no size cap: every body, however large, must still get a 200
        .route(
            "/generate",
            post(handlers::handle_generate).layer(DefaultBodyLimit::disable()),
        )
        .fallback(not_found)
        .with_state(state)
}
