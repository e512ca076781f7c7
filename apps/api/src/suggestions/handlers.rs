//! Axum route handlers for gift suggestions.

use axum::{body::Bytes, extract::State, Json};

use crate::state::AppState;
use crate::suggestions::models::{SuggestionRequest, SuggestionsResponse};

/// POST /generate
///
/// Reads `occasion`, `budget` and `interests` from a JSON body and returns
/// `{"suggestions": [...]}`. The body is read raw so that a missing content
/// type, an empty body, or malformed JSON still get a 200 with suggestions.
pub async fn handle_generate(
    State(state): State<AppState>,
    body: Bytes,
) -> Json<SuggestionsResponse> {
    let request = SuggestionRequest::from_body(&body);

    let suggestions = state
        .generator
        .generate(&request.occasion, &request.budget, &request.interests)
        .await;

    Json(SuggestionsResponse { suggestions })
}
