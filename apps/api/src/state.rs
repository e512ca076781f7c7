use crate::suggestions::generator::SuggestionGenerator;

/// Shared application state injected into all route handlers via Axum extractors.
/// Built once at startup and never mutated.
#[derive(Clone)]
pub struct AppState {
    pub generator: SuggestionGenerator,
}
