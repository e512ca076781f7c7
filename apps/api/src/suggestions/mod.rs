// Gift suggestion engine: request extraction, prompt building, completion call,
// validation, and the static fallback list.
// All completion calls go through llm_client.

pub mod fallback;
pub mod generator;
pub mod handlers;
pub mod models;
pub mod prompts;
