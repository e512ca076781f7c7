use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A single gift idea. Field order is the serialized order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    pub name: String,
    pub description: String,
    pub search_term: String,
}

impl Suggestion {
    pub fn new(name: &str, description: &str, search_term: &str) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            search_term: search_term.to_string(),
        }
    }
}

/// Inbound request, built from untrusted input. Every field is trimmed and
/// defaults to an empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SuggestionRequest {
    pub occasion: String,
    pub budget: String,
    pub interests: String,
}

impl SuggestionRequest {
    /// Lenient body parsing: an empty, malformed, or non-object body reads as `{}`,
    /// and a field that is missing or not a string reads as `""`.
    pub fn from_body(body: &[u8]) -> Self {
        let object = match serde_json::from_slice::<Value>(body) {
            Ok(Value::Object(map)) => map,
            _ => Map::new(),
        };

        Self {
            occasion: string_field(&object, "occasion"),
            budget: string_field(&object, "budget"),
            interests: string_field(&object, "interests"),
        }
    }
}

fn string_field(object: &Map<String, Value>, key: &str) -> String {
    object
        .get(key)
        .and_then(Value::as_str)
        .map(|s| s.trim().to_string())
        .unwrap_or_default()
}

#[derive(Debug, Serialize)]
pub struct SuggestionsResponse {
    pub suggestions: Vec<Suggestion>,
}
