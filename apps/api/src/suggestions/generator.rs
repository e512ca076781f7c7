//! Suggestion Generator — asks the completion service for gift ideas and
//! falls back to the static list on any failure.
//!
//! Flow: no client? → fallback. Otherwise build prompts → one completion call →
//!       parse JSON → filter-map valid entries → non-empty? serve : fallback.
//!
//! Callers never see an error. Which path produced the list is only visible in logs.

use std::sync::Arc;

use serde_json::Value;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::llm_client::{CompletionService, LlmError};
use crate::suggestions::fallback::fallback_suggestions;
use crate::suggestions::models::Suggestion;
use crate::suggestions::prompts::{build_system_prompt, build_user_prompt};

/// Reasons a completion attempt did not yield servable suggestions.
#[derive(Debug, Error)]
pub enum SuggestionError {
    #[error("completion call failed: {0}")]
    Llm(#[from] LlmError),

    #[error("completion is not valid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("completion JSON is not an array of suggestions")]
    UnexpectedShape,

    #[error("no suggestion in the completion had all required fields")]
    NoValidSuggestions,
}

/// Holds the optional completion client, decided once at startup.
#[derive(Clone)]
pub struct SuggestionGenerator {
    llm: Option<Arc<dyn CompletionService>>,
}

impl SuggestionGenerator {
    pub fn new(llm: Option<Arc<dyn CompletionService>>) -> Self {
        Self { llm }
    }

    /// A generator that always serves the fallback list.
    pub fn disabled() -> Self {
        Self { llm: None }
    }

    pub fn is_llm_enabled(&self) -> bool {
        self.llm.is_some()
    }

    /// Returns gift suggestions for the request. Never fails.
    pub async fn generate(&self, occasion: &str, budget: &str, interests: &str) -> Vec<Suggestion> {
        let Some(llm) = &self.llm else {
            debug!("No completion client configured; serving fallback suggestions");
            return fallback_suggestions();
        };

        match request_suggestions(llm.as_ref(), occasion, budget, interests).await {
            Ok(suggestions) => {
                info!(
                    "Serving {} suggestions from the completion service",
                    suggestions.len()
                );
                suggestions
            }
            Err(e) => {
                warn!("Serving fallback suggestions: {e}");
                fallback_suggestions()
            }
        }
    }
}

async fn request_suggestions(
    llm: &dyn CompletionService,
    occasion: &str,
    budget: &str,
    interests: &str,
) -> Result<Vec<Suggestion>, SuggestionError> {
    let system = build_system_prompt();
    let user = build_user_prompt(occasion, budget, interests);

    let text = llm.complete(&system, &user).await?;
    debug!("Raw completion: {text}");

    parse_suggestions(&text)
}

/// Parses completion text into validated suggestions.
///
/// The text must be a top-level JSON array as returned, with no unwrapping.
/// An empty accepted set is an error so the caller routes it to the fallback.
pub fn parse_suggestions(text: &str) -> Result<Vec<Suggestion>, SuggestionError> {
    let Value::Array(items) = serde_json::from_str::<Value>(text)? else {
        return Err(SuggestionError::UnexpectedShape);
    };

    let valid = validate_suggestions(&items);
    if valid.is_empty() {
        return Err(SuggestionError::NoValidSuggestions);
    }
    Ok(valid)
}

/// Keeps only objects whose `name`, `description` and `search_term` are all
/// non-blank strings, copying exactly those three values unchanged.
pub fn validate_suggestions(items: &[Value]) -> Vec<Suggestion> {
    items
        .iter()
        .filter_map(|item| {
            Some(Suggestion {
                name: required_text(item, "name")?,
                description: required_text(item, "description")?,
                search_term: required_text(item, "search_term")?,
            })
        })
        .collect()
}

fn required_text(item: &Value, key: &str) -> Option<String> {
    let text = item.get(key)?.as_str()?;
    (!text.trim().is_empty()).then(|| text.to_string())
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;
    use serde_json::json;

    use super::*;

    /// Canned completion backend that records the prompts it receives.
    struct FakeCompletion {
        reply: Result<String, u16>,
        seen: Mutex<Vec<(String, String)>>,
    }

    impl FakeCompletion {
        fn replying(text: &str) -> Arc<Self> {
            Arc::new(Self {
                reply: Ok(text.to_string()),
                seen: Mutex::new(Vec::new()),
            })
        }

        fn failing(status: u16) -> Arc<Self> {
            Arc::new(Self {
                reply: Err(status),
                seen: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl CompletionService for FakeCompletion {
        async fn complete(&self, system: &str, user: &str) -> Result<String, LlmError> {
            self.seen
                .lock()
                .unwrap()
                .push((system.to_string(), user.to_string()));
            match &self.reply {
                Ok(text) => Ok(text.clone()),
                Err(status) => Err(LlmError::Api {
                    status: *status,
                    message: "fake failure".to_string(),
                }),
            }
        }
    }

    fn generator_with(fake: &Arc<FakeCompletion>) -> SuggestionGenerator {
        SuggestionGenerator::new(Some(fake.clone() as Arc<dyn CompletionService>))
    }

    const THREE_VALID: &str = r#"[
        {"name": "Trail Backpack", "description": "A light daypack.", "search_term": "hiking daypack"},
        {"name": "Camping Stove", "description": "Compact gas stove.", "search_term": "camping stove"},
        {"name": "Trekking Poles", "description": "Carbon poles.", "search_term": "trekking poles"}
    ]"#;

    #[tokio::test]
    async fn test_no_client_returns_fallback() {
        let generator = SuggestionGenerator::disabled();
        assert!(!generator.is_llm_enabled());

        let first = generator.generate("Birthday", "50", "hiking").await;
        let second = generator.generate("Birthday", "50", "hiking").await;
        assert_eq!(first, fallback_suggestions());
        assert_eq!(
            first.iter().map(|s| &s.name).collect::<Vec<_>>(),
            second.iter().map(|s| &s.name).collect::<Vec<_>>()
        );
    }

    #[tokio::test]
    async fn test_valid_completion_is_served() {
        let fake = FakeCompletion::replying(THREE_VALID);
        let result = generator_with(&fake).generate("Birthday", "50", "hiking").await;

        assert_eq!(result.len(), 3);
        assert_eq!(result[0].name, "Trail Backpack");
        assert_eq!(result[2].search_term, "trekking poles");
    }

    #[tokio::test]
    async fn test_prompts_carry_request_values() {
        let fake = FakeCompletion::replying(THREE_VALID);
        generator_with(&fake)
            .generate("Anniversary", "100 EUR", "wine, jazz")
            .await;

        let seen = fake.seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        let (system, user) = &seen[0];
        assert!(system.contains("gift advisor"));
        assert!(user.contains("Occasion: Anniversary"));
        assert!(user.contains("Budget: 100 EUR"));
        assert!(user.contains("Interests: wine, jazz"));
    }

    #[tokio::test]
    async fn test_non_json_completion_returns_fallback() {
        let fake = FakeCompletion::replying("1. A backpack\n2. A stove\n3. Poles");
        let result = generator_with(&fake).generate("Birthday", "50", "hiking").await;
        assert_eq!(result, fallback_suggestions());
    }

    #[tokio::test]
    async fn test_service_failure_returns_fallback() {
        let fake = FakeCompletion::failing(500);
        let result = generator_with(&fake).generate("Birthday", "50", "hiking").await;
        assert_eq!(result, fallback_suggestions());
        assert_eq!(fake.seen.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_empty_array_returns_fallback() {
        let fake = FakeCompletion::replying("[]");
        let result = generator_with(&fake).generate("Birthday", "50", "hiking").await;
        assert_eq!(result, fallback_suggestions());
    }

    #[tokio::test]
    async fn test_entry_missing_field_is_dropped() {
        let fake = FakeCompletion::replying(
            r#"[
                {"name": "Book", "description": "A novel.", "search_term": "novel", "price": 12},
                {"name": "Puzzle", "description": "1000 pieces."},
                {"name": "Tea Set", "description": "Green tea sampler.", "search_term": "green tea set"}
            ]"#,
        );
        let result = generator_with(&fake).generate("Birthday", "20", "reading").await;

        assert_eq!(
            result,
            vec![
                Suggestion::new("Book", "A novel.", "novel"),
                Suggestion::new("Tea Set", "Green tea sampler.", "green tea set"),
            ]
        );
        let serialized = serde_json::to_value(&result[0]).unwrap();
        assert_eq!(serialized.as_object().unwrap().len(), 3);
    }

    #[test]
    fn test_parse_rejects_non_array_shapes() {
        assert!(matches!(
            parse_suggestions(r#""just a string""#),
            Err(SuggestionError::UnexpectedShape)
        ));
        assert!(matches!(
            parse_suggestions(r#"{"name": "Book"}"#),
            Err(SuggestionError::UnexpectedShape)
        ));
        assert!(matches!(
            parse_suggestions("not json"),
            Err(SuggestionError::InvalidJson(_))
        ));
    }

    #[tokio::test]
    async fn test_fenced_completion_returns_fallback() {
        let fake = FakeCompletion::replying(
            "```json\n[{\"name\": \"Tent\", \"description\": \"Two-person tent.\", \"search_term\": \"tent\"}]\n```",
        );
        let result = generator_with(&fake).generate("Birthday", "200", "camping").await;
        assert_eq!(result, fallback_suggestions());
    }

    #[tokio::test]
    async fn test_wrapped_array_returns_fallback() {
        let fake = FakeCompletion::replying(
            r#"{"suggestions": [{"name": "Tent", "description": "Two-person tent.", "search_term": "tent"}]}"#,
        );
        let result = generator_with(&fake).generate("Birthday", "200", "camping").await;
        assert_eq!(result, fallback_suggestions());
        assert!(matches!(
            parse_suggestions(r#"{"suggestions": []}"#),
            Err(SuggestionError::UnexpectedShape)
        ));
    }

    #[test]
    fn test_parse_all_invalid_is_no_valid_suggestions() {
        let text = r#"[{"name": "Mug"}, "Socks", 42, null]"#;
        assert!(matches!(
            parse_suggestions(text),
            Err(SuggestionError::NoValidSuggestions)
        ));
    }

    #[test]
    fn test_validate_rejects_non_string_and_blank_values() {
        let items = vec![
            json!({"name": "Mug", "description": null, "search_term": "mug"}),
            json!({"name": 7, "description": "Seven.", "search_term": "seven"}),
            json!({"name": "  ", "description": "Blank name.", "search_term": "blank"}),
            json!({"name": " Scarf ", "description": "Wool scarf. ", "search_term": "wool scarf"}),
        ];
        // accepted values are copied as-is, surrounding whitespace included
        assert_eq!(
            validate_suggestions(&items),
            vec![Suggestion::new(" Scarf ", "Wool scarf. ", "wool scarf")]
        );
    }
}
