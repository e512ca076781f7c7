// Prompt constants for gift suggestions.
// Reuses the JSON-only fragment from llm_client::prompts.

use crate::llm_client::prompts::JSON_ARRAY_ONLY;

/// Gift-advisor persona and output contract.
pub const GIFT_ADVISOR_SYSTEM: &str = "You are a helpful gift advisor. \
    Based on the occasion, budget and interests of the recipient, you provide \
    a list of exactly three gift suggestions. Each suggestion has a clear name \
    (1-5 words), a short description, and a search term that can be used for a \
    product search. Return a JSON array of objects with the fields 'name', \
    'description' and 'search_term'.";

pub fn build_system_prompt() -> String {
    format!("{GIFT_ADVISOR_SYSTEM} {JSON_ARRAY_ONLY}")
}

/// Embeds the request values verbatim, one labelled line each.
pub fn build_user_prompt(occasion: &str, budget: &str, interests: &str) -> String {
    format!(
        "Occasion: {occasion}\nBudget: {budget}\nInterests: {interests}\n\
         Create three fitting gift suggestions."
    )
}
