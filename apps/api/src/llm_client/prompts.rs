// Shared prompt fragments. Feature modules keep their own prompts.rs and
// append these where they need structured output.

/// System prompt fragment that forces a bare JSON array answer.
pub const JSON_ARRAY_ONLY: &str = "You MUST respond with a valid JSON array only. \
    Do NOT include any text outside the JSON array. \
    Do NOT use markdown code fences, bullet points or numbering. \
    Do NOT include explanations or apologies.";
