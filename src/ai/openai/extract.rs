//! Answer-text extraction from upstream replies.
//!
//! The upstream may answer in the Responses layout (`output_text` or an
//! `output` list of message items) or in the legacy chat-completions layout
//! (`choices[0].message.content`). Each layout has its own extractor; the
//! first one that finds text wins.

use serde_json::Value;

type Extractor = fn(&Value) -> Option<String>;

/// Extractors in priority order.
const EXTRACTORS: &[Extractor] = &[from_output_text, from_output_messages, from_legacy_choices];

/// Best-effort answer text. Empty when no layout yields any.
pub fn extract_text(response: &Value) -> String {
    EXTRACTORS
        .iter()
        .find_map(|extract| extract(response))
        .unwrap_or_default()
}

/// Flat `output_text` convenience field.
pub fn from_output_text(response: &Value) -> Option<String> {
    response
        .get("output_text")
        .and_then(Value::as_str)
        .filter(|text| !text.trim().is_empty())
        .map(str::to_string)
}

/// Text blocks of every `message` item in `output`, newline-joined.
pub fn from_output_messages(response: &Value) -> Option<String> {
    let collected: Vec<&str> = response
        .get("output")?
        .as_array()?
        .iter()
        .filter(|item| item.get("type").and_then(Value::as_str) == Some("message"))
        .filter_map(|item| item.get("content").and_then(Value::as_array))
        .flatten()
        .filter_map(|block| block.get("text").and_then(Value::as_str))
        .filter(|text| !text.is_empty())
        .collect();

    (!collected.is_empty()).then(|| collected.join("\n"))
}

/// Legacy `choices[0].message.content`.
pub fn from_legacy_choices(response: &Value) -> Option<String> {
    response
        .get("choices")?
        .as_array()?
        .first()?
        .get("message")?
        .get("content")?
        .as_str()
        .map(str::to_string)
}
