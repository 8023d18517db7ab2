//! Multimodal content parts
//!
//! Clients send content parts in either the legacy chat-completions layout
//! (`text` / `image_url`) or the Responses API layout (`input_text` /
//! `input_image`). Everything is decoded into [`ContentPart`] before being
//! forwarded upstream.

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use serde_json::{Map, Value};

/// Canonical content part as sent to the Responses API.
#[derive(Debug, Clone, PartialEq)]
pub enum ContentPart {
    InputText { text: String },
    InputImage { image_url: String },
    /// Block forwarded untouched (audio/video/file, or fallback passthrough).
    Opaque(Map<String, Value>),
}

impl ContentPart {
    pub fn text(text: impl Into<String>) -> Self {
        Self::InputText { text: text.into() }
    }

    pub fn image(image_url: impl Into<String>) -> Self {
        Self::InputImage {
            image_url: image_url.into(),
        }
    }
}

impl Serialize for ContentPart {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            ContentPart::InputText { text } => {
                let mut map = serializer.serialize_map(Some(2))?;
                map.serialize_entry("type", "input_text")?;
                map.serialize_entry("text", text)?;
                map.end()
            }
            ContentPart::InputImage { image_url } => {
                let mut map = serializer.serialize_map(Some(2))?;
                map.serialize_entry("type", "input_image")?;
                map.serialize_entry("image_url", image_url)?;
                map.end()
            }
            ContentPart::Opaque(fields) => fields.serialize(serializer),
        }
    }
}

/// Shape of an incoming part, classified by its `type` discriminator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RawPart {
    Text,
    Image,
    Canonical,
    Unknown,
}

impl RawPart {
    fn classify(part: &Map<String, Value>) -> Self {
        match part.get("type").and_then(Value::as_str) {
            Some("text" | "input_text") => RawPart::Text,
            Some("image_url" | "input_image") => RawPart::Image,
            Some("input_audio" | "input_video" | "input_file") => RawPart::Canonical,
            _ => RawPart::Unknown,
        }
    }
}

fn parse_text(part: &Map<String, Value>) -> Option<ContentPart> {
    part.get("text")
        .and_then(Value::as_str)
        .map(ContentPart::text)
}

fn parse_image(part: &Map<String, Value>) -> Option<ContentPart> {
    let url = match part.get("image_url")? {
        Value::Object(nested) => nested.get("url")?.as_str()?,
        Value::String(url) => url.as_str(),
        _ => return None,
    };
    (!url.is_empty()).then(|| ContentPart::image(url))
}

fn parse_part(part: &Map<String, Value>) -> Option<ContentPart> {
    match RawPart::classify(part) {
        RawPart::Text => parse_text(part),
        RawPart::Image => parse_image(part),
        RawPart::Canonical => Some(ContentPart::Opaque(part.clone())),
        RawPart::Unknown => None,
    }
}

/// Normalize an arbitrary JSON value into canonical content parts.
///
/// Non-list input yields nothing. Unrecognized parts are dropped, unless no
/// part survives at all: then every original object is passed through as-is.
pub fn normalize(parts: &Value) -> Vec<ContentPart> {
    let Some(items) = parts.as_array() else {
        return Vec::new();
    };

    let objects: Vec<&Map<String, Value>> = items.iter().filter_map(Value::as_object).collect();

    let normalized: Vec<ContentPart> = objects.iter().filter_map(|part| parse_part(part)).collect();
    if !normalized.is_empty() {
        return normalized;
    }

    if !items.is_empty() {
        tracing::debug!(
            "No recognizable content parts among {}; passing originals through",
            items.len()
        );
    }

    objects
        .into_iter()
        .map(|part| ContentPart::Opaque(part.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_legacy_parts_become_canonical_in_order() {
        let parts = json!([
            {"type": "text", "text": "Describe page 1"},
            {"type": "image_url", "image_url": {"url": "data:image/png;base64,AAAA"}},
            {"type": "unsupported", "payload": 1},
            {"type": "input_text", "text": "and page 2"},
            {"type": "input_image", "image_url": "https://example.com/p2.png"},
        ]);

        assert_eq!(
            normalize(&parts),
            vec![
                ContentPart::text("Describe page 1"),
                ContentPart::image("data:image/png;base64,AAAA"),
                ContentPart::text("and page 2"),
                ContentPart::image("https://example.com/p2.png"),
            ]
        );
    }

    #[test]
    fn test_invalid_text_and_image_parts_are_skipped() {
        let parts = json!([
            {"type": "text", "text": 42},
            {"type": "image_url", "image_url": ""},
            {"type": "image_url", "image_url": {"url": null}},
            {"type": "input_image"},
            "just a string",
            {"type": "text", "text": "kept"},
        ]);

        assert_eq!(normalize(&parts), vec![ContentPart::text("kept")]);
    }

    #[test]
    fn test_canonical_media_blocks_pass_through() {
        let audio = json!({"type": "input_audio", "input_audio": {"data": "abc", "format": "wav"}});
        let parts = json!([audio.clone(), {"type": "text", "text": "transcribe"}]);

        let normalized = normalize(&parts);
        assert_eq!(normalized.len(), 2);
        assert_eq!(serde_json::to_value(&normalized[0]).unwrap(), audio);
    }

    #[test]
    fn test_all_unrecognized_parts_fall_back_to_originals() {
        let parts = json!([
            {"type": "mystery", "value": 1},
            7,
            {"kind": "no discriminator"},
        ]);

        let normalized = serde_json::to_value(normalize(&parts)).unwrap();
        assert_eq!(
            normalized,
            json!([
                {"type": "mystery", "value": 1},
                {"kind": "no discriminator"},
            ])
        );
    }

    #[test]
    fn test_empty_and_non_list_inputs_yield_nothing() {
        assert!(normalize(&json!([])).is_empty());
        assert!(normalize(&json!(null)).is_empty());
        assert!(normalize(&json!({"type": "text", "text": "hi"})).is_empty());
        assert!(normalize(&json!("text")).is_empty());
    }

    #[test]
    fn test_serializes_with_canonical_discriminators() {
        let value = serde_json::to_value(vec![
            ContentPart::text("hello"),
            ContentPart::image("https://example.com/a.png"),
        ])
        .unwrap();

        assert_eq!(
            value,
            json!([
                {"type": "input_text", "text": "hello"},
                {"type": "input_image", "image_url": "https://example.com/a.png"},
            ])
        );
    }
}
