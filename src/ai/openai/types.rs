//! OpenAI Responses API request payloads.

use crate::config::ModelPreset;
use crate::content::ContentPart;
use serde::Serialize;

/// Request body for `POST /v1/responses`.
#[derive(Debug, Serialize)]
pub struct ResponsesRequest {
    pub model: String,
    pub input: Vec<InputMessage>,
    #[serde(flatten)]
    pub preset: ModelPreset,
}

/// One input message with its multimodal content.
#[derive(Debug, Serialize)]
pub struct InputMessage {
    pub role: String,
    pub content: Vec<ContentPart>,
}

impl ResponsesRequest {
    /// Wrap normalized content as a single user message.
    pub fn user(model: impl Into<String>, content: Vec<ContentPart>, preset: ModelPreset) -> Self {
        Self {
            model: model.into(),
            input: vec![InputMessage {
                role: "user".to_string(),
                content,
            }],
            preset,
        }
    }
}
