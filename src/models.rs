//! HTTP request/response envelopes
//!
//! `/analyze` answers in the legacy chat-completions envelope so that older
//! browser clients reading `choices[0].message.content` keep working.

use crate::ai::{Analysis, AnalysisRequest};
use crate::content;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// `/analyze` body, decoded leniently from arbitrary JSON.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AnalyzeRequestBody {
    pub model: Option<String>,
    pub content_parts: Value,
}

impl AnalyzeRequestBody {
    pub fn from_value(value: &Value) -> Self {
        Self {
            model: value
                .get("model")
                .and_then(Value::as_str)
                .map(str::to_string),
            content_parts: value.get("content_parts").cloned().unwrap_or(Value::Null),
        }
    }

    /// Normalize the content parts into an upstream-ready request.
    pub fn into_analysis_request(self) -> AnalysisRequest {
        AnalysisRequest {
            content: content::normalize(&self.content_parts),
            model: self.model,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegacyMessage {
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegacyChoice {
    pub message: LegacyMessage,
}

/// Successful `/analyze` reply.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyzeResponse {
    pub choices: Vec<LegacyChoice>,
    pub raw_response: Value,
}

impl From<Analysis> for AnalyzeResponse {
    fn from(analysis: Analysis) -> Self {
        Self {
            choices: vec![LegacyChoice {
                message: LegacyMessage {
                    content: analysis.text,
                },
            }],
            raw_response: analysis.raw_response,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::ContentPart;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_request_body_is_lenient() {
        let body = AnalyzeRequestBody::from_value(&json!({"model": 5, "content_parts": "x"}));
        assert_eq!(body.model, None);
        assert!(body.into_analysis_request().content.is_empty());

        let body = AnalyzeRequestBody::from_value(&json!(null));
        assert_eq!(body, AnalyzeRequestBody::default());
    }

    #[test]
    fn test_request_body_normalizes_parts() {
        let body = AnalyzeRequestBody::from_value(&json!({
            "model": "gpt-4o",
            "content_parts": [{"type": "text", "text": "hi"}]
        }));

        let request = body.into_analysis_request();
        assert_eq!(request.model.as_deref(), Some("gpt-4o"));
        assert_eq!(request.content, vec![ContentPart::text("hi")]);
    }

    #[test]
    fn test_legacy_envelope_shape() {
        let response = AnalyzeResponse::from(Analysis {
            text: "answer".to_string(),
            raw_response: json!({"output_text": "answer"}),
        });

        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            json!({
                "choices": [{"message": {"content": "answer"}}],
                "raw_response": {"output_text": "answer"}
            })
        );
    }
}
