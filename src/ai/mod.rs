//! AI service integration for multimodal page analysis
//!
//! Provides the [`AnalysisService`] seam between the HTTP layer and the
//! OpenAI Responses API, plus a mock for tests and local harnesses.

pub mod mock;
pub mod openai;

pub use mock::MockAnalysisClient;
pub use openai::OpenAiResponsesClient;

use crate::content::ContentPart;
use crate::Result;
use async_trait::async_trait;
use serde_json::Value;

/// One analysis call: the requested model (if any) and normalized content.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisRequest {
    pub model: Option<String>,
    pub content: Vec<ContentPart>,
}

/// Extracted answer text alongside the untouched upstream payload.
#[derive(Debug, Clone, PartialEq)]
pub struct Analysis {
    pub text: String,
    pub raw_response: Value,
}

#[async_trait]
pub trait AnalysisService: Send + Sync {
    async fn analyze(&self, request: AnalysisRequest) -> Result<Analysis>;
}
