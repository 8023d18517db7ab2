use super::client::OpenAiHttpClient;
use super::extract::extract_text;
use super::types::ResponsesRequest;
use crate::ai::{Analysis, AnalysisRequest, AnalysisService};
use crate::config::{Config, ModelPresets};
use crate::{Error, Result};
use async_trait::async_trait;

const RESPONSES_PATH: &str = "/v1/responses";

/// OpenAI Responses API implementation of [`AnalysisService`].
pub struct OpenAiResponsesClient {
    http: OpenAiHttpClient,
    presets: ModelPresets,
}

impl OpenAiResponsesClient {
    pub fn new(config: &Config) -> Self {
        Self::new_with_client(config, reqwest::Client::new())
    }

    pub fn new_with_client(config: &Config, client: reqwest::Client) -> Self {
        Self {
            http: OpenAiHttpClient::new_with_client(
                config.openai_api_key.clone(),
                config.openai_base_url.clone(),
                client,
            ),
            presets: config.presets.clone(),
        }
    }
}

#[async_trait]
impl AnalysisService for OpenAiResponsesClient {
    async fn analyze(&self, request: AnalysisRequest) -> Result<Analysis> {
        if !self.http.has_api_key() {
            tracing::error!("OPENAI_API_KEY is not configured");
            return Err(Error::MissingApiKey);
        }

        let (model, preset) = self.presets.resolve(request.model.as_deref());
        tracing::info!(
            model,
            temperature = preset.temperature,
            max_output_tokens = preset.max_output_tokens,
            top_p = preset.top_p,
            parts = request.content.len(),
            "Requesting analysis from OpenAI"
        );

        let payload = ResponsesRequest::user(model, request.content, preset);
        let raw_response = self.http.post(RESPONSES_PATH, &payload).await?;
        tracing::info!("Received response from OpenAI");

        let text = extract_text(&raw_response);
        if text.is_empty() {
            tracing::warn!("OpenAI response carried no extractable text");
        }

        Ok(Analysis { text, raw_response })
    }
}
