use super::{Analysis, AnalysisRequest, AnalysisService};
use crate::{Error, Result};
use async_trait::async_trait;
use serde_json::json;
use std::sync::{Arc, Mutex};

enum MockOutcome {
    Text(String),
    Upstream(String),
    MissingApiKey,
}

/// Clones share recorded requests and configured outcomes.
#[derive(Clone)]
pub struct MockAnalysisClient {
    outcomes: Arc<Mutex<Vec<MockOutcome>>>,
    requests: Arc<Mutex<Vec<AnalysisRequest>>>,
}

impl MockAnalysisClient {
    pub fn new() -> Self {
        Self {
            outcomes: Arc::new(Mutex::new(Vec::new())),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn with_text_response(self, text: String) -> Self {
        self.outcomes.lock().unwrap().push(MockOutcome::Text(text));
        self
    }

    pub fn with_upstream_error(self, message: String) -> Self {
        self.outcomes
            .lock()
            .unwrap()
            .push(MockOutcome::Upstream(message));
        self
    }

    pub fn with_missing_api_key(self) -> Self {
        self.outcomes.lock().unwrap().push(MockOutcome::MissingApiKey);
        self
    }

    pub fn get_call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    /// Requests received so far, in call order.
    pub fn recorded_requests(&self) -> Vec<AnalysisRequest> {
        self.requests.lock().unwrap().clone()
    }
}

impl Default for MockAnalysisClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AnalysisService for MockAnalysisClient {
    async fn analyze(&self, request: AnalysisRequest) -> Result<Analysis> {
        let mut requests = self.requests.lock().unwrap();
        requests.push(request);
        let count = requests.len();

        let outcomes = self.outcomes.lock().unwrap();
        if outcomes.is_empty() {
            // Default mock response
            let text = format!("Mock analysis of {} content parts", requests[count - 1].content.len());
            return Ok(Analysis {
                raw_response: json!({"output_text": text}),
                text,
            });
        }

        match &outcomes[(count - 1) % outcomes.len()] {
            MockOutcome::Text(text) => Ok(Analysis {
                text: text.clone(),
                raw_response: json!({
                    "output": [{
                        "type": "message",
                        "content": [{"type": "output_text", "text": text}]
                    }]
                }),
            }),
            MockOutcome::Upstream(message) => Err(Error::Upstream(message.clone())),
            MockOutcome::MissingApiKey => Err(Error::MissingApiKey),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::ContentPart;

    fn request() -> AnalysisRequest {
        AnalysisRequest {
            model: None,
            content: vec![ContentPart::text("hello")],
        }
    }

    #[tokio::test]
    async fn test_mock_default_response() {
        let client = MockAnalysisClient::new();
        let analysis = client.analyze(request()).await.unwrap();
        assert_eq!(analysis.text, "Mock analysis of 1 content parts");
        assert_eq!(analysis.raw_response["output_text"], analysis.text);
    }

    #[tokio::test]
    async fn test_mock_custom_responses_cycle() {
        let client = MockAnalysisClient::new()
            .with_text_response("first".to_string())
            .with_upstream_error("quota exceeded".to_string());

        assert_eq!(client.analyze(request()).await.unwrap().text, "first");
        let err = client.analyze(request()).await.unwrap_err();
        assert!(matches!(err, Error::Upstream(ref msg) if msg == "quota exceeded"));

        // Should cycle back
        assert_eq!(client.analyze(request()).await.unwrap().text, "first");
        assert_eq!(client.get_call_count(), 3);
    }

    #[tokio::test]
    async fn test_mock_records_requests() {
        let client = MockAnalysisClient::new().with_missing_api_key();

        let err = client.analyze(request()).await.unwrap_err();
        assert!(matches!(err, Error::MissingApiKey));
        assert_eq!(client.recorded_requests(), vec![request()]);
    }
}
