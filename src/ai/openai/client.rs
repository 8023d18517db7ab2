use crate::{Error, Result};
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;

/// Fallback when an upstream error body is JSON but carries no `error.message`.
pub const UNKNOWN_ERROR_MESSAGE: &str = "알 수 없는 오류";

pub struct OpenAiHttpClient {
    pub(crate) client: Client,
    pub(crate) api_key: Option<String>,
    pub(crate) base_url: String,
}

impl OpenAiHttpClient {
    pub fn new(api_key: Option<String>, base_url: String) -> Self {
        Self::new_with_client(api_key, base_url, Client::new())
    }

    pub fn new_with_client(api_key: Option<String>, base_url: String, client: Client) -> Self {
        Self {
            client,
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// POST a JSON body and return the decoded JSON reply.
    ///
    /// Every failure is reported as [`Error::Upstream`] with the most
    /// specific message available, except a missing credential which is
    /// reported before any request is made.
    pub async fn post<Req: Serialize>(&self, path: &str, request: &Req) -> Result<Value> {
        let api_key = self.api_key.as_deref().ok_or(Error::MissingApiKey)?;
        let url = format!("{}{}", self.base_url, path);

        let response = self
            .client
            .post(&url)
            .bearer_auth(api_key)
            .json(request)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Failed to send request to OpenAI: {}", e);
                Error::Upstream(e.to_string())
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            tracing::error!("Failed to read OpenAI response body: {}", e);
            Error::Upstream(e.to_string())
        })?;

        if !status.is_success() {
            let message = upstream_error_message(&body);
            tracing::error!("OpenAI API error (status {}): {}", status, message);
            return Err(Error::Upstream(message));
        }

        serde_json::from_str(&body).map_err(|e| {
            tracing::error!("Failed to parse OpenAI response: {}\nBody: {}", e, body);
            Error::Upstream(format!("Failed to parse OpenAI response: {}", e))
        })
    }
}

/// Best-effort message for a non-2xx upstream body.
///
/// JSON bodies yield `error.message`; anything else is returned verbatim.
pub fn upstream_error_message(body: &str) -> String {
    match serde_json::from_str::<Value>(body) {
        Ok(detail) => detail
            .pointer("/error/message")
            .and_then(Value::as_str)
            .unwrap_or(UNKNOWN_ERROR_MESSAGE)
            .to_string(),
        Err(_) => body.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::openai::test_support;
    use serde_json::json;
    use wiremock::matchers::header;
    use wiremock::{MockServer, ResponseTemplate};

    #[test]
    fn test_error_message_from_json_body() {
        let body = r#"{"error": {"message": "Incorrect API key provided", "type": "invalid_request_error"}}"#;
        assert_eq!(upstream_error_message(body), "Incorrect API key provided");
    }

    #[test]
    fn test_error_message_json_without_message() {
        assert_eq!(upstream_error_message(r#"{"detail": "nope"}"#), UNKNOWN_ERROR_MESSAGE);
    }

    #[test]
    fn test_error_message_raw_body() {
        assert_eq!(upstream_error_message("Bad Gateway"), "Bad Gateway");
    }

    #[tokio::test]
    async fn test_post_sends_bearer_token() {
        let server = MockServer::start().await;

        test_support::post(test_support::RESPONSES_PATH)
            .and(header("Authorization", "Bearer test-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"output_text": "ok"})))
            .expect(1)
            .mount(&server)
            .await;

        let client = OpenAiHttpClient::new(Some("test-key".to_string()), server.uri());
        let value = client
            .post(test_support::RESPONSES_PATH, &json!({"model": "gpt-5-mini"}))
            .await
            .unwrap();
        assert_eq!(value["output_text"], "ok");
    }

    #[tokio::test]
    async fn test_post_extracts_json_error_message() {
        let server = MockServer::start().await;

        test_support::post(test_support::RESPONSES_PATH)
            .respond_with(ResponseTemplate::new(401).set_body_json(json!({
                "error": {"message": "Invalid API key", "code": "invalid_api_key"}
            })))
            .mount(&server)
            .await;

        let client = OpenAiHttpClient::new(Some("bad".to_string()), server.uri());
        let err = client
            .post(test_support::RESPONSES_PATH, &json!({}))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Upstream(ref msg) if msg == "Invalid API key"));
    }

    #[tokio::test]
    async fn test_post_uses_raw_body_for_non_json_error() {
        let server = MockServer::start().await;

        test_support::post(test_support::RESPONSES_PATH)
            .respond_with(ResponseTemplate::new(502).set_body_string("upstream unavailable"))
            .mount(&server)
            .await;

        let client = OpenAiHttpClient::new(Some("key".to_string()), server.uri());
        let err = client
            .post(test_support::RESPONSES_PATH, &json!({}))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Upstream(ref msg) if msg == "upstream unavailable"));
    }

    #[tokio::test]
    async fn test_post_rejects_unparseable_success_body() {
        let server = MockServer::start().await;

        test_support::post(test_support::RESPONSES_PATH)
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
            .mount(&server)
            .await;

        let client = OpenAiHttpClient::new(Some("key".to_string()), server.uri());
        let err = client
            .post(test_support::RESPONSES_PATH, &json!({}))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Upstream(ref msg) if msg.starts_with("Failed to parse")));
    }

    #[tokio::test]
    async fn test_post_reports_transport_failure() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let uri = format!("http://{}", listener.local_addr().unwrap());
        drop(listener);

        let client = OpenAiHttpClient::new(Some("key".to_string()), uri);
        let err = client
            .post(test_support::RESPONSES_PATH, &json!({}))
            .await
            .unwrap_err();
        match err {
            Error::Upstream(msg) => assert!(!msg.is_empty()),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_post_without_api_key_fails_fast() {
        let server = MockServer::start().await;

        test_support::post(test_support::RESPONSES_PATH)
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let client = OpenAiHttpClient::new(None, server.uri());
        let err = client
            .post(test_support::RESPONSES_PATH, &json!({}))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::MissingApiKey));
    }
}
