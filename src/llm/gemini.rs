//! Google Gemini `generateContent` client.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::error::LlmError;
use super::{GenerationOptions, TextGenerator};

pub const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Environment variable holding the Gemini API key.
const GEMINI_API_KEY_VAR: &str = "GEMINI_API_KEY";

/// Where the API key comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiKey {
    /// A fixed key.
    Static(String),
    /// An environment variable, read again on every request.
    Env(String),
}

impl Default for ApiKey {
    fn default() -> Self {
        Self::Env(GEMINI_API_KEY_VAR.to_string())
    }
}

impl ApiKey {
    /// The key as of now. Blank values count as unset.
    pub fn resolve(&self) -> Option<String> {
        let key = match self {
            Self::Static(key) => Some(key.clone()),
            Self::Env(name) => std::env::var(name).ok(),
        };
        key.filter(|k| !k.trim().is_empty())
    }
}

/// Gemini API client. One request per call, no retry.
pub struct GeminiClient {
    client: Client,
    api_key: ApiKey,
    model: String,
    base_url: String,
}

impl GeminiClient {
    pub fn with_base_url(
        api_key: ApiKey,
        model: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Self {
        Self {
            client: Client::new(),
            api_key,
            model: model.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/{}:generateContent", self.base_url, self.model)
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiRequest<'a> {
    contents: Vec<GeminiContent<'a>>,
    generation_config: GeminiGenerationConfig,
}

#[derive(Serialize)]
struct GeminiContent<'a> {
    parts: Vec<GeminiRequestPart<'a>>,
}

#[derive(Serialize)]
struct GeminiRequestPart<'a> {
    text: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiGenerationConfig {
    temperature: f32,
    top_p: f32,
    top_k: u32,
}

#[derive(Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
}

#[derive(Deserialize)]
struct GeminiCandidate {
    #[serde(default)]
    content: Option<GeminiResponseContent>,
}

#[derive(Deserialize)]
struct GeminiResponseContent {
    #[serde(default)]
    parts: Vec<GeminiResponsePart>,
}

#[derive(Deserialize)]
struct GeminiResponsePart {
    #[serde(default)]
    text: Option<String>,
}

impl GeminiResponse {
    /// Text of the first part of the first candidate.
    fn first_text(self) -> Option<String> {
        self.candidates
            .into_iter()
            .next()?
            .content?
            .parts
            .into_iter()
            .next()?
            .text
    }
}

#[async_trait]
impl TextGenerator for GeminiClient {
    async fn generate(
        &self,
        prompt: &str,
        options: &GenerationOptions,
    ) -> Result<String, LlmError> {
        let api_key = self.api_key.resolve().ok_or_else(LlmError::missing_api_key)?;

        let request = GeminiRequest {
            contents: vec![GeminiContent {
                parts: vec![GeminiRequestPart { text: prompt }],
            }],
            generation_config: GeminiGenerationConfig {
                temperature: options.temperature,
                top_p: options.top_p,
                top_k: options.top_k,
            },
        };

        let response = self
            .client
            .post(self.endpoint())
            .header("Content-Type", "application/json")
            .header("x-goog-api-key", api_key.as_str())
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    LlmError::network_error(format!("Request timeout: {}", e))
                } else if e.is_connect() {
                    LlmError::network_error(format!("Connection failed: {}", e))
                } else {
                    LlmError::network_error(format!("Request failed: {}", e))
                }
            })?;

        let status = response.status();
        let body = response.text().await.unwrap_or_default();

        if !status.is_success() {
            return Err(LlmError::from_status(status.as_u16(), body));
        }

        tracing::debug!(model = %self.model, "Gemini response body: {}", body);

        let parsed: GeminiResponse = serde_json::from_str(&body)
            .map_err(|e| LlmError::parse_error(format!("Failed to parse response: {}", e)))?;

        parsed
            .first_text()
            .ok_or_else(|| LlmError::empty_response("No candidate text in response".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::LlmErrorKind;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client(server: &MockServer) -> GeminiClient {
        GeminiClient::with_base_url(
            ApiKey::Static("test-key".to_string()),
            "gemini-pro",
            server.uri(),
        )
    }

    #[tokio::test]
    async fn test_returns_first_candidate_text() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/gemini-pro:generateContent"))
            .and(header("x-goog-api-key", "test-key"))
            .and(body_partial_json(json!({
                "contents": [{ "parts": [{ "text": "hello" }] }],
                "generationConfig": { "topK": 40 }
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "candidates": [
                    { "content": { "parts": [{ "text": "[]" }, { "text": "ignored" }] } },
                    { "content": { "parts": [{ "text": "second" }] } }
                ]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let text = client(&server)
            .generate("hello", &GenerationOptions::default())
            .await
            .unwrap();
        assert_eq!(text, "[]");
    }

    #[tokio::test]
    async fn test_non_success_status_is_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(503).set_body_string("overloaded"))
            .mount(&server)
            .await;

        let err = client(&server)
            .generate("hello", &GenerationOptions::default())
            .await
            .unwrap_err();
        assert_eq!(err.kind, LlmErrorKind::ServerError);
        assert_eq!(err.status_code, Some(503));
    }

    #[tokio::test]
    async fn test_malformed_envelope_is_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let err = client(&server)
            .generate("hello", &GenerationOptions::default())
            .await
            .unwrap_err();
        assert_eq!(err.kind, LlmErrorKind::ParseError);
    }

    #[tokio::test]
    async fn test_missing_candidates_is_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "promptFeedback": { "blockReason": "SAFETY" }
            })))
            .mount(&server)
            .await;

        let err = client(&server)
            .generate("hello", &GenerationOptions::default())
            .await
            .unwrap_err();
        assert_eq!(err.kind, LlmErrorKind::EmptyResponse);
    }

    #[tokio::test]
    async fn test_missing_key_skips_network() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let client = GeminiClient::with_base_url(
            ApiKey::Static("  ".to_string()),
            "gemini-pro",
            server.uri(),
        );
        let err = client
            .generate("hello", &GenerationOptions::default())
            .await
            .unwrap_err();
        assert_eq!(err.kind, LlmErrorKind::MissingApiKey);
    }

    #[tokio::test]
    async fn test_env_key_is_read_per_request() {
        const VAR: &str = "STUDY_PLANNER_TEST_GEMINI_KEY";
        std::env::remove_var(VAR);

        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(header("x-goog-api-key", "rotated-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "candidates": [{ "content": { "parts": [{ "text": "[]" }] } }]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client =
            GeminiClient::with_base_url(ApiKey::Env(VAR.to_string()), "gemini-pro", server.uri());
        let err = client
            .generate("hello", &GenerationOptions::default())
            .await
            .unwrap_err();
        assert_eq!(err.kind, LlmErrorKind::MissingApiKey);

        std::env::set_var(VAR, "rotated-key");
        let text = client
            .generate("hello", &GenerationOptions::default())
            .await
            .unwrap();
        assert_eq!(text, "[]");
        std::env::remove_var(VAR);
    }
}
