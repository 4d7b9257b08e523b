use crate::config::toml_config::LlmConfig;
use crate::core::LlmClient;
use crate::utils::error::{AppError, LlmError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Gemini `generateContent` REST client
pub struct GeminiClient {
    client: Client,
    endpoint: String,
    model: String,
    api_key: Option<String>,
    temperature: f32,
    max_output_tokens: u32,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest<'a> {
    contents: [Content<'a>; 1],
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct Content<'a> {
    parts: [Part<'a>; 1],
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    max_output_tokens: u32,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

impl GenerateResponse {
    fn into_text(self) -> Option<String> {
        let parts = self.candidates.into_iter().next()?.content?.parts;
        let text: String = parts.into_iter().filter_map(|p| p.text).collect();
        if text.is_empty() {
            None
        } else {
            Some(text)
        }
    }
}

impl GeminiClient {
    pub fn new(config: &LlmConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(AppError::ApiError)?;

        Ok(Self {
            client,
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            api_key: config.resolved_api_key(),
            temperature: config.temperature,
            max_output_tokens: config.max_output_tokens,
        })
    }

    pub fn has_credentials(&self) -> bool {
        self.api_key.is_some()
    }

    fn url(&self) -> String {
        format!("{}/models/{}:generateContent", self.endpoint, self.model)
    }
}

#[async_trait]
impl LlmClient for GeminiClient {
    async fn generate(&self, prompt: &str) -> std::result::Result<String, LlmError> {
        let api_key = self.api_key.as_deref().ok_or(LlmError::MissingCredentials)?;

        let body = GenerateRequest {
            contents: [Content {
                parts: [Part { text: prompt }],
            }],
            generation_config: GenerationConfig {
                temperature: self.temperature,
                max_output_tokens: self.max_output_tokens,
            },
        };

        tracing::debug!("Sending {} chars to {}", prompt.len(), self.model);
        let response = self
            .client
            .post(self.url())
            .header("x-goog-api-key", api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(LlmError::Provider {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: GenerateResponse = response.json().await?;
        parsed.into_text().ok_or(LlmError::EmptyResponse)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    fn config(endpoint: String, api_key: Option<&str>) -> LlmConfig {
        LlmConfig {
            endpoint,
            api_key: api_key.map(str::to_string),
            timeout_seconds: 5,
            ..LlmConfig::default()
        }
    }

    #[tokio::test]
    async fn test_generate_returns_candidate_text() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/models/gemini-2.5-flash-lite:generateContent")
                    .header("x-goog-api-key", "test-key")
                    .json_body_partial(r#"{"generationConfig": {"maxOutputTokens": 2048}}"#);
                then.status(200).json_body(serde_json::json!({
                    "candidates": [{
                        "content": {"parts": [{"text": "{\"count\": "}, {"text": "3}"}]}
                    }]
                }));
            })
            .await;

        let client = GeminiClient::new(&config(server.base_url(), Some("test-key"))).unwrap();
        let text = client.generate("hello").await.unwrap();

        mock.assert_async().await;
        assert_eq!(text, "{\"count\": 3}");
    }

    #[tokio::test]
    async fn test_missing_key_makes_no_request() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST);
                then.status(200);
            })
            .await;

        let client = GeminiClient::new(&config(server.base_url(), None)).unwrap();
        assert!(!client.has_credentials());

        let err = client.generate("hello").await.unwrap_err();
        assert!(matches!(err, LlmError::MissingCredentials));
        assert_eq!(mock.hits_async().await, 0);
    }

    #[tokio::test]
    async fn test_provider_error_status() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST);
                then.status(429).body("quota exceeded");
            })
            .await;

        let client = GeminiClient::new(&config(server.base_url(), Some("k"))).unwrap();
        match client.generate("hello").await.unwrap_err() {
            LlmError::Provider { status, body } => {
                assert_eq!(status, 429);
                assert_eq!(body, "quota exceeded");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_empty_candidates_is_error() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST);
                then.status(200).json_body(serde_json::json!({"candidates": []}));
            })
            .await;

        let client = GeminiClient::new(&config(server.base_url(), Some("k"))).unwrap();
        let err = client.generate("hello").await.unwrap_err();
        assert!(matches!(err, LlmError::EmptyResponse));
    }
}
