//! Gemini client implementation

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

use crate::config::GenerationConfig;
use crate::error::GenerationError;
use crate::ports::TextGeneration;

/// Text generation client for the Gemini REST API
#[derive(Debug, Clone)]
pub struct GeminiClient {
    client: Client,
    config: GenerationConfig,
}

impl GeminiClient {
    /// Create a new Gemini client
    ///
    /// # Errors
    ///
    /// Returns `GenerationError::Configuration` if the configuration is
    /// invalid or the HTTP client cannot be constructed.
    pub fn new(config: GenerationConfig) -> Result<Self, GenerationError> {
        config.validate().map_err(GenerationError::Configuration)?;

        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(|e| {
                GenerationError::Configuration(format!("Failed to create HTTP client: {e}"))
            })?;

        info!(
            base_url = %config.base_url,
            model = %config.model,
            "Initialized Gemini client"
        );

        Ok(Self { client, config })
    }

    fn api_key(&self) -> &str {
        self.config.api_key.as_deref().unwrap_or_default()
    }

    /// Build the generateContent URL for the configured model
    fn generate_url(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.config.base_url, self.config.model
        )
    }

    /// Classify a provider error response.
    ///
    /// The API reports unknown models with HTTP 404 and a NOT_FOUND status;
    /// the message text is also sniffed as a fallback because some proxy
    /// deployments rewrite the status code.
    fn classify_error(&self, status: StatusCode, body: &str) -> GenerationError {
        if let Ok(api_error) = serde_json::from_str::<ApiError>(body) {
            let message = api_error.error.message;
            if status == StatusCode::NOT_FOUND
                || api_error.error.status.as_deref() == Some("NOT_FOUND")
                || message.to_lowercase().contains("not found")
                || message.contains("404")
            {
                return GenerationError::ModelNotFound(format!(
                    "{}: {message}",
                    self.config.model
                ));
            }
            return GenerationError::ServerError(message);
        }

        if status == StatusCode::NOT_FOUND {
            return GenerationError::ModelNotFound(self.config.model.clone());
        }

        GenerationError::ServerError(format!("HTTP {status}: {body}"))
    }
}

/// Gemini generateContent request
#[derive(Debug, Serialize)]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    role: &'a str,
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

/// Gemini generateContent response
#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: String,
}

/// Gemini API error response
#[derive(Debug, Deserialize)]
struct ApiError {
    error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    message: String,
    #[serde(default)]
    status: Option<String>,
}

#[async_trait]
impl TextGeneration for GeminiClient {
    #[instrument(skip(self, prompt), fields(prompt_len = prompt.len(), model = %self.config.model))]
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        let request = GenerateContentRequest {
            contents: vec![Content {
                role: "user",
                parts: vec![Part { text: prompt }],
            }],
        };

        debug!("Sending generateContent request");

        let response = self
            .client
            .post(self.generate_url())
            .header("x-goog-api-key", self.api_key())
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(status = %status, "Generation request failed");
            return Err(self.classify_error(status, &body));
        }

        let body: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| GenerationError::InvalidResponse(format!("Failed to parse response: {e}")))?;

        let text = body
            .candidates
            .first()
            .map(|candidate| {
                candidate
                    .content
                    .parts
                    .iter()
                    .map(|part| part.text.as_str())
                    .collect::<String>()
            })
            .unwrap_or_default();

        if text.trim().is_empty() {
            return Err(GenerationError::EmptyResponse);
        }

        debug!(text_len = text.len(), "Generation complete");

        Ok(text)
    }

    async fn is_available(&self) -> bool {
        let url = format!("{}/models", self.config.base_url);

        match self
            .client
            .get(&url)
            .header("x-goog-api-key", self.api_key())
            .timeout(Duration::from_secs(5))
            .send()
            .await
        {
            Ok(response) => response.status().is_success(),
            Err(e) => {
                warn!("Gemini availability check failed: {}", e);
                false
            },
        }
    }

    fn model_name(&self) -> &str {
        &self.config.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_client() -> GeminiClient {
        GeminiClient::new(GenerationConfig::with_api_key("test-key")).unwrap()
    }

    #[test]
    fn generate_url_includes_model() {
        let client = test_client();
        assert_eq!(
            client.generate_url(),
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.0-flash-lite-001:generateContent"
        );
    }

    #[test]
    fn new_fails_without_api_key() {
        let result = GeminiClient::new(GenerationConfig::default());
        assert!(matches!(result, Err(GenerationError::Configuration(_))));
    }

    #[test]
    fn classify_error_structured_not_found() {
        let client = test_client();
        let body = r#"{"error":{"code":404,"message":"models/gemini-x is not found","status":"NOT_FOUND"}}"#;
        let err = client.classify_error(StatusCode::NOT_FOUND, body);
        assert!(matches!(err, GenerationError::ModelNotFound(_)));
    }

    #[test]
    fn classify_error_message_sniffing() {
        let client = test_client();
        // Status rewritten by a proxy, message still carries the signal
        let body = r#"{"error":{"code":400,"message":"requested model not found"}}"#;
        let err = client.classify_error(StatusCode::BAD_REQUEST, body);
        assert!(matches!(err, GenerationError::ModelNotFound(_)));
    }

    #[test]
    fn classify_error_other_failures_are_server_errors() {
        let client = test_client();
        let body = r#"{"error":{"code":500,"message":"internal"}}"#;
        let err = client.classify_error(StatusCode::INTERNAL_SERVER_ERROR, body);
        assert!(matches!(err, GenerationError::ServerError(_)));
    }

    #[test]
    fn classify_error_unparsable_body_404() {
        let client = test_client();
        let err = client.classify_error(StatusCode::NOT_FOUND, "gone");
        assert!(matches!(err, GenerationError::ModelNotFound(_)));
    }
}
