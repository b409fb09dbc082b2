//! OpenAI speech provider
//!
//! Implements `SpeechToText` and `TextToSpeech` over the OpenAI audio API.
//!
//! Synthesis runs a three-tier fallback chain: explicit output format with
//! incremental payload reads, then the provider's default format, then a
//! non-incremental request whose response is decoded per known shape.
//! Each intermediate tier failure is logged and suppressed in favor of the
//! next tier; only exhaustion of the chain surfaces an error.

use std::time::Duration;

use async_trait::async_trait;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use bytes::{Bytes, BytesMut};
use futures::StreamExt;
use reqwest::Client;
use reqwest::header::CONTENT_TYPE;
use reqwest::multipart::{Form, Part};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, instrument, warn};

use crate::config::SpeechConfig;
use crate::error::SpeechError;
use crate::ports::{SpeechToText, TextToSpeech};
use crate::types::AudioUpload;

/// OpenAI speech provider implementing both STT and TTS
#[derive(Debug, Clone)]
pub struct OpenAiSpeechProvider {
    client: Client,
    config: SpeechConfig,
}

impl OpenAiSpeechProvider {
    /// Create a new OpenAI speech provider
    ///
    /// # Errors
    ///
    /// Returns `SpeechError::Configuration` if the configuration is invalid.
    pub fn new(config: SpeechConfig) -> Result<Self, SpeechError> {
        config.validate().map_err(SpeechError::Configuration)?;

        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(|e| {
                SpeechError::Configuration(format!("Failed to create HTTP client: {e}"))
            })?;

        Ok(Self { client, config })
    }

    fn api_key(&self) -> &str {
        self.config.api_key.as_deref().unwrap_or_default()
    }

    fn stt_url(&self) -> String {
        format!("{}/audio/transcriptions", self.config.base_url)
    }

    fn tts_url(&self) -> String {
        format!("{}/audio/speech", self.config.base_url)
    }

    /// Decode the transcription response as an explicit union of the known
    /// provider shapes: a JSON object exposing a `text` field, or a bare
    /// text body. Anything else fails closed.
    fn decode_transcript(body: &str) -> Result<String, SpeechError> {
        if body.trim_start().starts_with('{') {
            let payload: TranscriptionJson = serde_json::from_str(body.trim_start())
                .map_err(|e| {
                    SpeechError::InvalidResponse(format!(
                        "Unrecognized transcription response shape: {e}"
                    ))
                })?;
            return Ok(payload.text);
        }
        Ok(body.to_string())
    }

    fn classify_synthesis_error(&self, status: reqwest::StatusCode, body: &str) -> SpeechError {
        if let Ok(api_error) = serde_json::from_str::<ApiError>(body) {
            return match api_error.error.code.as_deref() {
                Some("rate_limit_exceeded") => SpeechError::RateLimited,
                Some("model_not_found") => {
                    SpeechError::ModelNotAvailable(self.config.tts_model.clone())
                },
                _ => SpeechError::RequestFailed(api_error.error.message),
            };
        }
        SpeechError::RequestFailed(format!("HTTP {status}: {body}"))
    }

    async fn send_tts_request(
        &self,
        text: &str,
        voice: &str,
        response_format: Option<&str>,
    ) -> Result<reqwest::Response, SpeechError> {
        let request = TtsRequest {
            model: &self.config.tts_model,
            input: text,
            voice,
            response_format,
        };

        let response = self
            .client
            .post(self.tts_url())
            .bearer_auth(self.api_key())
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(self.classify_synthesis_error(status, &body));
        }

        Ok(response)
    }

    /// Tier 1 and 2: read the audio payload incrementally from the response
    /// byte stream.
    async fn synthesize_streamed(
        &self,
        text: &str,
        voice: &str,
        response_format: Option<&str>,
    ) -> Result<Bytes, SpeechError> {
        let response = self.send_tts_request(text, voice, response_format).await?;

        let mut stream = response.bytes_stream();
        let mut audio = BytesMut::new();
        while let Some(chunk) = stream.next().await {
            audio.extend_from_slice(&chunk?);
        }

        if audio.is_empty() {
            return Err(SpeechError::InvalidResponse(
                "Empty audio payload".to_string(),
            ));
        }

        Ok(audio.freeze())
    }

    /// Tier 3: read the whole payload at once and extract bytes from
    /// whichever shape the provider returned. A JSON body with an `audio`
    /// field carries base64; anything else is served as the raw payload.
    async fn synthesize_blocking(
        &self,
        text: &str,
        voice: &str,
        response_format: Option<&str>,
    ) -> Result<Bytes, SpeechError> {
        let response = self.send_tts_request(text, voice, response_format).await?;

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();

        let body = response.bytes().await?;

        if content_type.starts_with("application/json") {
            if let Ok(payload) = serde_json::from_slice::<AudioJson>(&body) {
                let decoded = BASE64.decode(payload.audio).map_err(|e| {
                    SpeechError::InvalidResponse(format!("Invalid base64 audio payload: {e}"))
                })?;
                return Ok(Bytes::from(decoded));
            }
        }

        if body.is_empty() {
            return Err(SpeechError::InvalidResponse(
                "Empty audio payload".to_string(),
            ));
        }

        Ok(body)
    }
}

/// OpenAI transcription response (JSON shape)
#[derive(Debug, Deserialize)]
struct TranscriptionJson {
    text: String,
}

/// OpenAI TTS request body
#[derive(Debug, Serialize)]
struct TtsRequest<'a> {
    model: &'a str,
    input: &'a str,
    voice: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<&'a str>,
}

/// OpenAI TTS JSON response carrying base64 audio
#[derive(Debug, Deserialize)]
struct AudioJson {
    audio: String,
}

/// OpenAI API error response
#[derive(Debug, Deserialize)]
struct ApiError {
    error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    message: String,
    #[serde(default)]
    code: Option<String>,
}

#[async_trait]
impl SpeechToText for OpenAiSpeechProvider {
    #[instrument(skip(self, audio), fields(audio_size = audio.size_bytes(), mime = %audio.mime_type()))]
    async fn transcribe(&self, audio: AudioUpload) -> Result<String, SpeechError> {
        debug!("Transcribing audio");

        if audio.is_empty() {
            return Err(SpeechError::InvalidAudio("Audio data is empty".to_string()));
        }

        let filename = audio.filename().to_string();
        let mime_type = audio.mime_type().to_string();
        let data = audio.into_data();

        let file_part = Part::bytes(data)
            .file_name(filename)
            .mime_str(&mime_type)
            .map_err(|e| SpeechError::InvalidAudio(format!("Invalid MIME type: {e}")))?;

        let form = Form::new()
            .part("file", file_part)
            .text("model", self.config.stt_model.clone())
            .text("response_format", "text");

        let response = self
            .client
            .post(self.stt_url())
            .bearer_auth(self.api_key())
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();

            if let Ok(api_error) = serde_json::from_str::<ApiError>(&body) {
                return match api_error.error.code.as_deref() {
                    Some("rate_limit_exceeded") => Err(SpeechError::RateLimited),
                    Some("model_not_found") => Err(SpeechError::ModelNotAvailable(
                        self.config.stt_model.clone(),
                    )),
                    _ => Err(SpeechError::TranscriptionFailed(api_error.error.message)),
                };
            }

            return Err(SpeechError::TranscriptionFailed(format!(
                "HTTP {status}: {body}"
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| SpeechError::InvalidResponse(format!("Failed to read response: {e}")))?;

        let text = Self::decode_transcript(&body)?;

        if text.trim().is_empty() {
            return Err(SpeechError::TranscriptionFailed(
                "Transcription response has no text".to_string(),
            ));
        }

        debug!(text_len = text.len(), "Transcription complete");

        Ok(text)
    }

    async fn is_available(&self) -> bool {
        let models_url = format!("{}/models", self.config.base_url);

        match self
            .client
            .get(&models_url)
            .bearer_auth(self.api_key())
            .timeout(Duration::from_secs(5))
            .send()
            .await
        {
            Ok(response) => response.status().is_success(),
            Err(e) => {
                warn!("OpenAI STT availability check failed: {}", e);
                false
            },
        }
    }

    fn model_name(&self) -> &str {
        &self.config.stt_model
    }
}

#[async_trait]
impl TextToSpeech for OpenAiSpeechProvider {
    #[instrument(skip(self, text), fields(text_len = text.len(), voice = %voice, format = %format))]
    async fn synthesize(
        &self,
        text: &str,
        voice: &str,
        format: &str,
    ) -> Result<Bytes, SpeechError> {
        debug!("Synthesizing speech");

        if text.is_empty() {
            return Err(SpeechError::SynthesisFailed(
                "Text cannot be empty".to_string(),
            ));
        }

        match self.synthesize_streamed(text, voice, Some(format)).await {
            Ok(audio) => return Ok(audio),
            Err(e) => {
                warn!(error = %e, "TTS with explicit format failed, retrying with provider default");
            },
        }

        match self.synthesize_streamed(text, voice, None).await {
            Ok(audio) => return Ok(audio),
            Err(e) => {
                warn!(error = %e, "TTS with provider default failed, retrying non-incrementally");
            },
        }

        match self.synthesize_blocking(text, voice, Some(format)).await {
            Ok(audio) => {
                debug!(audio_size = audio.len(), "Speech synthesis complete");
                Ok(audio)
            },
            Err(e) => {
                error!(error = %e, "All TTS fallback tiers exhausted");
                Err(SpeechError::SynthesisFailed(e.to_string()))
            },
        }
    }

    async fn is_available(&self) -> bool {
        SpeechToText::is_available(self).await
    }

    fn model_name(&self) -> &str {
        &self.config.tts_model
    }

    fn default_voice(&self) -> &str {
        &self.config.default_voice
    }
}
