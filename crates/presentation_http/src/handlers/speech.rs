//! Speech handlers - transcription and synthesis
//!
//! The streaming transcription endpoint delivers the transcript over SSE as
//! `{delta}` events followed by a final `{done, text}` event. Failures after
//! the response has started are sent as an in-band `{error}` event.

use std::convert::Infallible;
use std::time::Duration;

use ai_speech::{AudioUpload, media_type};
use application::ApplicationError;
use axum::{
    Json,
    extract::{Multipart, State},
    http::header,
    response::{
        IntoResponse,
        sse::{Event, KeepAlive, Sse},
    },
};
use futures::{Stream, StreamExt, stream};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::instrument;

use crate::{error::ApiError, state::AppState};

/// Transcription response body
#[derive(Debug, Serialize)]
pub struct TranscribeResponse {
    /// Transcribed text
    pub text: String,
}

/// Synthesis request body
#[derive(Debug, Deserialize)]
pub struct SynthesizeRequest {
    /// Text to speak
    pub text: String,
    /// Voice name
    #[serde(default = "default_voice")]
    pub voice: String,
    /// Output audio format
    #[serde(default = "default_format")]
    pub format: String,
}

fn default_voice() -> String {
    "alloy".to_string()
}

fn default_format() -> String {
    "mp3".to_string()
}

/// Transcribe an uploaded audio file
#[instrument(skip(state, multipart))]
pub async fn transcribe(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<TranscribeResponse>, ApiError> {
    let audio = read_audio_upload(&mut multipart).await?;

    let text = state.speech.transcribe(audio).await?;

    Ok(Json(TranscribeResponse { text }))
}

/// Transcribe an uploaded audio file, delivering the transcript over SSE
///
/// The final `{done, text}` event carries the concatenated tokens with the
/// trailing separator trimmed, so `text` has no dangling space.
#[instrument(skip(state, multipart))]
pub async fn transcribe_stream(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Sse<impl Stream<Item = Result<Event, Infallible>>>, ApiError> {
    let audio = read_audio_upload(&mut multipart).await?;

    let tokens = state.speech.stream_transcribe(audio).boxed();

    let events = stream::unfold(
        SseState {
            tokens: Some(tokens),
            text: String::new(),
        },
        |mut sse| async move {
            let tokens = sse.tokens.as_mut()?;

            let event = match tokens.next().await {
                Some(Ok(token)) => {
                    sse.text.push_str(&token);
                    data_event(&json!({"delta": token}))
                },
                Some(Err(e)) => {
                    sse.tokens = None;
                    data_event(&json!({"error": e.to_string()}))
                },
                None => {
                    sse.tokens = None;
                    let text = sse.text.trim_end().to_string();
                    data_event(&json!({"done": true, "text": text}))
                },
            };

            Some((Ok::<_, Infallible>(event), sse))
        },
    );

    Ok(Sse::new(events).keep_alive(
        KeepAlive::new()
            .interval(Duration::from_secs(15))
            .text("keep-alive"),
    ))
}

/// Synthesize speech and return the raw audio bytes
#[instrument(skip(state, request), fields(text_len = request.text.len(), format = %request.format))]
pub async fn synthesize(
    State(state): State<AppState>,
    Json(request): Json<SynthesizeRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let audio = state
        .speech
        .synthesize(&request.text, Some(&request.voice), &request.format)
        .await?;

    let content_type = media_type(&request.format);

    Ok(([(header::CONTENT_TYPE, content_type)], audio))
}

struct SseState {
    tokens: Option<futures::stream::BoxStream<'static, Result<String, ApplicationError>>>,
    text: String,
}

fn data_event(payload: &serde_json::Value) -> Event {
    Event::default().data(payload.to_string())
}

/// Read the first multipart part as the audio upload, applying the default
/// filename and MIME type when absent.
async fn read_audio_upload(multipart: &mut Multipart) -> Result<AudioUpload, ApiError> {
    let field = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(format!("Invalid multipart request: {e}")))?
        .ok_or_else(|| ApiError::BadRequest("No audio file provided".to_string()))?;

    let filename = field.file_name().unwrap_or("audio.webm").to_string();
    let mime_type = field.content_type().unwrap_or("audio/webm").to_string();

    let data = field
        .bytes()
        .await
        .map_err(|e| ApiError::BadRequest(format!("Failed to read audio upload: {e}")))?;

    Ok(AudioUpload::new(data.to_vec(), filename, mime_type))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn synthesize_request_applies_defaults() {
        let json = r#"{"text": "こんにちは"}"#;
        let request: SynthesizeRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.text, "こんにちは");
        assert_eq!(request.voice, "alloy");
        assert_eq!(request.format, "mp3");
    }

    #[test]
    fn synthesize_request_accepts_overrides() {
        let json = r#"{"text": "Hi", "voice": "nova", "format": "wav"}"#;
        let request: SynthesizeRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.voice, "nova");
        assert_eq!(request.format, "wav");
    }

    #[test]
    fn transcribe_response_serializes() {
        let response = TranscribeResponse {
            text: "今日は散歩に行った".to_string(),
        };
        let json = serde_json::to_string(&response).unwrap();
        assert_eq!(json, r#"{"text":"今日は散歩に行った"}"#);
    }

    #[test]
    fn data_event_renders_json() {
        let event = data_event(&json!({"delta": "hello "}));
        let debug = format!("{event:?}");
        assert!(debug.contains("delta"));
    }
}
