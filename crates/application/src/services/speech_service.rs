//! Speech service - Transcription and synthesis orchestration
//!
//! `stream_transcribe` delivers a pseudo-streaming transcription: the
//! one-shot provider call runs on first poll of the returned stream, and the
//! transcript is re-emitted as whitespace-delimited tokens. A fresh provider
//! call happens per invocation, nothing is cached.

use std::{fmt, sync::Arc};

use ai_speech::{AudioUpload, SpeechToText, TextToSpeech};
use bytes::Bytes;
use futures::{Stream, StreamExt};
use tracing::{debug, instrument};

use crate::error::ApplicationError;

/// Service for speech-to-text and text-to-speech
pub struct SpeechService {
    stt: Arc<dyn SpeechToText>,
    tts: Arc<dyn TextToSpeech>,
}

impl fmt::Debug for SpeechService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SpeechService")
            .field("stt_model", &self.stt.model_name())
            .field("tts_model", &self.tts.model_name())
            .finish_non_exhaustive()
    }
}

impl SpeechService {
    /// Create a new speech service
    pub fn new(stt: Arc<dyn SpeechToText>, tts: Arc<dyn TextToSpeech>) -> Self {
        Self { stt, tts }
    }

    /// Transcribe uploaded audio to text
    ///
    /// # Errors
    ///
    /// Returns `ApplicationError::Validation` for an empty upload before any
    /// provider call, or the provider's error otherwise.
    #[instrument(skip(self, audio), fields(audio_size = audio.size_bytes()))]
    pub async fn transcribe(&self, audio: AudioUpload) -> Result<String, ApplicationError> {
        if audio.is_empty() {
            return Err(ApplicationError::Validation(
                "Audio data cannot be empty".to_string(),
            ));
        }

        let text = self.stt.transcribe(audio).await?;

        debug!(text_len = text.len(), "Transcription complete");
        Ok(text)
    }

    /// Transcribe audio and re-emit the transcript as a finite token stream
    ///
    /// The provider call is deferred to the first poll. On success each
    /// whitespace-delimited token is yielded suffixed with one space, in
    /// order; on failure a single `Err` item is yielded.
    pub fn stream_transcribe(
        &self,
        audio: AudioUpload,
    ) -> impl Stream<Item = Result<String, ApplicationError>> + Send + 'static {
        let stt = Arc::clone(&self.stt);

        futures::stream::once(async move {
            if audio.is_empty() {
                return Err(ApplicationError::Validation(
                    "Audio data cannot be empty".to_string(),
                ));
            }
            stt.transcribe(audio).await.map_err(ApplicationError::from)
        })
        .flat_map(|result| {
            let items: Vec<Result<String, ApplicationError>> = match result {
                Ok(text) => text
                    .split_whitespace()
                    .map(|token| Ok(format!("{token} ")))
                    .collect(),
                Err(e) => vec![Err(e)],
            };
            futures::stream::iter(items)
        })
    }

    /// Synthesize speech from text
    ///
    /// Falls back to the provider's default voice when `voice` is `None`.
    ///
    /// # Errors
    ///
    /// Returns `ApplicationError::Validation` for empty text before any
    /// provider call, or the provider's error otherwise.
    #[instrument(skip(self, text), fields(text_len = text.len(), format = %format))]
    pub async fn synthesize(
        &self,
        text: &str,
        voice: Option<&str>,
        format: &str,
    ) -> Result<Bytes, ApplicationError> {
        if text.trim().is_empty() {
            return Err(ApplicationError::Validation(
                "Text cannot be empty".to_string(),
            ));
        }

        let voice = voice.unwrap_or_else(|| self.tts.default_voice());
        let audio = self.tts.synthesize(text, voice, format).await?;

        debug!(audio_size = audio.len(), "Synthesis complete");
        Ok(audio)
    }

    /// Check if both speech providers are available
    pub async fn is_available(&self) -> bool {
        self.stt.is_available().await && self.tts.is_available().await
    }
}
