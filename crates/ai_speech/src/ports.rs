//! Port definitions for speech processing
//!
//! Defines the traits (ports) that speech processing adapters must implement.

use async_trait::async_trait;
use bytes::Bytes;

use crate::error::SpeechError;
use crate::types::AudioUpload;

/// Port for Speech-to-Text (STT) implementations
#[async_trait]
pub trait SpeechToText: Send + Sync {
    /// Transcribe uploaded audio to plain text
    ///
    /// # Errors
    ///
    /// Returns `SpeechError::TranscriptionFailed` when the provider yields
    /// no usable text, and other `SpeechError` variants for transport or
    /// provider failures.
    async fn transcribe(&self, audio: AudioUpload) -> Result<String, SpeechError>;

    /// Check if the STT service is available
    async fn is_available(&self) -> bool;

    /// Get the name of the current STT model
    fn model_name(&self) -> &str;
}

/// Port for Text-to-Speech (TTS) implementations
#[async_trait]
pub trait TextToSpeech: Send + Sync {
    /// Convert text to speech
    ///
    /// `format` is the provider-facing format name (e.g. "mp3", "wav"); the
    /// adapter decides how to negotiate it with the provider, including any
    /// fallback across request variants.
    ///
    /// # Errors
    ///
    /// Returns `SpeechError::SynthesisFailed` when every attempt is
    /// exhausted, carrying the last underlying error.
    async fn synthesize(
        &self,
        text: &str,
        voice: &str,
        format: &str,
    ) -> Result<Bytes, SpeechError>;

    /// Check if the TTS service is available
    async fn is_available(&self) -> bool;

    /// Get the name of the current TTS model
    fn model_name(&self) -> &str;

    /// Get the default voice ID
    fn default_voice(&self) -> &str;
}
