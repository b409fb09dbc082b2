//! AI Speech - Speech-to-Text and Text-to-Speech provider clients
//!
//! Provides the speech processing seams of the AudioDiary backend:
//! - `SpeechToText` - transcribe uploaded audio to text (STT)
//! - `TextToSpeech` - synthesize speech from text (TTS)
//!
//! # Architecture
//!
//! This crate follows the ports & adapters pattern:
//! - `ports` defines the traits (ports)
//! - `providers` contains the OpenAI adapter
//!
//! The TTS adapter carries a three-tier fallback chain across request
//! variants; the STT adapter decodes the provider response as an explicit
//! union of the known shapes and fails closed on anything else.

pub mod config;
pub mod error;
pub mod ports;
pub mod providers;
pub mod types;

pub use config::SpeechConfig;
pub use error::SpeechError;
pub use ports::{SpeechToText, TextToSpeech};
pub use providers::OpenAiSpeechProvider;
pub use types::{AudioUpload, media_type};
