//! Application layer - Services orchestrating the AI provider ports
//!
//! This crate contains the use cases of the AudioDiary backend:
//! - `ChatService` - diary-assistant chat and conversation summarization
//! - `SpeechService` - transcription (one-shot and token stream) and synthesis
//! - `prompt` - context-to-prompt assembly for the diary assistant
//!
//! Services hold `Arc<dyn Trait>` ports injected by the composition root and
//! perform boundary validation before any provider call.

pub mod error;
pub mod prompt;
pub mod services;

pub use error::ApplicationError;
pub use services::{ChatService, SpeechService};
