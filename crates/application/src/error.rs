//! Application-level errors

use ai_core::GenerationError;
use ai_speech::SpeechError;
use thiserror::Error;

/// Errors that can occur in the application layer
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// Request rejected before any provider call
    #[error("Validation error: {0}")]
    Validation(String),

    /// Text generation error
    #[error(transparent)]
    Generation(#[from] GenerationError),

    /// Speech processing error
    #[error(transparent)]
    Speech(#[from] SpeechError),
}

impl ApplicationError {
    /// Check if this error was raised by boundary validation
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}
