//! Port definitions for text generation
//!
//! Defines the trait (port) that text generation adapters must implement.

use async_trait::async_trait;

use crate::error::GenerationError;

/// Port for generative-text provider implementations
///
/// Implementations take a fully assembled prompt and return the generated
/// text. Prompt assembly is the caller's responsibility.
#[async_trait]
pub trait TextGeneration: Send + Sync {
    /// Generate text for the given prompt
    ///
    /// # Errors
    ///
    /// Returns `GenerationError::EmptyResponse` when the provider yields no
    /// usable text, `GenerationError::ModelNotFound` when the provider
    /// signals an unknown model, and other `GenerationError` variants for
    /// transport or provider failures.
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError>;

    /// Check if the provider is reachable
    async fn is_available(&self) -> bool;

    /// Get the configured model identifier
    fn model_name(&self) -> &str;
}
