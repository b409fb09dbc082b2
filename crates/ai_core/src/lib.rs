//! AI Core - Generative-text provider client
//!
//! Wraps the Gemini REST API behind the `TextGeneration` port. The adapter
//! takes a fully assembled prompt string and returns generated text; prompt
//! assembly lives in the application layer.

pub mod config;
pub mod error;
pub mod gemini;
pub mod ports;

pub use config::GenerationConfig;
pub use error::GenerationError;
pub use gemini::GeminiClient;
pub use ports::TextGeneration;
