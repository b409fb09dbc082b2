//! HTTP presentation layer for the AudioDiary backend
//!
//! Exposes the chat, summarization, transcription and synthesis services
//! over an axum HTTP API with a uniform `{detail}` error envelope.

pub mod config;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod state;

pub use config::ServerConfig;
pub use error::ApiError;
pub use state::AppState;
