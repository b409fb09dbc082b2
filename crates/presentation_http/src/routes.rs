//! Route definitions

use axum::{
    Router,
    routing::{get, post},
};

use crate::{handlers, state::AppState};

/// Create the main router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Banner and health endpoints
        .route("/", get(handlers::health::root))
        .route("/health", get(handlers::health::health_check))
        // Chat API (v1)
        .route("/api/v1/chat/message", post(handlers::chat::chat_message))
        .route("/api/v1/chat/summarize", post(handlers::chat::summarize))
        // Speech-to-text API (v1)
        .route("/api/v1/stt/transcribe", post(handlers::speech::transcribe))
        .route(
            "/api/v1/stt/transcribe/stream",
            post(handlers::speech::transcribe_stream),
        )
        // Text-to-speech API (v1)
        .route("/api/v1/tts/synthesize", post(handlers::speech::synthesize))
        // Attach state
        .with_state(state)
}
