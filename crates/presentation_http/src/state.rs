//! Application state shared by all handlers

use std::sync::Arc;

use application::{ChatService, SpeechService};

/// Shared application state, injected by the composition root
#[derive(Debug, Clone)]
pub struct AppState {
    /// Chat and summarization service
    pub chat: Arc<ChatService>,
    /// Transcription and synthesis service
    pub speech: Arc<SpeechService>,
}

impl AppState {
    /// Create a new application state
    pub fn new(chat: Arc<ChatService>, speech: Arc<SpeechService>) -> Self {
        Self { chat, speech }
    }
}
