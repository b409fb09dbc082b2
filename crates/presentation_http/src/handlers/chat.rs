//! Chat and summarization handlers

use axum::{Json, extract::State};
use domain::entities::{ChatMessage, EventContext};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::{error::ApiError, state::AppState};

/// Chat message request body
#[derive(Debug, Deserialize)]
pub struct ChatMessageRequest {
    /// User message
    pub content: String,
    /// Prior conversation turns, oldest first
    #[serde(default)]
    pub messages: Vec<ChatMessage>,
    /// Calendar-event context grounding the reply
    #[serde(default)]
    pub context: Vec<EventContext>,
}

/// Chat message response body
#[derive(Debug, Serialize)]
pub struct ChatMessageResponse {
    /// Assistant reply
    pub content: String,
}

/// Summarize request body
#[derive(Debug, Deserialize)]
pub struct SummarizeRequest {
    /// Conversation transcript to turn into diary prose
    pub conversation: String,
}

/// Summarize response body
#[derive(Debug, Serialize)]
pub struct SummarizeResponse {
    /// Diary prose
    pub summary: String,
}

/// Generate an assistant reply grounded in event context
#[instrument(skip(state, request), fields(
    content_len = request.content.len(),
    context_len = request.context.len()
))]
pub async fn chat_message(
    State(state): State<AppState>,
    Json(request): Json<ChatMessageRequest>,
) -> Result<Json<ChatMessageResponse>, ApiError> {
    let content = state
        .chat
        .generate_response(&request.content, &request.context, &request.messages)
        .await?;

    Ok(Json(ChatMessageResponse { content }))
}

/// Summarize a conversation into diary prose
#[instrument(skip(state, request), fields(conversation_len = request.conversation.len()))]
pub async fn summarize(
    State(state): State<AppState>,
    Json(request): Json<SummarizeRequest>,
) -> Result<Json<SummarizeResponse>, ApiError> {
    let summary = state.chat.summarize(&request.conversation).await?;

    Ok(Json(SummarizeResponse { summary }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chat_request_defaults_to_empty_context() {
        let json = r#"{"content": "今日は楽しかった"}"#;
        let request: ChatMessageRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.content, "今日は楽しかった");
        assert!(request.messages.is_empty());
        assert!(request.context.is_empty());
    }

    #[test]
    fn chat_request_with_history_and_context() {
        let json = r#"{
            "content": "どうだった?",
            "messages": [{"role": "user", "content": "おはよう"}],
            "context": [{"summary": "会議", "start": "2025-06-10T09:00:00"}]
        }"#;
        let request: ChatMessageRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.messages.len(), 1);
        assert_eq!(request.context[0].summary.as_deref(), Some("会議"));
    }

    #[test]
    fn chat_response_serializes_content() {
        let response = ChatMessageResponse {
            content: "いいですね".to_string(),
        };
        let json = serde_json::to_string(&response).unwrap();
        assert_eq!(json, r#"{"content":"いいですね"}"#);
    }

    #[test]
    fn summarize_request_deserializes() {
        let json = r#"{"conversation": "user: 散歩した"}"#;
        let request: SummarizeRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.conversation, "user: 散歩した");
    }
}
