//! Chat service - Diary-assistant conversation and summarization

use std::{fmt, sync::Arc};

use ai_core::TextGeneration;
use domain::entities::{ChatMessage, EventContext};
use tracing::{debug, instrument};

use crate::{error::ApplicationError, prompt};

/// Service for diary-assistant chat and conversation summarization
pub struct ChatService {
    generator: Arc<dyn TextGeneration>,
}

impl fmt::Debug for ChatService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChatService")
            .field("model", &self.generator.model_name())
            .finish_non_exhaustive()
    }
}

impl ChatService {
    /// Create a new chat service
    pub fn new(generator: Arc<dyn TextGeneration>) -> Self {
        Self { generator }
    }

    /// Generate an assistant response grounded in event context and history
    ///
    /// # Errors
    ///
    /// Returns `ApplicationError::Validation` for empty message content
    /// before any provider call, or the provider's error otherwise.
    #[instrument(skip(self, content, context, history), fields(
        content_len = content.len(),
        context_len = context.len(),
        history_len = history.len()
    ))]
    pub async fn generate_response(
        &self,
        content: &str,
        context: &[EventContext],
        history: &[ChatMessage],
    ) -> Result<String, ApplicationError> {
        if content.trim().is_empty() {
            return Err(ApplicationError::Validation(
                "Message content cannot be empty".to_string(),
            ));
        }

        let full_prompt = prompt::build_chat_prompt(content, context, history);
        debug!(prompt_len = full_prompt.len(), "Generating chat response");

        let response = self.generator.generate(&full_prompt).await?;

        debug!(response_len = response.len(), "Chat response generated");
        Ok(response)
    }

    /// Summarize a conversation transcript into diary prose
    ///
    /// # Errors
    ///
    /// Returns `ApplicationError::Validation` for an empty transcript before
    /// any provider call, or the provider's error otherwise.
    #[instrument(skip(self, conversation), fields(conversation_len = conversation.len()))]
    pub async fn summarize(&self, conversation: &str) -> Result<String, ApplicationError> {
        if conversation.trim().is_empty() {
            return Err(ApplicationError::Validation(
                "Conversation cannot be empty".to_string(),
            ));
        }

        let full_prompt = prompt::build_summary_prompt(conversation);
        debug!(prompt_len = full_prompt.len(), "Summarizing conversation");

        let summary = self.generator.generate(&full_prompt).await?;

        debug!(summary_len = summary.len(), "Summary generated");
        Ok(summary)
    }

    /// Check if the generation provider is available
    pub async fn is_available(&self) -> bool {
        self.generator.is_available().await
    }

    /// Get the name of the current generation model
    pub fn model_name(&self) -> &str {
        self.generator.model_name()
    }
}
