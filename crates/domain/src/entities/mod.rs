//! Domain entities

mod chat_message;
mod event_context;

pub use chat_message::ChatMessage;
pub use event_context::EventContext;
