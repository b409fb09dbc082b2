//! Application services

mod chat_service;
mod speech_service;

pub use chat_service::ChatService;
pub use speech_service::SpeechService;
