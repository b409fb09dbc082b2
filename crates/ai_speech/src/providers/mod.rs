//! Speech provider adapters

mod openai;

pub use openai::OpenAiSpeechProvider;
