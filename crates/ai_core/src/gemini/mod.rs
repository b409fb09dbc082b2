//! Gemini REST API adapter

mod client;

pub use client::GeminiClient;
