//! Domain - Request-scoped entities for the AudioDiary backend
//!
//! Everything here is a transient value constructed from an inbound request
//! and dropped once the response is produced. Nothing persists.

pub mod entities;

pub use entities::{ChatMessage, EventContext};
