//! Calendar event context entity

use serde::{Deserialize, Serialize};

/// A calendar-like item used to ground conversation in real past activity.
///
/// All fields are optional; `start` and `end`, when present, are expected to
/// be ISO-8601 timestamps but are carried as raw strings and only parsed at
/// prompt-assembly time. A start of local midnight paired with an end of
/// 23:59 on the same date marks an all-day event.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventContext {
    /// Short event title
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    /// Longer free-text description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Event start, ISO-8601
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<String>,
    /// Event end, ISO-8601
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<String>,
    /// Where the event took place
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

impl EventContext {
    /// Create an event with just a summary
    pub fn with_summary(summary: impl Into<String>) -> Self {
        Self {
            summary: Some(summary.into()),
            ..Self::default()
        }
    }
}
