use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum EntryKind {
    UserText,
    UserImage,
    AiResponse,
}

impl EntryKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntryKind::UserText => "user_text",
            EntryKind::UserImage => "user_image",
            EntryKind::AiResponse => "ai_response",
        }
    }
}

/// One persisted record of a user message, an uploaded image or an assistant reply.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HistoryEntry {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    pub kind: EntryKind,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media_path: Option<String>,
}

impl HistoryEntry {
    pub fn new(kind: EntryKind, content: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: entry_id(&now),
            timestamp: now,
            kind,
            content: content.into(),
            media_path: None,
        }
    }

    pub fn with_media(mut self, path: impl Into<String>) -> Self {
        self.media_path = Some(path.into());
        self
    }
}

/// Ids are the creation time down to the microsecond.
pub fn entry_id(at: &DateTime<Utc>) -> String {
    at.format("%Y%m%d%H%M%S%6f").to_string()
}
