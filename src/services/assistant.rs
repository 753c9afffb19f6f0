use std::sync::Arc;

use serde::Serialize;

use crate::models::{EntryKind, HistoryEntry, Intent};
use crate::services::ai::prompt::SYSTEM_PROMPT;
use crate::services::ai::{LlmProvider, Message};
use crate::services::intent::classify;
use crate::services::responses::template_for;
use crate::state::AppState;
use crate::store::{JsonStore, StoreError};

/// Per-request view of the conversation, loaded from the history file and kept
/// in step with every entry this request appends.
pub struct SessionContext {
    pub history: Vec<HistoryEntry>,
}

impl SessionContext {
    pub fn load(store: &JsonStore<HistoryEntry>) -> Self {
        Self {
            history: store.load(),
        }
    }

    pub fn record(
        &mut self,
        store: &JsonStore<HistoryEntry>,
        entry: HistoryEntry,
    ) -> Result<(), StoreError> {
        store.append(entry.clone())?;
        self.history.push(entry);
        Ok(())
    }

    /// Most recent first.
    pub fn recent(&self, limit: usize) -> Vec<&HistoryEntry> {
        let mut entries: Vec<&HistoryEntry> = self.history.iter().collect();
        entries.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        entries.truncate(limit);
        entries
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ChatReply {
    pub intent: Intent,
    pub reply: String,
    pub user_entry: HistoryEntry,
    pub reply_entry: HistoryEntry,
}

/// Records the user's message, answers it and records the answer.
///
/// With a model configured the reply comes from the model; a failed call is
/// answered with its error text instead of failing the request. Without one the
/// intent's fixed template is used.
pub async fn process_message(
    state: &Arc<AppState>,
    ctx: &mut SessionContext,
    message: &str,
) -> Result<ChatReply, StoreError> {
    let message = message.trim();
    let intent = classify(message);

    tracing::info!(intent = intent.as_str(), len = message.len(), "processing message");

    let user_entry = HistoryEntry::new(EntryKind::UserText, message);
    record_off_thread(state, ctx, user_entry.clone()).await?;

    let reply = match state.llm.as_deref() {
        Some(llm) => model_reply(llm, message).await,
        None => template_for(intent, message),
    };

    let reply_entry = HistoryEntry::new(EntryKind::AiResponse, reply.clone());
    record_off_thread(state, ctx, reply_entry.clone()).await?;

    Ok(ChatReply {
        intent,
        reply,
        user_entry,
        reply_entry,
    })
}

/// [`SessionContext::record`] with the locked file write on the blocking pool.
async fn record_off_thread(
    state: &Arc<AppState>,
    ctx: &mut SessionContext,
    entry: HistoryEntry,
) -> Result<(), StoreError> {
    let st = Arc::clone(state);
    let persisted = entry.clone();
    tokio::task::spawn_blocking(move || st.history.append(persisted)).await??;
    ctx.history.push(entry);
    Ok(())
}

pub async fn model_reply(llm: &dyn LlmProvider, message: &str) -> String {
    let messages = [Message {
        role: "user".to_string(),
        content: message.to_string(),
    }];

    match llm.chat(SYSTEM_PROMPT, &messages).await {
        Ok(text) => text,
        Err(e) => {
            tracing::error!(error = ?e, "model call failed");
            e.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::{Duration, Utc};

    use crate::services::ai::ModelError;

    struct FailingLlm(fn() -> ModelError);

    #[async_trait]
    impl LlmProvider for FailingLlm {
        async fn chat(&self, _system: &str, _messages: &[Message]) -> Result<String, ModelError> {
            Err((self.0)())
        }
    }

    struct EchoLlm;

    #[async_trait]
    impl LlmProvider for EchoLlm {
        async fn chat(&self, system: &str, messages: &[Message]) -> Result<String, ModelError> {
            assert_eq!(system, SYSTEM_PROMPT);
            Ok(format!("eco: {}", messages[0].content))
        }
    }

    #[tokio::test]
    async fn test_model_failure_becomes_reply_text() {
        let reply = model_reply(&FailingLlm(|| ModelError::Status(500)), "oi").await;
        assert_eq!(reply, "Erro na API: 500");

        let reply = model_reply(&FailingLlm(|| ModelError::RateLimited), "oi").await;
        assert_eq!(reply, ModelError::RateLimited.to_string());
        assert_ne!(reply, ModelError::Status(429).to_string());
    }

    #[tokio::test]
    async fn test_model_success_passes_text_through() {
        assert_eq!(model_reply(&EchoLlm, "oi").await, "eco: oi");
    }

    #[test]
    fn test_recent_is_reverse_chronological() {
        let now = Utc::now();
        let mut older = HistoryEntry::new(EntryKind::UserText, "primeira");
        older.timestamp = now - Duration::minutes(5);
        let mut newer = HistoryEntry::new(EntryKind::AiResponse, "segunda");
        newer.timestamp = now;

        let ctx = SessionContext {
            history: vec![older, newer],
        };
        let recent = ctx.recent(10);
        assert_eq!(recent[0].content, "segunda");
        assert_eq!(recent[1].content, "primeira");
        assert_eq!(ctx.recent(1).len(), 1);
    }
}
