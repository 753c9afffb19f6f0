use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::models::HistoryEntry;
use crate::services::assistant::{self, ChatReply, SessionContext};
use crate::state::AppState;

use super::run_blocking;

// POST /api/chat
#[derive(Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: String,
}

pub async fn send_message(
    State(state): State<Arc<AppState>>,
    Json(body): Json<ChatRequest>,
) -> Result<Json<ChatReply>, AppError> {
    if body.message.trim().is_empty() {
        return Err(AppError::Validation("Digite uma mensagem.".to_string()));
    }

    let mut ctx = SessionContext::load(&state.history);
    let reply = assistant::process_message(&state, &mut ctx, &body.message).await?;
    Ok(Json(reply))
}

// GET /api/history
#[derive(Deserialize)]
pub struct HistoryQuery {
    pub limit: Option<usize>,
}

#[derive(Serialize)]
pub struct HistoryResponse {
    total: usize,
    entries: Vec<HistoryEntry>,
}

pub async fn get_history(
    State(state): State<Arc<AppState>>,
    Query(query): Query<HistoryQuery>,
) -> Json<HistoryResponse> {
    let ctx = SessionContext::load(&state.history);
    let limit = query.limit.unwrap_or(100);

    Json(HistoryResponse {
        total: ctx.history.len(),
        entries: ctx.recent(limit).into_iter().cloned().collect(),
    })
}

// DELETE /api/history/:id
pub async fn delete_entry(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, AppError> {
    let target = id.clone();
    let removed = run_blocking(move || state.history.remove_where(|e| e.id == target)).await??;
    match removed {
        0 => Err(AppError::NotFound(format!("history entry {id}"))),
        _ => Ok(Json(serde_json::json!({"ok": true}))),
    }
}

// DELETE /api/history
pub async fn clear_history(
    State(state): State<Arc<AppState>>,
) -> Result<Json<serde_json::Value>, AppError> {
    let removed = run_blocking(move || {
        state.history.update(|entries| {
            let n = entries.len();
            entries.clear();
            n
        })
    })
    .await??;
    tracing::info!(removed, "history cleared");
    Ok(Json(serde_json::json!({"ok": true, "removed": removed})))
}
