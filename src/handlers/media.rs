use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::{Path, Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::models::{EntryKind, HistoryEntry};
use crate::services::assistant::SessionContext;
use crate::services::media::{self, MediaKind, StoredMedia};
use crate::state::AppState;

use super::run_blocking;

#[derive(Deserialize)]
pub struct UploadQuery {
    #[serde(default)]
    pub filename: String,
}

#[derive(Serialize)]
pub struct UploadResponse {
    #[serde(flatten)]
    media: StoredMedia,
    #[serde(skip_serializing_if = "Option::is_none")]
    history_entry: Option<HistoryEntry>,
}

// POST /api/media/:kind?filename=
pub async fn upload(
    State(state): State<Arc<AppState>>,
    Path(kind): Path<String>,
    Query(query): Query<UploadQuery>,
    body: Bytes,
) -> Result<Json<UploadResponse>, AppError> {
    let kind = MediaKind::parse(&kind)
        .ok_or_else(|| AppError::Validation(format!("Tipo de mídia desconhecido: {kind}")))?;

    run_blocking(move || -> Result<_, AppError> {
        let stored = media::store_upload(&state.config.media_dir, kind, &query.filename, &body)?;

        // Only images become part of the conversation history.
        let history_entry = if kind == MediaKind::Image {
            let entry = HistoryEntry::new(EntryKind::UserImage, query.filename.clone())
                .with_media(stored.path.clone());
            let mut ctx = SessionContext::load(&state.history);
            ctx.record(&state.history, entry.clone())?;
            Some(entry)
        } else {
            None
        };

        Ok(Json(UploadResponse {
            media: stored,
            history_entry,
        }))
    })
    .await?
}
