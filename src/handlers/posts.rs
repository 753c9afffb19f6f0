use std::sync::Arc;

use axum::extract::{Path, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::models::{Platform, PostSchedule, POST_TIME_SLOTS};
use crate::services::scheduling::{self, NewPostSchedule};
use crate::state::AppState;

use super::run_blocking;

pub(crate) fn parse_platform(raw: &str) -> Result<Platform, AppError> {
    Platform::parse(raw).ok_or_else(|| AppError::Validation(format!("Plataforma desconhecida: {raw}")))
}

// GET /api/posts
pub async fn list_posts(State(state): State<Arc<AppState>>) -> Json<Vec<PostSchedule>> {
    let mut posts = state.posts.load();
    posts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    Json(posts)
}

// GET /api/posts/slots
#[derive(Serialize)]
pub struct SlotsResponse {
    platforms: Vec<&'static str>,
    time_slots: Vec<&'static str>,
}

pub async fn list_slots() -> Json<SlotsResponse> {
    Json(SlotsResponse {
        platforms: Platform::ALL.iter().map(|p| p.as_str()).collect(),
        time_slots: POST_TIME_SLOTS.to_vec(),
    })
}

// POST /api/posts
#[derive(Deserialize)]
pub struct ScheduleRequest {
    #[serde(default)]
    pub platform: String,
    #[serde(default)]
    pub content_type: String,
    #[serde(default)]
    pub time_slots: Vec<String>,
}

pub async fn create_post(
    State(state): State<Arc<AppState>>,
    Json(body): Json<ScheduleRequest>,
) -> Result<Json<PostSchedule>, AppError> {
    let request = NewPostSchedule {
        platform: parse_platform(&body.platform)?,
        content_type: body.content_type,
        time_slots: body.time_slots,
    };
    let post = run_blocking(move || scheduling::schedule_post(&state.posts, request)).await??;
    Ok(Json(post))
}

// DELETE /api/posts/:id
pub async fn delete_post(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, AppError> {
    run_blocking(move || scheduling::remove_post(&state.posts, &id)).await??;
    Ok(Json(serde_json::json!({"ok": true})))
}
