use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use serde::Deserialize;

use crate::errors::AppError;
use crate::services::credentials::{self, CredentialStatus};
use crate::state::AppState;

use super::posts::parse_platform;
use super::run_blocking;

// GET /api/credentials
pub async fn list_credentials(State(state): State<Arc<AppState>>) -> Json<Vec<CredentialStatus>> {
    Json(credentials::list_credentials(&state.credentials))
}

// POST /api/credentials
#[derive(Deserialize)]
pub struct SaveCredentialRequest {
    #[serde(default)]
    pub platform: String,
    #[serde(default)]
    pub username: String,
}

pub async fn save_credential(
    State(state): State<Arc<AppState>>,
    Json(body): Json<SaveCredentialRequest>,
) -> Result<Json<CredentialStatus>, AppError> {
    let platform = parse_platform(&body.platform)?;
    let status = run_blocking(move || {
        credentials::save_credential(&state.credentials, platform, &body.username)
    })
    .await??;
    Ok(Json(status))
}
