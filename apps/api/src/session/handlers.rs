use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::profile::CompanyProfile;
use crate::session::SessionState;
use crate::state::AppState;

pub const PROFILE_SAVED_MESSAGE: &str = "Company details saved successfully!";

#[derive(Serialize)]
pub struct SaveProfileResponse {
    pub message: &'static str,
    pub session: SessionState,
}

/// POST /api/v1/sessions
pub async fn handle_create_session(
    State(state): State<AppState>,
) -> (StatusCode, Json<SessionState>) {
    (StatusCode::CREATED, Json(state.sessions.create()))
}

/// GET /api/v1/sessions/:id
pub async fn handle_get_session(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<SessionState>, AppError> {
    state
        .sessions
        .get(session_id)
        .map(Json)
        .ok_or_else(|| not_found(session_id))
}

/// PUT /api/v1/sessions/:id/profile
///
/// "Save Company Details". Fields are stored exactly as submitted.
pub async fn handle_save_profile(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Json(profile): Json<CompanyProfile>,
) -> Result<Json<SaveProfileResponse>, AppError> {
    let session = state
        .sessions
        .save_profile(session_id, profile)
        .ok_or_else(|| not_found(session_id))?;

    Ok(Json(SaveProfileResponse {
        message: PROFILE_SAVED_MESSAGE,
        session,
    }))
}

fn not_found(session_id: Uuid) -> AppError {
    AppError::NotFound(format!("Session {session_id} not found"))
}
