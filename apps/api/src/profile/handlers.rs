use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::errors::AppError;
use crate::profile::models::{Profile, ProfilePatch};
use crate::state::AppState;

#[derive(Deserialize)]
pub struct UserIdQuery {
    pub user_id: Uuid,
}

#[derive(Deserialize)]
pub struct ProfileUpdateRequest {
    pub user_id: Uuid,
    #[serde(flatten)]
    pub patch: ProfilePatch,
}

/// GET /api/v1/profile
pub async fn handle_get_profile(
    State(state): State<AppState>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<Profile>, AppError> {
    let profile = state
        .profiles
        .get(params.user_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Profile for user {} not found", params.user_id)))?;
    Ok(Json(profile))
}

/// PUT /api/v1/profile
pub async fn handle_put_profile(
    State(state): State<AppState>,
    Json(req): Json<ProfileUpdateRequest>,
) -> Result<Json<Profile>, AppError> {
    let profile = state.profiles.put(req.user_id, req.patch).await?;
    Ok(Json(profile))
}
