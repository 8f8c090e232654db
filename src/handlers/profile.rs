use axum::{extract::State, Extension, Json};

use crate::domain::{Identity, Profile, ProfileUpdate};
use crate::error::AppResult;
use crate::AppState;

/// Get the user's profile
pub async fn get_profile(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
) -> AppResult<Json<Profile>> {
    Ok(Json(state.profiles.fetch(&identity).await?))
}

/// Update some or all profile fields
pub async fn update_profile(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Json(payload): Json<ProfileUpdate>,
) -> AppResult<Json<Profile>> {
    Ok(Json(state.profiles.update(&identity, payload).await?))
}
