//! Profile endpoints (camelCase JSON)

use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};
use linkhub_core::{Profile, ProfileDraft, ProfileInput};

use crate::http::error::ApiError;
use crate::http::extractors::ValidJson;
use crate::http::server::AppState;

/// GET /profile
async fn get_profile(State(state): State<Arc<AppState>>) -> Result<Json<Profile>, ApiError> {
    let profile = state
        .repos
        .profiles
        .get()
        .await?
        .ok_or_else(|| ApiError::not_found("profile", "current"))?;
    Ok(Json(profile))
}

/// PUT /profile - replace the profile, return what was stored
async fn put_profile(
    State(state): State<Arc<AppState>>,
    ValidJson(draft): ValidJson<ProfileDraft>,
) -> Result<Json<Profile>, ApiError> {
    let input = ProfileInput::try_from(draft)?;
    state.repos.profiles.save(&input).await?;
    tracing::info!(name = %input.name(), "Profile saved");

    get_profile(State(state)).await
}

/// Profile routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/profile", get(get_profile).put(put_profile))
}
