//! Link endpoints

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use linkhub_core::{Link, LinkPatch, NewLink, ValidationError};
use serde::{Deserialize, Deserializer, Serialize};

use crate::http::error::ApiError;
use crate::http::extractors::{LinkId, ValidJson};
use crate::http::server::AppState;

/// Create link request
#[derive(Debug, Deserialize)]
pub struct CreateLinkRequest {
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Partial update request.
///
/// `"title": null` clears the title; omitting the key leaves it alone.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateLinkRequest {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub title: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub description: Option<Option<String>>,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
}

/// Present-but-null becomes `Some(None)`; `#[serde(default)]` covers absent.
fn double_option<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

impl TryFrom<UpdateLinkRequest> for LinkPatch {
    type Error = ValidationError;

    fn try_from(req: UpdateLinkRequest) -> Result<Self, Self::Error> {
        let mut patch = LinkPatch::new();
        if let Some(url) = req.url.as_deref() {
            patch = patch.with_url(url)?;
        }
        if let Some(title) = req.title {
            patch = patch.with_title(title.as_deref())?;
        }
        if let Some(description) = req.description {
            patch = patch.with_description(description.as_deref())?;
        }
        if let Some(tags) = req.tags {
            patch = patch.with_tags(&tags)?;
        }
        Ok(patch)
    }
}

#[derive(Debug, Deserialize)]
pub struct TagQuery {
    pub tag: Option<String>,
}

/// Create link response
#[derive(Debug, Serialize)]
pub struct CreatedResponse {
    pub id: i64,
}

/// GET /links?tag=NAME - list links, newest first
async fn list_links(
    State(state): State<Arc<AppState>>,
    Query(query): Query<TagQuery>,
) -> Result<Json<Vec<Link>>, ApiError> {
    let tag = query.tag.as_deref().map(str::trim).filter(|t| !t.is_empty());
    let links = state.repos.links.list(tag).await?;
    Ok(Json(links))
}

/// POST /links - create a link with its tags
async fn create_link(
    State(state): State<Arc<AppState>>,
    ValidJson(req): ValidJson<CreateLinkRequest>,
) -> Result<(StatusCode, Json<CreatedResponse>), ApiError> {
    let link = NewLink::new(
        &req.url,
        req.title.as_deref(),
        req.description.as_deref(),
        &req.tags,
    )?;
    let id = state.repos.links.create(&link).await?;
    tracing::info!(id, "Link created");

    Ok((StatusCode::CREATED, Json(CreatedResponse { id })))
}

/// GET /links/{id} - get a single link
async fn get_link(
    State(state): State<Arc<AppState>>,
    LinkId(id): LinkId,
) -> Result<Json<Link>, ApiError> {
    let link = state
        .repos
        .links
        .get(id)
        .await?
        .ok_or_else(|| ApiError::not_found("link", id))?;
    Ok(Json(link))
}

/// PATCH /links/{id} - apply a partial update, return the stored link
async fn update_link(
    State(state): State<Arc<AppState>>,
    LinkId(id): LinkId,
    ValidJson(req): ValidJson<UpdateLinkRequest>,
) -> Result<Json<Link>, ApiError> {
    let patch = LinkPatch::try_from(req)?;

    if !state.repos.links.update(id, &patch).await? {
        return Err(ApiError::not_found("link", id));
    }

    let link = state
        .repos
        .links
        .get(id)
        .await?
        .ok_or_else(|| ApiError::not_found("link", id))?;
    Ok(Json(link))
}

/// DELETE /links/{id}
async fn delete_link(
    State(state): State<Arc<AppState>>,
    LinkId(id): LinkId,
) -> Result<StatusCode, ApiError> {
    if state.repos.links.delete(id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::not_found("link", id))
    }
}

/// POST /links/{id}/share - bump the share counter
async fn share_link(
    State(state): State<Arc<AppState>>,
    LinkId(id): LinkId,
) -> Result<StatusCode, ApiError> {
    if state.repos.links.increment_share_count(id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::not_found("link", id))
    }
}

/// Link routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/links", get(list_links).post(create_link))
        .route(
            "/links/{id}",
            get(get_link).patch(update_link).delete(delete_link),
        )
        .route("/links/{id}/share", post(share_link))
}
