//! Routes for the stories context.

use std::time::Duration;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};
use uuid::Uuid;

use campusnet_stories::application::command_handlers;
use campusnet_stories::application::query_handlers::{self, StoryRing, StoryView};
use campusnet_stories::domain::commands;
use campusnet_stories::domain::media::Dimensions;

use crate::error::ApiError;
use crate::state::AppState;

/// Request body for `POST /`.
#[derive(Debug, Deserialize)]
pub struct PublishStoryRequest {
    /// The publishing user.
    pub owner_id: Uuid,
    /// Owner display name.
    #[serde(default)]
    pub owner_name: Option<String>,
    /// Owner avatar URL.
    #[serde(default)]
    pub owner_avatar_url: Option<String>,
    /// Object-store download URL of the media.
    pub media_url: String,
    /// MIME type of the media.
    pub content_type: String,
    /// Frame width, if known.
    #[serde(default)]
    pub width: Option<u32>,
    /// Frame height, if known.
    #[serde(default)]
    pub height: Option<u32>,
    /// Length of an in-app recording, in milliseconds.
    #[serde(default)]
    pub recorded_duration_ms: Option<u64>,
}

/// Response body for `POST /`.
#[derive(Debug, Serialize)]
pub struct PublishStoryResponse {
    /// The new story.
    pub story_id: Uuid,
}

/// Request body for `POST /{story_id}/views`.
#[derive(Debug, Deserialize)]
pub struct MarkViewedRequest {
    /// The user the story was shown to.
    pub viewer_id: Uuid,
}

/// Response body for `POST /{story_id}/views`.
#[derive(Debug, Serialize)]
pub struct MarkViewedResponse {
    /// `false` when the viewer had already been recorded.
    pub newly_viewed: bool,
}

/// Timing rules a viewer should play stories with.
#[derive(Debug, Serialize)]
pub struct PlaybackSettings {
    /// How long an image stays on screen.
    pub image_duration_ms: u128,
    /// Progress sampling period.
    pub tick_interval_ms: u128,
    /// Longest clip the recorder may publish.
    pub max_recorded_video_ms: u128,
}

/// `POST /`
#[instrument(skip(state, request), fields(owner_id = %request.owner_id))]
async fn publish_story(
    State(state): State<AppState>,
    Json(request): Json<PublishStoryRequest>,
) -> Result<(StatusCode, Json<PublishStoryResponse>), ApiError> {
    let dimensions = match (request.width, request.height) {
        (Some(width), Some(height)) => Some(Dimensions { width, height }),
        _ => None,
    };
    let command = commands::PublishStory {
        correlation_id: Uuid::new_v4(),
        owner_id: request.owner_id,
        owner_name: request.owner_name,
        owner_avatar_url: request.owner_avatar_url,
        media_url: request.media_url,
        content_type: request.content_type,
        dimensions,
        recorded_duration: request.recorded_duration_ms.map(Duration::from_millis),
    };

    info!(correlation_id = %command.correlation_id, "handling publish_story command");

    let story = command_handlers::handle_publish_story(
        &command,
        &state.policy,
        state.clock.as_ref(),
        &*state.story_repository,
    )
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(PublishStoryResponse { story_id: story.id }),
    ))
}

/// `POST /{story_id}/views`
#[instrument(skip(state, request), fields(viewer_id = %request.viewer_id))]
async fn mark_viewed(
    State(state): State<AppState>,
    Path(story_id): Path<Uuid>,
    Json(request): Json<MarkViewedRequest>,
) -> Result<Json<MarkViewedResponse>, ApiError> {
    let command = commands::MarkStoryViewed {
        correlation_id: Uuid::new_v4(),
        story_id,
        viewer_id: request.viewer_id,
    };

    info!(correlation_id = %command.correlation_id, "handling mark_story_viewed command");

    let newly_viewed =
        command_handlers::handle_mark_story_viewed(&command, &*state.story_repository).await?;

    Ok(Json(MarkViewedResponse { newly_viewed }))
}

/// `GET /`
#[instrument(skip(state))]
async fn list_active_stories(
    State(state): State<AppState>,
) -> Result<Json<Vec<StoryView>>, ApiError> {
    let stories = query_handlers::list_active_stories(
        &state.policy,
        state.clock.as_ref(),
        &*state.story_repository,
    )
    .await?;
    Ok(Json(stories.iter().map(StoryView::from).collect()))
}

/// `GET /{story_id}`
#[instrument(skip(state))]
async fn get_story(
    State(state): State<AppState>,
    Path(story_id): Path<Uuid>,
) -> Result<Json<StoryView>, ApiError> {
    let story = query_handlers::get_story_by_id(story_id, &*state.story_repository).await?;
    Ok(Json(StoryView::from(&story)))
}

/// `GET /rings/{viewer_id}`
#[instrument(skip(state))]
async fn story_rings(
    State(state): State<AppState>,
    Path(viewer_id): Path<Uuid>,
) -> Result<Json<Vec<StoryRing>>, ApiError> {
    let rings = query_handlers::story_rings(
        viewer_id,
        &state.policy,
        state.clock.as_ref(),
        &*state.story_repository,
    )
    .await?;
    Ok(Json(rings))
}

/// `GET /playback`
async fn playback_settings(State(state): State<AppState>) -> Json<PlaybackSettings> {
    Json(PlaybackSettings {
        image_duration_ms: state.playback.image_duration().as_millis(),
        tick_interval_ms: state.playback.tick_interval().as_millis(),
        max_recorded_video_ms: state.policy.max_recorded_video().as_millis(),
    })
}

/// Returns the router for the stories context.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_active_stories).post(publish_story))
        .route("/playback", get(playback_settings))
        .route("/rings/{viewer_id}", get(story_rings))
        .route("/{story_id}", get(get_story))
        .route("/{story_id}/views", post(mark_viewed))
}
