//! Command handlers for the stories context.
//!
//! Each handler validates its command, talks to the story repository, and
//! returns the outcome. None of them retry; retries belong to the caller.

use std::collections::BTreeSet;

use campusnet_core::clock::Clock;
use campusnet_core::command::Command;
use campusnet_core::error::DomainError;
use campusnet_core::repository::StoryRepository;
use campusnet_core::story::{DEFAULT_AVATAR_URL, DEFAULT_OWNER_NAME, StoryItem};
use tracing::debug;
use uuid::Uuid;

use crate::domain::commands::{MarkStoryViewed, PublishStory};
use crate::domain::media::StoryPolicy;

fn or_default(value: Option<&str>, default: &str) -> String {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => v.to_owned(),
        _ => default.to_owned(),
    }
}

/// Handles the `PublishStory` command: validates the upload against the
/// policy, builds the story record, and persists it.
///
/// # Errors
///
/// Returns `DomainError::Validation` if the media URL is blank or the upload
/// breaks the policy, or the repository error if persisting fails.
pub async fn handle_publish_story(
    command: &PublishStory,
    policy: &StoryPolicy,
    clock: &dyn Clock,
    repo: &dyn StoryRepository,
) -> Result<StoryItem, DomainError> {
    let media_url = command.media_url.trim();
    if media_url.is_empty() {
        return Err(DomainError::Validation(
            "media_url must not be empty".to_owned(),
        ));
    }
    let media_kind = policy.classify_upload(
        &command.content_type,
        command.dimensions,
        command.recorded_duration,
    )?;

    let story = StoryItem {
        id: Uuid::new_v4(),
        owner_id: command.owner_id,
        owner_name: or_default(command.owner_name.as_deref(), DEFAULT_OWNER_NAME),
        owner_avatar_url: or_default(command.owner_avatar_url.as_deref(), DEFAULT_AVATAR_URL),
        media_url: media_url.to_owned(),
        media_kind,
        created_at: clock.now(),
        viewed_by: BTreeSet::new(),
    };

    repo.insert_story(&story).await?;

    debug!(
        command_type = command.command_type(),
        correlation_id = %command.correlation_id(),
        story_id = %story.id,
        media_kind = %story.media_kind,
        "story published"
    );

    Ok(story)
}

/// Handles the `MarkStoryViewed` command. Idempotent: returns `true` only
/// when the viewer was newly recorded.
///
/// # Errors
///
/// Returns `DomainError::StoryNotFound` if the story does not exist, or the
/// repository error if the write fails.
pub async fn handle_mark_story_viewed(
    command: &MarkStoryViewed,
    repo: &dyn StoryRepository,
) -> Result<bool, DomainError> {
    let newly_viewed = repo.mark_viewed(command.story_id, command.actor_id()).await?;

    debug!(
        command_type = command.command_type(),
        correlation_id = %command.correlation_id(),
        story_id = %command.story_id,
        newly_viewed,
        "story view recorded"
    );

    Ok(newly_viewed)
}
