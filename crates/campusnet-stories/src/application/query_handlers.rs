//! Query handlers for the stories context.
//!
//! This module contains read-side queries over the story repository and the
//! view DTOs they are rendered through.

use campusnet_core::clock::Clock;
use campusnet_core::error::DomainError;
use campusnet_core::repository::StoryRepository;
use campusnet_core::story::{MediaKind, StoryItem};
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::domain::media::StoryPolicy;

/// Read-only view of a story.
#[derive(Debug, Serialize)]
pub struct StoryView {
    /// Story identifier.
    pub story_id: Uuid,
    /// Publishing user.
    pub owner_id: Uuid,
    /// Owner display name.
    pub owner_name: String,
    /// Owner avatar.
    pub owner_avatar_url: String,
    /// Media download URL.
    pub media_url: String,
    /// Image or video.
    pub media_kind: MediaKind,
    /// Publication time.
    pub created_at: DateTime<Utc>,
    /// Users who have seen the story.
    pub viewed_by: Vec<Uuid>,
}

impl From<&StoryItem> for StoryView {
    fn from(story: &StoryItem) -> Self {
        Self {
            story_id: story.id,
            owner_id: story.owner_id,
            owner_name: story.owner_name.clone(),
            owner_avatar_url: story.owner_avatar_url.clone(),
            media_url: story.media_url.clone(),
            media_kind: story.media_kind,
            created_at: story.created_at,
            viewed_by: story.viewed_by.iter().copied().collect(),
        }
    }
}

/// One avatar in the stories strip, with the seen/unseen ring state for a
/// particular viewer.
#[derive(Debug, PartialEq, Eq, Serialize)]
pub struct StoryRing {
    /// Story identifier.
    pub story_id: Uuid,
    /// Publishing user.
    pub owner_id: Uuid,
    /// Owner display name.
    pub owner_name: String,
    /// Owner avatar.
    pub owner_avatar_url: String,
    /// Whether the viewer has already seen this story.
    pub seen: bool,
}

/// Retrieves every story still inside the retention window, newest first.
///
/// # Errors
///
/// Returns the repository error if the query fails.
pub async fn list_active_stories(
    policy: &StoryPolicy,
    clock: &dyn Clock,
    repo: &dyn StoryRepository,
) -> Result<Vec<StoryItem>, DomainError> {
    let cutoff = clock.cutoff(policy.retention());
    repo.list_stories_since(cutoff).await
}

/// Retrieves a story by its ID.
///
/// # Errors
///
/// Returns `DomainError::StoryNotFound` if no story exists for the ID.
pub async fn get_story_by_id(
    story_id: Uuid,
    repo: &dyn StoryRepository,
) -> Result<StoryItem, DomainError> {
    repo.find_story(story_id)
        .await?
        .ok_or(DomainError::StoryNotFound(story_id))
}

/// Retrieves the stories strip for `viewer_id`: the active stories, newest
/// first, each flagged with whether this viewer has seen it.
///
/// # Errors
///
/// Returns the repository error if the query fails.
pub async fn story_rings(
    viewer_id: Uuid,
    policy: &StoryPolicy,
    clock: &dyn Clock,
    repo: &dyn StoryRepository,
) -> Result<Vec<StoryRing>, DomainError> {
    let stories = list_active_stories(policy, clock, repo).await?;
    let rings: Vec<StoryRing> = stories
        .into_iter()
        .map(|story| StoryRing {
            seen: story.has_been_viewed_by(viewer_id),
            story_id: story.id,
            owner_id: story.owner_id,
            owner_name: story.owner_name,
            owner_avatar_url: story.owner_avatar_url,
        })
        .collect();
    Ok(rings)
}

#[cfg(test)]
mod tests {
    use campusnet_core::error::DomainError;
    use campusnet_test_support::{
        FixedClock, InMemoryStoryRepository, fixed_now, image_story, video_story,
    };
    use chrono::TimeDelta;
    use uuid::Uuid;

    use crate::application::query_handlers::{get_story_by_id, list_active_stories, story_rings};
    use crate::domain::media::StoryPolicy;

    #[tokio::test]
    async fn test_list_active_stories_excludes_expired_and_orders_newest_first() {
        // Arrange
        let owner = Uuid::new_v4();
        let older = image_story(owner, fixed_now() - TimeDelta::hours(3));
        let newer = video_story(owner, fixed_now() - TimeDelta::minutes(5));
        let expired = image_story(owner, fixed_now() - TimeDelta::hours(25));
        let expected = vec![newer.id, older.id];
        let repo = InMemoryStoryRepository::with_stories([older, expired, newer]);

        // Act
        let stories = list_active_stories(&StoryPolicy::default(), &FixedClock::default(), &repo)
            .await
            .unwrap();

        // Assert
        let ids: Vec<Uuid> = stories.iter().map(|s| s.id).collect();
        assert_eq!(ids, expected);
    }

    #[tokio::test]
    async fn test_list_active_stories_keeps_story_created_exactly_at_cutoff() {
        // Arrange
        let policy = StoryPolicy::default();
        let clock = FixedClock::default();
        let owner = Uuid::new_v4();
        let cutoff = fixed_now() - policy.retention();
        let on_boundary = image_story(owner, cutoff);
        let just_expired = image_story(owner, cutoff - TimeDelta::seconds(1));
        let expected = vec![on_boundary.id];
        let repo = InMemoryStoryRepository::with_stories([on_boundary, just_expired]);

        // Act
        let result = list_active_stories(&policy, &clock, &repo).await;

        // Assert
        let ids: Vec<Uuid> = result.unwrap().iter().map(|s| s.id).collect();
        assert_eq!(ids, expected);
    }

    #[tokio::test]
    async fn test_get_story_by_id_returns_story() {
        // Arrange
        let story = image_story(Uuid::new_v4(), fixed_now());
        let story_id = story.id;
        let repo = InMemoryStoryRepository::with_stories([story]);

        // Act
        let found = get_story_by_id(story_id, &repo).await.unwrap();

        // Assert
        assert_eq!(found.id, story_id);
    }

    #[tokio::test]
    async fn test_get_story_by_id_returns_not_found_when_missing() {
        // Arrange
        let story_id = Uuid::new_v4();
        let repo = InMemoryStoryRepository::new();

        // Act
        let result = get_story_by_id(story_id, &repo).await;

        // Assert
        match result {
            Err(DomainError::StoryNotFound(id)) => assert_eq!(id, story_id),
            other => panic!("expected StoryNotFound, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_story_rings_flags_seen_stories_for_viewer() {
        // Arrange
        let viewer = Uuid::new_v4();
        let owner = Uuid::new_v4();
        let mut seen = image_story(owner, fixed_now() - TimeDelta::hours(1));
        seen.viewed_by.insert(viewer);
        let unseen = image_story(owner, fixed_now() - TimeDelta::minutes(1));
        let (seen_id, unseen_id) = (seen.id, unseen.id);
        let repo = InMemoryStoryRepository::with_stories([seen, unseen]);

        // Act
        let rings = story_rings(
            viewer,
            &StoryPolicy::default(),
            &FixedClock::default(),
            &repo,
        )
        .await
        .unwrap();

        // Assert
        let flags: Vec<(Uuid, bool)> = rings.iter().map(|r| (r.story_id, r.seen)).collect();
        assert_eq!(flags, vec![(unseen_id, false), (seen_id, true)]);
    }
}
