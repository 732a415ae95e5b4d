//! Story document-store abstraction.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::error::DomainError;
use crate::story::StoryItem;

/// Repository trait over the `stories` collection.
#[async_trait]
pub trait StoryRepository: Send + Sync {
    /// Persist a newly published story.
    async fn insert_story(&self, story: &StoryItem) -> Result<(), DomainError>;

    /// Load a single story, or `None` if it does not exist.
    async fn find_story(&self, story_id: Uuid) -> Result<Option<StoryItem>, DomainError>;

    /// Load every story created at or after `cutoff`, newest first.
    async fn list_stories_since(
        &self,
        cutoff: DateTime<Utc>,
    ) -> Result<Vec<StoryItem>, DomainError>;

    /// Add `viewer_id` to the story's viewed-by set.
    ///
    /// Idempotent: returns `Ok(true)` when the viewer was newly added and
    /// `Ok(false)` when they were already present. Returns
    /// `DomainError::StoryNotFound` if the story does not exist.
    async fn mark_viewed(&self, story_id: Uuid, viewer_id: Uuid) -> Result<bool, DomainError>;
}
