//! Test repositories: mock `StoryRepository` implementations for tests.

use std::cmp::Reverse;
use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use campusnet_core::error::DomainError;
use campusnet_core::repository::StoryRepository;
use campusnet_core::story::StoryItem;
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// An in-memory story collection that also records every `mark_viewed`
/// call it receives, including the ones that turned out to be no-ops.
#[derive(Debug, Default)]
pub struct InMemoryStoryRepository {
    stories: Mutex<HashMap<Uuid, StoryItem>>,
    view_calls: Mutex<Vec<(Uuid, Uuid)>>,
}

impl InMemoryStoryRepository {
    /// Create an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a repository pre-populated with `stories`.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn with_stories(stories: impl IntoIterator<Item = StoryItem>) -> Self {
        let repo = Self::new();
        {
            let mut map = repo.stories.lock().unwrap();
            for story in stories {
                map.insert(story.id, story);
            }
        }
        repo
    }

    /// Returns a snapshot of a stored story.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn story(&self, story_id: Uuid) -> Option<StoryItem> {
        self.stories.lock().unwrap().get(&story_id).cloned()
    }

    /// Returns every `(story_id, viewer_id)` pair passed to `mark_viewed`, in
    /// call order.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn view_calls(&self) -> Vec<(Uuid, Uuid)> {
        self.view_calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl StoryRepository for InMemoryStoryRepository {
    async fn insert_story(&self, story: &StoryItem) -> Result<(), DomainError> {
        let mut stories = self.stories.lock().unwrap();
        stories.insert(story.id, story.clone());
        Ok(())
    }

    async fn find_story(&self, story_id: Uuid) -> Result<Option<StoryItem>, DomainError> {
        Ok(self.story(story_id))
    }

    async fn list_stories_since(
        &self,
        cutoff: DateTime<Utc>,
    ) -> Result<Vec<StoryItem>, DomainError> {
        let mut stories: Vec<StoryItem> = self
            .stories
            .lock()
            .unwrap()
            .values()
            .filter(|s| s.created_at >= cutoff)
            .cloned()
            .collect();
        stories.sort_by_key(|s| Reverse(s.created_at));
        Ok(stories)
    }

    async fn mark_viewed(&self, story_id: Uuid, viewer_id: Uuid) -> Result<bool, DomainError> {
        self.view_calls.lock().unwrap().push((story_id, viewer_id));
        let mut stories = self.stories.lock().unwrap();
        let story = stories
            .get_mut(&story_id)
            .ok_or(DomainError::StoryNotFound(story_id))?;
        Ok(story.viewed_by.insert(viewer_id))
    }
}

/// A story repository that always returns an infrastructure error. Useful
/// for testing error-handling paths.
#[derive(Debug)]
pub struct FailingStoryRepository;

#[async_trait]
impl StoryRepository for FailingStoryRepository {
    async fn insert_story(&self, _story: &StoryItem) -> Result<(), DomainError> {
        Err(DomainError::Infrastructure("connection refused".into()))
    }

    async fn find_story(&self, _story_id: Uuid) -> Result<Option<StoryItem>, DomainError> {
        Err(DomainError::Infrastructure("connection refused".into()))
    }

    async fn list_stories_since(
        &self,
        _cutoff: DateTime<Utc>,
    ) -> Result<Vec<StoryItem>, DomainError> {
        Err(DomainError::Infrastructure("connection refused".into()))
    }

    async fn mark_viewed(&self, _story_id: Uuid, _viewer_id: Uuid) -> Result<bool, DomainError> {
        Err(DomainError::Infrastructure("connection refused".into()))
    }
}
