//! Shared application state.

use std::sync::Arc;

use campusnet_core::clock::Clock;
use campusnet_core::repository::StoryRepository;
use campusnet_stories::domain::media::StoryPolicy;
use campusnet_stories::domain::playback::PlaybackConfig;

/// Application state shared across all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// Wall clock for timestamps and retention cut-offs.
    pub clock: Arc<dyn Clock>,
    /// The stories collection.
    pub story_repository: Arc<dyn StoryRepository>,
    /// Upload and retention rules.
    pub policy: StoryPolicy,
    /// Timing rules handed to viewers.
    pub playback: PlaybackConfig,
}

impl AppState {
    /// Create new application state.
    #[must_use]
    pub fn new(
        clock: Arc<dyn Clock>,
        story_repository: Arc<dyn StoryRepository>,
        policy: StoryPolicy,
        playback: PlaybackConfig,
    ) -> Self {
        Self {
            clock,
            story_repository,
            policy,
            playback,
        }
    }
}
