//! Commands for the stories context.

use std::time::Duration;

use campusnet_core::command::Command;
use uuid::Uuid;

use super::media::Dimensions;

/// Command to publish a story whose media is already in the object store.
#[derive(Debug, Clone)]
pub struct PublishStory {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The publishing user.
    pub owner_id: Uuid,
    /// Owner display name, if the profile has one.
    pub owner_name: Option<String>,
    /// Owner avatar, if the profile has one.
    pub owner_avatar_url: Option<String>,
    /// Download URL returned by the object store.
    pub media_url: String,
    /// MIME type of the uploaded file.
    pub content_type: String,
    /// Pixel dimensions, when the client could read them.
    pub dimensions: Option<Dimensions>,
    /// Set when the video was captured with the in-app recorder.
    pub recorded_duration: Option<Duration>,
}

impl Command for PublishStory {
    fn command_type(&self) -> &'static str {
        "stories.publish_story"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }

    fn actor_id(&self) -> Uuid {
        self.owner_id
    }
}

/// Command to record that a viewer has seen a story.
#[derive(Debug, Clone)]
pub struct MarkStoryViewed {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The story that was shown.
    pub story_id: Uuid,
    /// The user it was shown to.
    pub viewer_id: Uuid,
}

impl Command for MarkStoryViewed {
    fn command_type(&self) -> &'static str {
        "stories.mark_story_viewed"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }

    fn actor_id(&self) -> Uuid {
        self.viewer_id
    }
}
