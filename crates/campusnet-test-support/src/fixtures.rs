//! Story fixtures.

use std::collections::BTreeSet;

use campusnet_core::story::{DEFAULT_AVATAR_URL, MediaKind, StoryItem};
use chrono::{DateTime, Utc};
use uuid::Uuid;

fn story(kind: MediaKind, owner_id: Uuid, created_at: DateTime<Utc>) -> StoryItem {
    let id = Uuid::new_v4();
    let extension = match kind {
        MediaKind::Image => "jpg",
        MediaKind::Video => "mp4",
    };
    StoryItem {
        id,
        owner_id,
        owner_name: "Ana".to_owned(),
        owner_avatar_url: DEFAULT_AVATAR_URL.to_owned(),
        media_url: format!("https://cdn.example/stories/{id}.{extension}"),
        media_kind: kind,
        created_at,
        viewed_by: BTreeSet::new(),
    }
}

/// An image story owned by `owner_id`, nobody has viewed it yet.
#[must_use]
pub fn image_story(owner_id: Uuid, created_at: DateTime<Utc>) -> StoryItem {
    story(MediaKind::Image, owner_id, created_at)
}

/// A video story owned by `owner_id`, nobody has viewed it yet.
#[must_use]
pub fn video_story(owner_id: Uuid, created_at: DateTime<Utc>) -> StoryItem {
    story(MediaKind::Video, owner_id, created_at)
}
