//! Story records as held by the document store.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DomainError;

/// Avatar shown when the owner has no profile picture.
pub const DEFAULT_AVATAR_URL: &str = "/default-avatar.png";

/// Display name used when the owner has no display name.
pub const DEFAULT_OWNER_NAME: &str = "Usuário";

/// The kind of media a story carries. Determines how playback measures
/// progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    /// A still image, shown for a fixed duration.
    Image,
    /// A video, shown for as long as it plays.
    Video,
}

impl MediaKind {
    /// Returns the stored name of this media kind.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Image => "image",
            Self::Video => "video",
        }
    }
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MediaKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "image" => Ok(Self::Image),
            "video" => Ok(Self::Video),
            other => Err(DomainError::Validation(format!(
                "unknown media kind: {other}"
            ))),
        }
    }
}

/// An ephemeral media post.
///
/// Everything except `viewed_by` is fixed at creation. `viewed_by` only
/// ever grows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoryItem {
    /// Story identifier.
    pub id: Uuid,
    /// The user who published the story.
    pub owner_id: Uuid,
    /// Owner display name at publication time.
    pub owner_name: String,
    /// Owner avatar at publication time.
    pub owner_avatar_url: String,
    /// Where the media can be fetched from the object store.
    pub media_url: String,
    /// Image or video.
    pub media_kind: MediaKind,
    /// Publication time.
    pub created_at: DateTime<Utc>,
    /// Users who have seen this story.
    pub viewed_by: BTreeSet<Uuid>,
}

impl StoryItem {
    /// Returns `true` if `viewer_id` has already seen this story.
    #[must_use]
    pub fn has_been_viewed_by(&self, viewer_id: Uuid) -> bool {
        self.viewed_by.contains(&viewer_id)
    }
}
