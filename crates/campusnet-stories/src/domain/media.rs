//! Upload policy: which media may become a story, and for how long it
//! stays visible.

use std::time::Duration;

use campusnet_core::error::DomainError;
use campusnet_core::story::MediaKind;
use chrono::TimeDelta;
use serde::{Deserialize, Serialize};

/// Accepted still-image MIME types.
pub const IMAGE_CONTENT_TYPES: [&str; 3] = ["image/jpeg", "image/png", "image/webp"];

/// Accepted video MIME types.
pub const VIDEO_CONTENT_TYPES: [&str; 3] = ["video/mp4", "video/webm", "video/quicktime"];

/// Portrait full-HD, the only frame size accepted for uploaded videos.
pub const REQUIRED_VIDEO_DIMENSIONS: Dimensions = Dimensions {
    width: 1080,
    height: 1920,
};

/// How long a story stays in the active set, in hours.
pub const DEFAULT_RETENTION_HOURS: i64 = 24;

/// Longest clip the in-app recorder may publish.
pub const DEFAULT_MAX_RECORDED_VIDEO: Duration = Duration::from_secs(15);

/// Pixel dimensions of a media file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dimensions {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

/// Rules applied when publishing and listing stories.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoryPolicy {
    retention: TimeDelta,
    max_recorded_video: Duration,
}

impl Default for StoryPolicy {
    fn default() -> Self {
        Self {
            retention: TimeDelta::hours(DEFAULT_RETENTION_HOURS),
            max_recorded_video: DEFAULT_MAX_RECORDED_VIDEO,
        }
    }
}

impl StoryPolicy {
    /// Creates a policy with explicit limits.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if either limit is zero or negative.
    pub fn new(retention: TimeDelta, max_recorded_video: Duration) -> Result<Self, DomainError> {
        if retention <= TimeDelta::zero() {
            return Err(DomainError::Validation(
                "story retention must be positive".to_owned(),
            ));
        }
        if max_recorded_video.is_zero() {
            return Err(DomainError::Validation(
                "maximum recording length must be positive".to_owned(),
            ));
        }
        Ok(Self {
            retention,
            max_recorded_video,
        })
    }

    /// How long a story stays in the active set.
    #[must_use]
    pub fn retention(&self) -> TimeDelta {
        self.retention
    }

    /// Longest clip the in-app recorder may publish.
    #[must_use]
    pub fn max_recorded_video(&self) -> Duration {
        self.max_recorded_video
    }

    /// Decides whether an upload may become a story and, if so, which kind.
    ///
    /// `recorded_duration` is present only for clips captured by the in-app
    /// recorder; those skip the frame-size check but are length-limited.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` for unsupported MIME types, uploaded
    /// videos that are not 1080x1920, recordings that are not videos, and
    /// recordings longer than the limit.
    pub fn classify_upload(
        &self,
        content_type: &str,
        dimensions: Option<Dimensions>,
        recorded_duration: Option<Duration>,
    ) -> Result<MediaKind, DomainError> {
        let essence = content_type
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();

        let kind = if IMAGE_CONTENT_TYPES.contains(&essence.as_str()) {
            MediaKind::Image
        } else if VIDEO_CONTENT_TYPES.contains(&essence.as_str()) {
            MediaKind::Video
        } else {
            return Err(DomainError::Validation(format!(
                "unsupported media type: {content_type}"
            )));
        };

        match (kind, recorded_duration) {
            (MediaKind::Image, Some(_)) => Err(DomainError::Validation(
                "recordings must be videos".to_owned(),
            )),
            (MediaKind::Video, Some(length)) if length > self.max_recorded_video => {
                Err(DomainError::Validation(format!(
                    "recording is {}s long; the limit is {}s",
                    length.as_secs(),
                    self.max_recorded_video.as_secs()
                )))
            }
            (MediaKind::Video, None) if dimensions != Some(REQUIRED_VIDEO_DIMENSIONS) => {
                Err(DomainError::Validation(format!(
                    "videos must be {}x{}",
                    REQUIRED_VIDEO_DIMENSIONS.width, REQUIRED_VIDEO_DIMENSIONS.height
                )))
            }
            _ => Ok(kind),
        }
    }
}
