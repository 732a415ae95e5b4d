//! Shared test doubles and fixtures for `CampusNet` stories.

mod clock;
mod fixtures;
mod repository;

pub use clock::{FixedClock, fixed_now};
pub use fixtures::{image_story, video_story};
pub use repository::{FailingStoryRepository, InMemoryStoryRepository};
