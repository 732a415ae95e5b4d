//! `CampusNet` stories: catalogue and playback.
//!
//! Responsible for publishing ephemeral stories, listing the active set,
//! recording who has seen what, and sequencing full-screen playback.

pub mod application;
pub mod domain;
