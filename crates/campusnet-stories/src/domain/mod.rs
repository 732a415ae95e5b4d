//! Story domain: commands, upload policy and the playback state machine.

pub mod commands;
pub mod media;
pub mod playback;
