//! Application services for the stories context.

pub mod command_handlers;
pub mod playback;
pub mod query_handlers;
