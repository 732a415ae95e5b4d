//! `PostgreSQL`-backed story store for `CampusNet`.

pub mod pg_story_repository;
pub mod schema;
