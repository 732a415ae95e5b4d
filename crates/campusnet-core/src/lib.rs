//! `CampusNet` Core: shared story types and collaborator traits.
//!
//! This crate defines the story record, the document-store contract the
//! rest of the workspace talks to, and the time and error primitives they
//! share. It contains no infrastructure code.

pub mod clock;
pub mod command;
pub mod error;
pub mod repository;
pub mod story;
