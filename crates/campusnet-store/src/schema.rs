//! Story store database schema.
//!
//! Mirrors the table created under `migrations/`. A unit test fails if
//! the two drift apart.

/// SQL to create the stories table.
pub const CREATE_STORIES_TABLE: &str = r"
CREATE TABLE IF NOT EXISTS stories (
    id                UUID PRIMARY KEY,
    owner_id          UUID NOT NULL,
    owner_name        TEXT NOT NULL,
    owner_avatar_url  TEXT NOT NULL,
    media_url         TEXT NOT NULL,
    media_kind        VARCHAR(16) NOT NULL CHECK (media_kind IN ('image', 'video')),
    created_at        TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    viewed_by         UUID[] NOT NULL DEFAULT '{}'
);

CREATE INDEX IF NOT EXISTS idx_stories_created_at
    ON stories (created_at DESC);

CREATE INDEX IF NOT EXISTS idx_stories_owner_id
    ON stories (owner_id);
";
