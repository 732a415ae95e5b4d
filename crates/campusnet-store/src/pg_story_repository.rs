//! `PostgreSQL` implementation of the `StoryRepository` trait.

use std::collections::BTreeSet;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use tracing::instrument;
use uuid::Uuid;

use campusnet_core::error::DomainError;
use campusnet_core::repository::StoryRepository;
use campusnet_core::story::{MediaKind, StoryItem};

const STORY_COLUMNS: &str =
    "id, owner_id, owner_name, owner_avatar_url, media_url, media_kind, created_at, viewed_by";

const STORY_EXISTS: &str = "SELECT EXISTS (SELECT 1 FROM stories WHERE id = $1)";

/// `PostgreSQL`-backed story repository.
#[derive(Debug, Clone)]
pub struct PgStoryRepository {
    pool: PgPool,
}

impl PgStoryRepository {
    /// Creates a new `PgStoryRepository`.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[allow(clippy::needless_pass_by_value)]
fn infrastructure(e: sqlx::Error) -> DomainError {
    DomainError::Infrastructure(e.to_string())
}

fn story_from_row(row: &PgRow) -> Result<StoryItem, DomainError> {
    let media_kind: String = row.try_get("media_kind").map_err(infrastructure)?;
    let viewed_by: Vec<Uuid> = row.try_get("viewed_by").map_err(infrastructure)?;
    Ok(StoryItem {
        id: row.try_get("id").map_err(infrastructure)?,
        owner_id: row.try_get("owner_id").map_err(infrastructure)?,
        owner_name: row.try_get("owner_name").map_err(infrastructure)?,
        owner_avatar_url: row.try_get("owner_avatar_url").map_err(infrastructure)?,
        media_url: row.try_get("media_url").map_err(infrastructure)?,
        media_kind: media_kind
            .parse::<MediaKind>()
            .map_err(|e| DomainError::Infrastructure(format!("corrupt story row: {e}")))?,
        created_at: row.try_get("created_at").map_err(infrastructure)?,
        viewed_by: viewed_by.into_iter().collect::<BTreeSet<_>>(),
    })
}

#[async_trait]
impl StoryRepository for PgStoryRepository {
    #[instrument(skip(self, story), fields(story_id = %story.id))]
    async fn insert_story(&self, story: &StoryItem) -> Result<(), DomainError> {
        let viewed_by: Vec<Uuid> = story.viewed_by.iter().copied().collect();
        sqlx::query(
            "INSERT INTO stories \
             (id, owner_id, owner_name, owner_avatar_url, media_url, media_kind, created_at, \
             viewed_by) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)",
        )
        .bind(story.id)
        .bind(story.owner_id)
        .bind(&story.owner_name)
        .bind(&story.owner_avatar_url)
        .bind(&story.media_url)
        .bind(story.media_kind.as_str())
        .bind(story.created_at)
        .bind(viewed_by)
        .execute(&self.pool)
        .await
        .map_err(infrastructure)?;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn find_story(&self, story_id: Uuid) -> Result<Option<StoryItem>, DomainError> {
        let sql = format!("SELECT {STORY_COLUMNS} FROM stories WHERE id = $1");
        let row = sqlx::query(&sql)
            .bind(story_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(infrastructure)?;
        row.as_ref().map(story_from_row).transpose()
    }

    #[instrument(skip(self))]
    async fn list_stories_since(
        &self,
        cutoff: DateTime<Utc>,
    ) -> Result<Vec<StoryItem>, DomainError> {
        let rows = sqlx::query(&format!(
            "SELECT {STORY_COLUMNS} FROM stories WHERE created_at >= $1 ORDER BY created_at DESC"
        ))
        .bind(cutoff)
        .fetch_all(&self.pool)
        .await
        .map_err(infrastructure)?;
        rows.iter().map(story_from_row).collect()
    }

    #[instrument(skip(self))]
    async fn mark_viewed(&self, story_id: Uuid, viewer_id: Uuid) -> Result<bool, DomainError> {
        let updated = sqlx::query(
            "UPDATE stories SET viewed_by = array_append(viewed_by, $2) \
             WHERE id = $1 AND NOT ($2 = ANY(viewed_by))",
        )
        .bind(story_id)
        .bind(viewer_id)
        .execute(&self.pool)
        .await
        .map_err(infrastructure)?;

        if updated.rows_affected() > 0 {
            return Ok(true);
        }

        let exists: bool = sqlx::query_scalar(STORY_EXISTS)
            .bind(story_id)
            .fetch_one(&self.pool)
            .await
            .map_err(infrastructure)?;
        if exists {
            Ok(false)
        } else {
            Err(DomainError::StoryNotFound(story_id))
        }
    }
}
