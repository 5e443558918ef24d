//! Read-only queries against the posts table, and the [`PostStore`] adapter.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use postdigest_core::{Post, PostStore, StoreError};
use sqlx::PgPool;

use crate::DbError;

/// A row from the posts table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct PostRow {
    pub id: String,
    pub text: String,
    pub author: String,
    pub created_at: DateTime<Utc>,
}

impl From<PostRow> for Post {
    fn from(row: PostRow) -> Self {
        Post {
            id: row.id,
            text: row.text,
            created_at: row.created_at,
            author: row.author,
        }
    }
}

/// List posts with `start <= created_at < end`, newest first.
///
/// `table` must already be a validated identifier; it is interpolated into
/// the statement. `id` is cast to text so numeric tweet ids decode too.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn list_posts_between(
    pool: &PgPool,
    table: &str,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> Result<Vec<PostRow>, DbError> {
    let sql = format!(
        "SELECT id::text AS id, text, author, created_at \
         FROM {table} \
         WHERE created_at >= $1 AND created_at < $2 \
         ORDER BY created_at DESC"
    );

    let rows = sqlx::query_as::<_, PostRow>(&sql)
        .bind(start)
        .bind(end)
        .fetch_all(pool)
        .await?;

    Ok(rows)
}

/// [`PostStore`] backed by a Postgres pool.
#[derive(Debug, Clone)]
pub struct PgPostStore {
    pool: PgPool,
    table: String,
}

impl PgPostStore {
    #[must_use]
    pub fn new(pool: PgPool, table: impl Into<String>) -> Self {
        Self {
            pool,
            table: table.into(),
        }
    }
}

#[async_trait]
impl PostStore for PgPostStore {
    async fn fetch(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<Post>, StoreError> {
        let rows = list_posts_between(&self.pool, &self.table, start, end)
            .await
            .map_err(into_store_error)?;

        tracing::debug!(
            table = %self.table,
            start = %start,
            end = %end,
            count = rows.len(),
            "fetched posts"
        );

        Ok(rows.into_iter().map(Post::from).collect())
    }
}

pub(crate) fn into_store_error(err: DbError) -> StoreError {
    let DbError::Sqlx(e) = err;
    match e {
        sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
            StoreError::Unavailable(e.to_string())
        }
        other => StoreError::Query(other.to_string()),
    }
}
