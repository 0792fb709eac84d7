//! SQLite seed store implementation.
//!
//! Implements `SeedStore` from `seedling-core` using sqlx with split read/write
//! pools. A snapshot is written inside one transaction on the writer pool:
//! users first, then posts, then the batch record. Entries are upserted by
//! identifier, so re-applying a seed overwrites rather than duplicates.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use seedling_core::repository::seed::SeedStore;
use seedling_types::batch::{BatchId, SeedBatch};
use seedling_types::category::CategoryKind;
use seedling_types::error::RepositoryError;
use seedling_types::record::{Post, User};
use seedling_types::seed::{SeedCounts, SeedSnapshot};
use sqlx::Row;

use super::pool::DatabasePool;

/// SQLite-backed implementation of `SeedStore`.
pub struct SqliteSeedStore {
    pool: DatabasePool,
}

impl SqliteSeedStore {
    /// Create a new store backed by the given database pool.
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

// ---------------------------------------------------------------------------
// Private Row types for SQLite-to-domain mapping
// ---------------------------------------------------------------------------

fn user_from_row(row: &sqlx::sqlite::SqliteRow) -> Result<User, RepositoryError> {
    Ok(User {
        id: row
            .try_get("id")
            .map_err(|e| RepositoryError::Query(e.to_string()))?,
        name: row
            .try_get("name")
            .map_err(|e| RepositoryError::Query(e.to_string()))?,
    })
}

fn post_from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Post, RepositoryError> {
    Ok(Post {
        id: row
            .try_get("id")
            .map_err(|e| RepositoryError::Query(e.to_string()))?,
        title: row
            .try_get("title")
            .map_err(|e| RepositoryError::Query(e.to_string()))?,
        author_id: row
            .try_get("author_id")
            .map_err(|e| RepositoryError::Query(e.to_string()))?,
    })
}

struct BatchRow {
    id: String,
    user_count: i64,
    post_count: i64,
    committed_at: String,
}

impl BatchRow {
    fn from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            user_count: row.try_get("user_count")?,
            post_count: row.try_get("post_count")?,
            committed_at: row.try_get("committed_at")?,
        })
    }

    fn into_batch(self) -> Result<SeedBatch, RepositoryError> {
        let id = self
            .id
            .parse::<BatchId>()
            .map_err(|e| RepositoryError::Query(format!("invalid batch id: {e}")))?;

        Ok(SeedBatch {
            id,
            counts: SeedCounts {
                users: count_from_db(self.user_count)?,
                posts: count_from_db(self.post_count)?,
            },
            committed_at: parse_datetime(&self.committed_at)?,
        })
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn parse_datetime(s: &str) -> Result<DateTime<Utc>, RepositoryError> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| RepositoryError::Query(format!("invalid datetime: {e}")))
}

fn format_datetime(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339()
}

fn count_from_db(n: i64) -> Result<usize, RepositoryError> {
    usize::try_from(n).map_err(|e| RepositoryError::Query(format!("invalid count {n}: {e}")))
}

fn write_error(category: CategoryKind, id: &str, err: sqlx::Error) -> RepositoryError {
    RepositoryError::Write {
        category,
        id: id.to_string(),
        message: err.to_string(),
    }
}

// ---------------------------------------------------------------------------
// SeedStore implementation
// ---------------------------------------------------------------------------

impl SeedStore for SqliteSeedStore {
    async fn persist(&self, snapshot: &SeedSnapshot) -> Result<SeedBatch, RepositoryError> {
        let batch = SeedBatch {
            id: BatchId::new(),
            counts: snapshot.counts(),
            committed_at: Utc::now(),
        };
        let batch_id = batch.id.to_string();
        let now = format_datetime(&batch.committed_at);

        let mut tx = self
            .pool
            .writer
            .begin()
            .await
            .map_err(|e| RepositoryError::Connection(e.to_string()))?;

        for user in snapshot.users().values() {
            sqlx::query(
                r#"INSERT INTO users (id, name, batch_id, updated_at)
                   VALUES (?, ?, ?, ?)
                   ON CONFLICT (id) DO UPDATE SET
                       name = excluded.name,
                       batch_id = excluded.batch_id,
                       updated_at = excluded.updated_at"#,
            )
            .bind(&user.id)
            .bind(&user.name)
            .bind(&batch_id)
            .bind(&now)
            .execute(&mut *tx)
            .await
            .map_err(|e| write_error(CategoryKind::Users, &user.id, e))?;
        }

        for post in snapshot.posts().values() {
            sqlx::query(
                r#"INSERT INTO posts (id, title, author_id, batch_id, updated_at)
                   VALUES (?, ?, ?, ?, ?)
                   ON CONFLICT (id) DO UPDATE SET
                       title = excluded.title,
                       author_id = excluded.author_id,
                       batch_id = excluded.batch_id,
                       updated_at = excluded.updated_at"#,
            )
            .bind(&post.id)
            .bind(&post.title)
            .bind(&post.author_id)
            .bind(&batch_id)
            .bind(&now)
            .execute(&mut *tx)
            .await
            .map_err(|e| write_error(CategoryKind::Posts, &post.id, e))?;
        }

        sqlx::query(
            "INSERT INTO seed_batches (id, user_count, post_count, committed_at) VALUES (?, ?, ?, ?)",
        )
        .bind(&batch_id)
        .bind(batch.counts.users as i64)
        .bind(batch.counts.posts as i64)
        .bind(&now)
        .execute(&mut *tx)
        .await
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

        tx.commit()
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        tracing::debug!(
            batch = %batch.id,
            users = batch.counts.users,
            posts = batch.counts.posts,
            "seed snapshot written"
        );

        Ok(batch)
    }

    async fn load(&self) -> Result<SeedSnapshot, RepositoryError> {
        let user_rows = sqlx::query("SELECT id, name FROM users ORDER BY id")
            .fetch_all(&self.pool.reader)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        let post_rows = sqlx::query("SELECT id, title, author_id FROM posts ORDER BY id")
            .fetch_all(&self.pool.reader)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        let mut users = BTreeMap::new();
        for row in &user_rows {
            let user = user_from_row(row)?;
            users.insert(user.id.clone(), user);
        }

        let mut posts = BTreeMap::new();
        for row in &post_rows {
            let post = post_from_row(row)?;
            posts.insert(post.id.clone(), post);
        }

        Ok(SeedSnapshot::new(users, posts))
    }

    async fn get_user(&self, id: &str) -> Result<Option<User>, RepositoryError> {
        let row = sqlx::query("SELECT id, name FROM users WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool.reader)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        row.as_ref().map(user_from_row).transpose()
    }

    async fn get_post(&self, id: &str) -> Result<Option<Post>, RepositoryError> {
        let row = sqlx::query("SELECT id, title, author_id FROM posts WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool.reader)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        row.as_ref().map(post_from_row).transpose()
    }

    async fn list_batches(&self) -> Result<Vec<SeedBatch>, RepositoryError> {
        let rows = sqlx::query("SELECT * FROM seed_batches ORDER BY committed_at DESC, id DESC")
            .fetch_all(&self.pool.reader)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        rows.iter()
            .map(|row| {
                BatchRow::from_row(row)
                    .map_err(|e| RepositoryError::Query(e.to_string()))?
                    .into_batch()
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sqlite::pool::DatabasePool;
    use seedling_core::seed::SeedBuilder;
    use seedling_types::record::{NewPost, NewUser};

    async fn test_pool() -> DatabasePool {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("test.db");
        std::mem::forget(dir);
        DatabasePool::open(&db_path).await.unwrap()
    }

    fn scenario() -> SeedSnapshot {
        let mut builder = SeedBuilder::new();
        builder
            .add_user("matt", NewUser::new("Matt"))
            .add_post("post1", NewPost::new("Post 2", "matt"))
            .add_post("post2", NewPost::new("Post", "matt"));
        builder.commit()
    }

    #[tokio::test]
    async fn test_persist_load_roundtrip() {
        let store = SqliteSeedStore::new(test_pool().await);
        let snapshot = scenario();

        let batch = store.persist(&snapshot).await.unwrap();
        assert_eq!(batch.counts, SeedCounts { users: 1, posts: 2 });

        let loaded = store.load().await.unwrap();
        assert_eq!(loaded, snapshot);
    }

    #[tokio::test]
    async fn test_persist_on_closed_pool_reports_cause() {
        let pool = test_pool().await;
        pool.writer.close().await;
        let store = SqliteSeedStore::new(pool);

        let err = store.persist(&scenario()).await.unwrap_err();
        match err {
            RepositoryError::Connection(message) => assert!(message.contains("closed")),
            other => panic!("expected connection error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_load_empty_database() {
        let store = SqliteSeedStore::new(test_pool().await);
        let loaded = store.load().await.unwrap();
        assert!(loaded.is_empty());
    }

    #[tokio::test]
    async fn test_get_nonexistent_returns_none() {
        let store = SqliteSeedStore::new(test_pool().await);
        store.persist(&scenario()).await.unwrap();

        assert!(store.get_user("kate").await.unwrap().is_none());
        assert!(store.get_post("post9").await.unwrap().is_none());
        assert_eq!(store.get_user("matt").await.unwrap().unwrap().name, "Matt");
        assert_eq!(
            store.get_post("post1").await.unwrap().unwrap().author_id,
            "matt"
        );
    }

    #[tokio::test]
    async fn test_persist_upserts_existing_ids() {
        let store = SqliteSeedStore::new(test_pool().await);
        store.persist(&scenario()).await.unwrap();

        let mut builder = SeedBuilder::new();
        builder.add_user("matt", NewUser::new("Matthew"));
        store.persist(&builder.commit()).await.unwrap();

        let loaded = store.load().await.unwrap();
        assert_eq!(loaded.counts(), SeedCounts { users: 1, posts: 2 });
        assert_eq!(loaded.user("matt").unwrap().name, "Matthew");
    }

    #[tokio::test]
    async fn test_dangling_author_is_stored() {
        let store = SqliteSeedStore::new(test_pool().await);
        let mut builder = SeedBuilder::new();
        builder.add_post("orphan", NewPost::new("Orphan", "ghost"));

        store.persist(&builder.commit()).await.unwrap();

        let loaded = store.load().await.unwrap();
        assert_eq!(loaded.dangling_authors().len(), 1);
    }

    #[tokio::test]
    async fn test_list_batches_most_recent_first() {
        let store = SqliteSeedStore::new(test_pool().await);
        let first = store.persist(&scenario()).await.unwrap();
        let second = store.persist(&SeedSnapshot::default()).await.unwrap();

        let batches = store.list_batches().await.unwrap();
        assert_eq!(batches.len(), 2);
        assert_eq!(batches[0].id, second.id);
        assert_eq!(batches[1].id, first.id);
        assert_eq!(batches[1].counts.posts, 2);
        assert_eq!(batches[0].counts.total(), 0);
    }

    #[tokio::test]
    async fn test_failed_write_names_entry_and_rolls_back() {
        let pool = test_pool().await;
        // Force the posts insert to fail.
        sqlx::query("CREATE TRIGGER reject_post BEFORE INSERT ON posts WHEN NEW.id = 'post2' BEGIN SELECT RAISE(ABORT, 'rejected'); END")
            .execute(&pool.writer)
            .await
            .unwrap();
        let store = SqliteSeedStore::new(pool);

        let err = store.persist(&scenario()).await.unwrap_err();
        match err {
            RepositoryError::Write { category, id, message } => {
                assert_eq!(category, CategoryKind::Posts);
                assert_eq!(id, "post2");
                assert!(message.contains("rejected"));
            }
            other => panic!("unexpected error: {other}"),
        }

        let loaded = store.load().await.unwrap();
        assert!(loaded.is_empty(), "transaction should have rolled back");
        assert!(store.list_batches().await.unwrap().is_empty());
    }
}
