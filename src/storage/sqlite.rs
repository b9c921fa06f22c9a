use crate::models::{NewShareRecord, ShareRecord};
use crate::storage::MappingStore;
use anyhow::Result;
use async_trait::async_trait;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;
use std::sync::Arc;

pub struct SqliteStorage {
    pool: Arc<SqlitePool>,
}

impl SqliteStorage {
    pub async fn new(database_url: &str, max_connections: u32) -> Result<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await?;
        Ok(Self {
            pool: Arc::new(pool),
        })
    }
}

#[async_trait]
impl MappingStore for SqliteStorage {
    async fn init(&self) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS files (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                original_url TEXT NOT NULL,
                short_url TEXT NOT NULL,
                created_at INTEGER NOT NULL
            )
            "#,
        )
        .execute(self.pool.as_ref())
        .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_files_short_url ON files(short_url)")
            .execute(self.pool.as_ref())
            .await?;

        Ok(())
    }

    async fn insert_one(&self, record: &NewShareRecord) -> Result<i64> {
        let result = sqlx::query(
            r#"
            INSERT INTO files (original_url, short_url, created_at)
            VALUES (?, ?, ?)
            "#,
        )
        .bind(&record.original_url)
        .bind(&record.short_url)
        .bind(record.created_at)
        .execute(self.pool.as_ref())
        .await?;

        Ok(result.last_insert_rowid())
    }

    async fn find_one_by_short_url(&self, short_url: &str) -> Result<Option<ShareRecord>> {
        let record = sqlx::query_as::<_, ShareRecord>(
            r#"
            SELECT id, original_url, short_url, created_at
            FROM files
            WHERE short_url = ?
            ORDER BY id ASC
            LIMIT 1
            "#,
        )
        .bind(short_url)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(record)
    }

    async fn list_recent(&self, limit: i64) -> Result<Vec<ShareRecord>> {
        let records = sqlx::query_as::<_, ShareRecord>(
            r#"
            SELECT id, original_url, short_url, created_at
            FROM files
            ORDER BY created_at DESC, id DESC
            LIMIT ?
            "#,
        )
        .bind(limit)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn setup_sqlite() -> SqliteStorage {
        let storage = SqliteStorage::new("sqlite::memory:", 1).await.unwrap();
        storage.init().await.unwrap();
        storage
    }

    #[tokio::test]
    async fn init_is_idempotent() {
        let storage = setup_sqlite().await;
        storage.init().await.unwrap();
    }

    #[tokio::test]
    async fn duplicate_short_urls_resolve_to_first_insert() {
        let storage = setup_sqlite().await;

        let first = NewShareRecord {
            original_url: "https://bucket/first".to_string(),
            short_url: "http://s/ABC1D".to_string(),
            created_at: 1,
        };
        let second = NewShareRecord {
            original_url: "https://bucket/second".to_string(),
            ..first.clone()
        };

        let first_id = storage.insert_one(&first).await.unwrap();
        let second_id = storage.insert_one(&second).await.unwrap();
        assert!(second_id > first_id);

        let found = storage
            .find_one_by_short_url("http://s/ABC1D")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.id, first_id);
        assert_eq!(found.original_url, "https://bucket/first");
    }
}
