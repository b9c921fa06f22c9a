use crate::models::{NewShareRecord, ShareRecord};
use crate::storage::MappingStore;
use anyhow::Result;
use async_trait::async_trait;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use std::sync::Arc;

pub struct PostgresStorage {
    pool: Arc<PgPool>,
}

impl PostgresStorage {
    pub async fn new(database_url: &str, max_connections: u32) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await?;
        Ok(Self {
            pool: Arc::new(pool),
        })
    }
}

#[async_trait]
impl MappingStore for PostgresStorage {
    async fn init(&self) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS files (
                id BIGSERIAL PRIMARY KEY,
                original_url TEXT NOT NULL,
                short_url TEXT NOT NULL,
                created_at BIGINT NOT NULL
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
        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO files (original_url, short_url, created_at)
            VALUES ($1, $2, $3)
            RETURNING id
            "#,
        )
        .bind(&record.original_url)
        .bind(&record.short_url)
        .bind(record.created_at)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(id)
    }

    async fn find_one_by_short_url(&self, short_url: &str) -> Result<Option<ShareRecord>> {
        let record = sqlx::query_as::<_, ShareRecord>(
            r#"
            SELECT id, original_url, short_url, created_at
            FROM files
            WHERE short_url = $1
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
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(records)
    }
}
