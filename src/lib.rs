pub mod api;
pub mod config;
pub mod models;
pub mod objects;
pub mod qr;
pub mod redirect;
pub mod server;
pub mod shortcode;
pub mod storage;

use anyhow::Result;
use std::sync::Arc;
use tracing::info;

use config::{DatabaseBackend, DatabaseConfig};
use storage::{MappingStore, PostgresStorage, SqliteStorage};

/// Connect to the configured mapping store and make sure its schema exists
pub async fn connect_mapping_store(database: &DatabaseConfig) -> Result<Arc<dyn MappingStore>> {
    let storage: Arc<dyn MappingStore> = match database.backend {
        DatabaseBackend::Sqlite => {
            info!("Using SQLite storage: {}", database.url);
            Arc::new(SqliteStorage::new(&database.url, database.max_connections).await?)
        }
        DatabaseBackend::Postgres => {
            info!("Using PostgreSQL storage");
            Arc::new(PostgresStorage::new(&database.url, database.max_connections).await?)
        }
    };

    storage.init().await?;
    Ok(storage)
}
