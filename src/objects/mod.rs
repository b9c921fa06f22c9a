//! Object storage for uploaded files.
//!
//! Production deployments write to S3 through Apache OpenDAL and hand out
//! presigned GET URLs; the memory backend keeps objects in process for local
//! runs and tests.

mod error;
mod key;
mod memory;
mod s3;

pub use error::ObjectStoreError;
pub use key::{resolve_content_type, storage_key};
pub use memory::{MemoryObjectStore, StoredObject};
pub use s3::S3ObjectStore;

use async_trait::async_trait;
use bytes::Bytes;
use std::sync::Arc;
use std::time::Duration;

use crate::config::{ObjectStoreConfig, ObjectStoreProvider};

#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Store `body` under `key`, replacing any existing object
    async fn put(&self, key: &str, body: Bytes, content_type: &str)
        -> Result<(), ObjectStoreError>;

    /// A time-limited URL granting read access to `key`
    async fn presign_get(&self, key: &str) -> Result<String, ObjectStoreError>;
}

/// Build the object store selected in configuration
pub fn from_config(config: &ObjectStoreConfig) -> Result<Arc<dyn ObjectStore>, ObjectStoreError> {
    let ttl = Duration::from_secs(config.presign_ttl_secs);
    let store: Arc<dyn ObjectStore> = match &config.provider {
        ObjectStoreProvider::S3 {
            bucket,
            region,
            access_key_id,
            secret_access_key,
            endpoint,
        } => Arc::new(S3ObjectStore::new(
            bucket,
            region,
            access_key_id,
            secret_access_key,
            endpoint.as_deref(),
            ttl,
        )?),
        ObjectStoreProvider::Memory { bucket } => Arc::new(MemoryObjectStore::new(bucket, ttl)),
    };
    Ok(store)
}
