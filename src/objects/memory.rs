use async_trait::async_trait;
use bytes::Bytes;
use dashmap::DashMap;
use std::time::Duration;

use super::{ObjectStore, ObjectStoreError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredObject {
    pub body: Bytes,
    pub content_type: String,
}

/// Process-local object store.
///
/// Presigned URLs take the form `memory://<bucket>/<key>?expires_in=<secs>`
/// and are stable for a given key.
pub struct MemoryObjectStore {
    bucket: String,
    presign_ttl: Duration,
    objects: DashMap<String, StoredObject>,
}

impl MemoryObjectStore {
    pub fn new(bucket: impl Into<String>, presign_ttl: Duration) -> Self {
        Self {
            bucket: bucket.into(),
            presign_ttl,
            objects: DashMap::new(),
        }
    }

    pub fn get(&self, key: &str) -> Option<StoredObject> {
        self.objects.get(key).map(|entry| entry.value().clone())
    }

    pub fn keys(&self) -> Vec<String> {
        self.objects.iter().map(|entry| entry.key().clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

#[async_trait]
impl ObjectStore for MemoryObjectStore {
    async fn put(
        &self,
        key: &str,
        body: Bytes,
        content_type: &str,
    ) -> Result<(), ObjectStoreError> {
        self.objects.insert(
            key.to_string(),
            StoredObject {
                body,
                content_type: content_type.to_string(),
            },
        );
        Ok(())
    }

    async fn presign_get(&self, key: &str) -> Result<String, ObjectStoreError> {
        Ok(format!(
            "memory://{}/{}?expires_in={}",
            self.bucket,
            key,
            self.presign_ttl.as_secs()
        ))
    }
}
