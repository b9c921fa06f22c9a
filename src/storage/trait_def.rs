use crate::models::{NewShareRecord, ShareRecord};
use anyhow::Result;
use async_trait::async_trait;

/// Persistent mapping from short links to the signed URLs they redirect to
#[async_trait]
pub trait MappingStore: Send + Sync {
    /// Initialize the storage (create tables and indexes)
    async fn init(&self) -> Result<()>;

    /// Insert one record and return its store-assigned id.
    ///
    /// Short links are not unique at the schema level; callers that care
    /// check with [`MappingStore::find_one_by_short_url`] first.
    async fn insert_one(&self, record: &NewShareRecord) -> Result<i64>;

    /// Find the earliest record whose short link equals `short_url` exactly
    async fn find_one_by_short_url(&self, short_url: &str) -> Result<Option<ShareRecord>>;

    /// Most recently created records first
    async fn list_recent(&self, limit: i64) -> Result<Vec<ShareRecord>>;
}
