use async_trait::async_trait;
use bytes::Bytes;
use opendal::{services, Operator};
use std::time::Duration;

use super::{ObjectStore, ObjectStoreError};

/// S3 (or S3-compatible) bucket accessed through OpenDAL
pub struct S3ObjectStore {
    operator: Operator,
    presign_ttl: Duration,
}

impl S3ObjectStore {
    pub fn new(
        bucket: &str,
        region: &str,
        access_key_id: &str,
        secret_access_key: &str,
        endpoint: Option<&str>,
        presign_ttl: Duration,
    ) -> Result<Self, ObjectStoreError> {
        let mut builder = services::S3::default()
            .bucket(bucket)
            .region(region)
            .access_key_id(access_key_id)
            .secret_access_key(secret_access_key)
            .disable_config_load()
            .disable_ec2_metadata();

        if let Some(endpoint) = endpoint {
            builder = builder.endpoint(endpoint);
        }

        let operator = Operator::new(builder)
            .map_err(|e| ObjectStoreError::configuration(e.to_string()))?
            .finish();

        Ok(Self {
            operator,
            presign_ttl,
        })
    }
}

#[async_trait]
impl ObjectStore for S3ObjectStore {
    async fn put(
        &self,
        key: &str,
        body: Bytes,
        content_type: &str,
    ) -> Result<(), ObjectStoreError> {
        self.operator
            .write_with(key, body)
            .content_type(content_type)
            .await?;
        Ok(())
    }

    async fn presign_get(&self, key: &str) -> Result<String, ObjectStoreError> {
        let presigned = self
            .operator
            .presign_read(key, self.presign_ttl)
            .await
            .map_err(ObjectStoreError::from_presign)?;
        Ok(presigned.uri().to_string())
    }
}
