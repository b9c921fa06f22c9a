#![allow(dead_code)]

use anyhow::anyhow;
use async_trait::async_trait;
use axum::{body::Body, http::Request, Router};
use bytes::Bytes;
use sharelink::config::UploadConfig;
use sharelink::models::{NewShareRecord, ShareRecord};
use sharelink::objects::{MemoryObjectStore, ObjectStore, ObjectStoreError};
use sharelink::server::create_app;
use sharelink::shortcode::ShortLinks;
use sharelink::storage::{MappingStore, SqliteStorage};
use std::sync::Arc;
use std::time::Duration;

pub const BASE_URL: &str = "http://localhost:8000/api/get-file/";
pub const BOUNDARY: &str = "sharelink-test-boundary";

/// Helper to create test storage
pub async fn create_test_storage() -> Arc<dyn MappingStore> {
    let storage = SqliteStorage::new("sqlite::memory:", 1).await.unwrap();
    storage.init().await.unwrap();
    Arc::new(storage)
}

pub fn create_object_store() -> Arc<MemoryObjectStore> {
    Arc::new(MemoryObjectStore::new("test-bucket", Duration::from_secs(900)))
}

pub fn create_test_app(
    storage: Arc<dyn MappingStore>,
    objects: Arc<dyn ObjectStore>,
    upload: UploadConfig,
) -> Router {
    create_app(storage, objects, ShortLinks::new(BASE_URL), upload)
}

pub struct TestMultipartPart<'a> {
    pub field: &'a str,
    pub file_name: Option<&'a str>,
    pub content_type: Option<&'a str>,
    pub data: &'a [u8],
}

impl<'a> TestMultipartPart<'a> {
    pub fn file(file_name: &'a str, content_type: &'a str, data: &'a [u8]) -> Self {
        Self {
            field: "file",
            file_name: Some(file_name),
            content_type: Some(content_type),
            data,
        }
    }
}

pub fn multipart_body(parts: &[TestMultipartPart<'_>]) -> Vec<u8> {
    let mut body = Vec::new();
    for part in parts {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());

        let mut disposition = format!("Content-Disposition: form-data; name=\"{}\"", part.field);
        if let Some(file_name) = part.file_name {
            disposition.push_str(&format!("; filename=\"{file_name}\""));
        }
        body.extend_from_slice(disposition.as_bytes());
        body.extend_from_slice(b"\r\n");

        if let Some(content_type) = part.content_type {
            body.extend_from_slice(format!("Content-Type: {content_type}\r\n").as_bytes());
        }
        body.extend_from_slice(b"\r\n");
        body.extend_from_slice(part.data);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

pub fn upload_request(parts: &[TestMultipartPart<'_>]) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/upload")
        .header(
            "content-type",
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(multipart_body(parts)))
        .unwrap()
}

pub async fn body_string(response: axum::response::Response) -> String {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(body.to_vec()).unwrap()
}

/// Pull the short link out of the upload response page
pub fn extract_short_link(html: &str) -> String {
    let start = html.find("<a href=\"").expect("page has a link") + "<a href=\"".len();
    let end = html[start..].find('"').expect("link is quoted") + start;
    html[start..end].to_string()
}

/// Object store whose every call fails, as if the bucket were unreachable
pub struct FailingObjectStore;

#[async_trait]
impl ObjectStore for FailingObjectStore {
    async fn put(&self, _key: &str, _body: Bytes, _content_type: &str) -> Result<(), ObjectStoreError> {
        Err(ObjectStoreError::operation("simulated outage"))
    }

    async fn presign_get(&self, _key: &str) -> Result<String, ObjectStoreError> {
        Err(ObjectStoreError::operation("simulated outage"))
    }
}

/// Mapping store whose every call fails, as if the database were unreachable
pub struct FailingMappingStore;

#[async_trait]
impl MappingStore for FailingMappingStore {
    async fn init(&self) -> anyhow::Result<()> {
        Err(anyhow!("connection refused"))
    }

    async fn insert_one(&self, _record: &NewShareRecord) -> anyhow::Result<i64> {
        Err(anyhow!("connection refused"))
    }

    async fn find_one_by_short_url(&self, _short_url: &str) -> anyhow::Result<Option<ShareRecord>> {
        Err(anyhow!("connection refused"))
    }

    async fn list_recent(&self, _limit: i64) -> anyhow::Result<Vec<ShareRecord>> {
        Err(anyhow!("connection refused"))
    }
}
