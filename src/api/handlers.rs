use axum::{
    extract::{
        multipart::{Field, MultipartRejection},
        Multipart, State,
    },
    response::Html,
    Json,
};
use bytes::{Bytes, BytesMut};
use serde::Serialize;
use std::sync::Arc;
use tracing::{info, warn};

use super::error::ShareError;
use super::page::share_page;
use crate::config::UploadConfig;
use crate::models::NewShareRecord;
use crate::objects::{resolve_content_type, storage_key, ObjectStore};
use crate::qr;
use crate::shortcode::ShortLinks;
use crate::storage::MappingStore;

/// Multipart field carrying the upload
pub const FILE_FIELD: &str = "file";

/// Short-code draws before an upload gives up on finding an unused link
pub const MAX_CODE_ATTEMPTS: usize = 8;

pub struct AppState {
    pub mappings: Arc<dyn MappingStore>,
    pub objects: Arc<dyn ObjectStore>,
    pub links: ShortLinks,
    pub upload: UploadConfig,
}

#[derive(Serialize)]
pub struct MessageResponse {
    pub message: String,
}

struct UploadedFile {
    file_name: Option<String>,
    content_type: Option<String>,
    body: Bytes,
}

/// Liveness probe
pub async fn ping() -> Json<MessageResponse> {
    info!("Health 100%");
    Json(MessageResponse {
        message: "Health 100%".to_string(),
    })
}

pub async fn root_status() -> &'static str {
    "Running"
}

/// Store an uploaded file and answer with a QR code for its short link
pub async fn upload_file(
    State(state): State<Arc<AppState>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Html<String>, ShareError> {
    let mut multipart = match multipart {
        Ok(multipart) => multipart,
        Err(rejection) => {
            warn!(reason = %rejection, "upload is not a multipart request");
            return Err(ShareError::NoFile);
        }
    };

    let file = read_file_field(&mut multipart, &state.upload)
        .await?
        .ok_or(ShareError::NoFile)?;

    let content_type =
        resolve_content_type(file.content_type.as_deref(), file.file_name.as_deref());
    let key = storage_key(&content_type, chrono::Utc::now().timestamp_millis());
    let size = file.body.len();

    state
        .objects
        .put(&key, file.body, content_type.as_ref())
        .await?;
    info!(key = %key, size, content_type = %content_type, "file uploaded");

    let original_url = state.objects.presign_get(&key).await?;
    info!(key = %key, "signed url generated successfully");

    let short_url = allocate_short_url(&state).await?;

    let record = NewShareRecord::now(original_url, short_url.clone());
    let id = state
        .mappings
        .insert_one(&record)
        .await
        .map_err(ShareError::Mapping)?;
    info!(id, short_url = %short_url, "share record inserted");

    let qr_data_uri = qr::render_data_uri(short_url.clone()).await?;
    info!(short_url = %short_url, "QR code generated successfully");

    Ok(Html(share_page(&qr_data_uri, &short_url)))
}

/// Pull the first file part named [`FILE_FIELD`] out of the request body.
///
/// Parts without a file name are form values, not files, and are skipped.
async fn read_file_field(
    multipart: &mut Multipart,
    limits: &UploadConfig,
) -> Result<Option<UploadedFile>, ShareError> {
    let limit_mb = limits.max_file_mb();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ShareError::from_multipart(e, limit_mb))?
    {
        if field.name() != Some(FILE_FIELD) || field.file_name().is_none() {
            continue;
        }

        let file_name = field.file_name().map(str::to_owned);
        let content_type = field.content_type().map(str::to_owned);
        let body = read_limited(field, limits.max_file_bytes, limit_mb).await?;

        return Ok(Some(UploadedFile {
            file_name,
            content_type,
            body,
        }));
    }

    Ok(None)
}

async fn read_limited(
    mut field: Field<'_>,
    max_bytes: usize,
    limit_mb: usize,
) -> Result<Bytes, ShareError> {
    let mut body = BytesMut::new();

    while let Some(chunk) = field
        .chunk()
        .await
        .map_err(|e| ShareError::from_multipart(e, limit_mb))?
    {
        if body.len() + chunk.len() > max_bytes {
            warn!(max_bytes, "upload exceeds file size limit");
            return Err(ShareError::FileTooLarge { limit_mb });
        }
        body.extend_from_slice(&chunk);
    }

    Ok(body.freeze())
}

/// Draw short links until one is not yet mapped
async fn allocate_short_url(state: &AppState) -> Result<String, ShareError> {
    for _ in 0..MAX_CODE_ATTEMPTS {
        let candidate = state.links.generate();
        let existing = state
            .mappings
            .find_one_by_short_url(&candidate)
            .await
            .map_err(ShareError::Mapping)?;

        if existing.is_none() {
            return Ok(candidate);
        }
        warn!(short_url = %candidate, "short code already taken, drawing again");
    }

    Err(ShareError::CodeSpaceExhausted {
        attempts: MAX_CODE_ATTEMPTS,
    })
}
