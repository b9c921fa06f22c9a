use axum::extract::multipart::MultipartError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use crate::objects::ObjectStoreError;
use crate::qr::QrError;

/// Errors surfaced by the upload and resolve routes
#[derive(Debug, Error)]
pub enum ShareError {
    #[error("No files were uploaded.")]
    NoFile,

    #[error("File size limit exceeded ({limit_mb} MB)")]
    FileTooLarge { limit_mb: usize },

    #[error("Malformed multipart body: {0}")]
    Multipart(String),

    #[error("Invalid file Request")]
    UnknownCode,

    #[error("object store: {0}")]
    ObjectStore(#[from] ObjectStoreError),

    #[error("mapping store: {0}")]
    Mapping(anyhow::Error),

    #[error("qr: {0}")]
    Qr(#[from] QrError),

    #[error("no free short code after {attempts} attempts")]
    CodeSpaceExhausted { attempts: usize },

    /// Store failure while resolving; the body carries the raw error
    #[error("{0}")]
    Lookup(anyhow::Error),
}

impl ShareError {
    /// Classify a multipart read failure, treating body-limit hits as oversize
    pub fn from_multipart(err: MultipartError, limit_mb: usize) -> Self {
        if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
            Self::FileTooLarge { limit_mb }
        } else {
            Self::Multipart(err.body_text())
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::NoFile | Self::FileTooLarge { .. } | Self::Multipart(_) | Self::UnknownCode => {
                StatusCode::BAD_REQUEST
            }
            Self::ObjectStore(_)
            | Self::Mapping(_)
            | Self::Qr(_)
            | Self::CodeSpaceExhausted { .. }
            | Self::Lookup(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ShareError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match &self {
            Self::Lookup(err) => {
                tracing::error!(error = %err, "short link lookup failed");
                format!("{err:#}")
            }
            _ if status.is_server_error() => {
                tracing::error!(error = %self, "upload failed");
                "Internal Server Error".to_string()
            }
            _ => self.to_string(),
        };

        (status, body).into_response()
    }
}
