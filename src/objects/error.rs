use thiserror::Error;

#[derive(Debug, Error)]
pub enum ObjectStoreError {
    /// The backend cannot produce presigned URLs.
    #[error("presign operation not supported by object store")]
    PresignNotSupported,

    #[error("object store configuration error: {0}")]
    Configuration(String),

    #[error("object store operation failed: {0}")]
    Operation(String),
}

impl ObjectStoreError {
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    pub fn operation(msg: impl Into<String>) -> Self {
        Self::Operation(msg.into())
    }

    /// Classify a failed presign, where `Unsupported` means the backend cannot sign
    pub fn from_presign(err: opendal::Error) -> Self {
        match err.kind() {
            opendal::ErrorKind::Unsupported => Self::PresignNotSupported,
            _ => Self::Operation(err.to_string()),
        }
    }
}

impl From<opendal::Error> for ObjectStoreError {
    fn from(err: opendal::Error) -> Self {
        Self::Operation(err.to_string())
    }
}
