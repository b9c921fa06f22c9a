use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use super::handlers::{ping, root_status, upload_file, AppState};

/// Room left in the request body for multipart boundaries and part headers
const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

/// Routes mounted under `/api` that accept uploads
pub fn create_api_router(state: Arc<AppState>) -> Router {
    let body_limit = state
        .upload
        .max_file_bytes
        .saturating_add(MULTIPART_OVERHEAD_BYTES);

    Router::new()
        .route("/upload", post(upload_file))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}

/// Liveness and root status routes
pub fn create_status_router() -> Router {
    Router::new()
        .route("/ping", get(ping))
        .route("/", get(root_status))
}
