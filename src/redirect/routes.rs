use axum::{routing::get, Router};
use std::sync::Arc;

use super::handlers::{resolve_file, RedirectState};

/// Routes mounted under `/api` that resolve short codes
pub fn create_redirect_router(state: Arc<RedirectState>) -> Router {
    Router::new()
        .route("/get-file/{file}", get(resolve_file))
        .with_state(state)
}
