use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use tracing::{info, warn};

use crate::api::ShareError;
use crate::shortcode::ShortLinks;
use crate::storage::MappingStore;

pub struct RedirectState {
    pub mappings: Arc<dyn MappingStore>,
    pub links: ShortLinks,
}

/// Redirect a short code to the signed URL it was created for.
///
/// The stored URL is returned as-is; if its signature has expired the
/// object store, not this service, rejects the follow-up request.
pub async fn resolve_file(
    State(state): State<Arc<RedirectState>>,
    Path(code): Path<String>,
) -> Result<Response, ShareError> {
    let short_url = state.links.link_for(&code);

    let record = state
        .mappings
        .find_one_by_short_url(&short_url)
        .await
        .map_err(ShareError::Lookup)?;

    match record {
        Some(record) => {
            info!(short_code = %code, "redirecting");
            Ok((
                StatusCode::FOUND,
                [(header::LOCATION, record.original_url)],
            )
                .into_response())
        }
        None => {
            warn!(short_code = %code, "invalid url");
            Err(ShareError::UnknownCode)
        }
    }
}
