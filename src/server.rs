use axum::Router;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::api::handlers::AppState;
use crate::api::routes::{create_api_router, create_status_router};
use crate::config::UploadConfig;
use crate::objects::ObjectStore;
use crate::redirect::handlers::RedirectState;
use crate::redirect::routes::create_redirect_router;
use crate::shortcode::ShortLinks;
use crate::storage::MappingStore;

/// Assemble the full HTTP surface: status routes at the root, upload and
/// resolve under `/api`
pub fn create_app(
    mappings: Arc<dyn MappingStore>,
    objects: Arc<dyn ObjectStore>,
    links: ShortLinks,
    upload: UploadConfig,
) -> Router {
    let api_state = Arc::new(AppState {
        mappings: Arc::clone(&mappings),
        objects,
        links: links.clone(),
        upload,
    });
    let redirect_state = Arc::new(RedirectState { mappings, links });

    let api = create_api_router(api_state).merge(create_redirect_router(redirect_state));

    create_status_router()
        .nest("/api", api)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

/// Resolves once the process is asked to stop
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl-C: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, draining connections...");
}
