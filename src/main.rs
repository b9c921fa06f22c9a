use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::EnvFilter;

use sharelink::config::Config;
use sharelink::server::{create_app, shutdown_signal};
use sharelink::shortcode::ShortLinks;
use sharelink::{connect_mapping_store, objects};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env()?;
    info!("Loaded configuration");

    // Refuse to start without a working mapping store
    info!("Connecting to mapping store...");
    let mappings = connect_mapping_store(&config.database)
        .await
        .context("failed to initialize mapping store")?;
    info!("Mapping store initialized successfully");

    let objects = objects::from_config(&config.object_store)
        .context("failed to initialize object store")?;
    info!(
        "Object store ready (signed URLs valid for {}s)",
        config.object_store.presign_ttl_secs
    );

    let links = ShortLinks::new(config.short_links.base_url.clone());
    info!("Short links use base URL {}", links.base_url());

    let app = create_app(mappings, objects, links, config.upload.clone());

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Application running on http://{}", addr);
    info!(
        "   - uploads up to {} MB at http://{}/api/upload",
        config.upload.max_file_mb(),
        addr
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}
