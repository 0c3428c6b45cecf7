use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use api_rest::{router, AppState, API_PREFIX};
use webpages_core::{pages_root_from_env_value, CoreConfig, PageStore};

/// Main entry point for the WebPages server
///
/// Serves the management API, the static mount over the pages root, the health check and the
/// Swagger UI from a single REST server.
///
/// # Environment Variables
/// - `WEBPAGES_REST_ADDR`: REST server address (default: "0.0.0.0:3000")
/// - `WEBPAGES_ROOT`: Directory holding pages and assets (default: "static/pages")
/// - `API_KEY`: Admin API key required on every management route
///
/// # Returns
/// * `Ok(())` - If the server starts and shuts down cleanly
/// * `Err(anyhow::Error)` - If configuration, binding or serving fails
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("webpages_run=info".parse()?)
                .add_directive("api_rest=info".parse()?)
                .add_directive("webpages_core=info".parse()?)
                .add_directive("tower_http=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let addr = std::env::var("WEBPAGES_REST_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".into());

    let admin_key = std::env::var("API_KEY")
        .ok()
        .map(|k| k.trim().to_string())
        .filter(|k| !k.is_empty());
    let Some(admin_key) = admin_key else {
        anyhow::bail!("API_KEY must be set to protect the management API");
    };

    let pages_root = pages_root_from_env_value(std::env::var("WEBPAGES_ROOT").ok());
    let cfg = Arc::new(CoreConfig::new(pages_root)?);
    let store = PageStore::new(cfg.clone());
    store.ensure_root()?;

    tracing::info!("++ Serving pages from {}", cfg.pages_root().display());
    tracing::info!("++ Static mount at {}", cfg.static_url_prefix());
    tracing::info!("++ Starting WebPages REST on {}{}", addr, API_PREFIX);

    let app = router(AppState::new(store, admin_key));

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("-- WebPages REST stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {}", e);
    }
}
