use std::path::PathBuf;

use anyhow::Context;
use axum::extract::DefaultBodyLimit;
use axum::{Extension, Router};
use tower_http::cors::CorsLayer;

use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::backend::BackendClient;
use crate::config::Config;
use crate::routes::create_routes;

/// axum caps request bodies at 2 MiB by default; camera photos are larger.
const UPLOAD_BODY_LIMIT: usize = 25 * 1024 * 1024;

/// Shared state handed to every handler. Cloning is cheap: the backend
/// client wraps a pooled reqwest client.
#[derive(Debug, Clone)]
pub struct Relay {
    pub backend: BackendClient,
    pub upload_dir: PathBuf,
}

/// Initialize tracing and logging for the application
pub fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "tomato_relay=info,tower_http=debug,axum::rejection=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Create and configure the Axum application with all routes and middleware
pub async fn create_app(config: &Config) -> Result<Router, anyhow::Error> {
    info!("Initializing application router");

    tokio::fs::create_dir_all(&config.upload_dir)
        .await
        .with_context(|| {
            format!(
                "Failed to create upload directory {}",
                config.upload_dir.display()
            )
        })?;

    let backend = BackendClient::new(&config.backend_url, config.backend_timeout)?;
    info!("Forwarding to backend at {}", config.backend_url);

    let relay = Relay {
        backend,
        upload_dir: config.upload_dir.clone(),
    };

    Ok(Router::new()
        .merge(create_routes())
        .layer(Extension(relay))
        .layer(DefaultBodyLimit::max(UPLOAD_BODY_LIMIT))
        .layer(CorsLayer::permissive()))
}
