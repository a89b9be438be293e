//! portfolio-api server binary

use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use portfolio_api::api::{create_router, AppState};
use portfolio_api::catalog::Catalog;
use portfolio_api::config::{AppConfig, LogFormat};
use portfolio_api::store::{create_store, Store};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let dotenv = dotenvy::dotenv();

    let config = AppConfig::load().context("failed to load configuration")?;

    init_tracing(&config)?;

    if dotenv.is_err() {
        tracing::info!(".env file not found; using process environment");
    }

    let store = build_store(&config)?;
    let catalog = Catalog::new(store);

    let allowed_origins = config.allowed_origins();
    tracing::info!(origins = ?allowed_origins, "CORS origins configured");

    let router = create_router(AppState::new(catalog), &allowed_origins);

    // Start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind to {}", addr))?;
    tracing::info!(%addr, "Listening for HTTP traffic");

    axum::serve(listener, router).await?;

    Ok(())
}

fn build_store(config: &AppConfig) -> anyhow::Result<Option<Arc<dyn Store>>> {
    let Some(store_config) = config.store_runtime() else {
        tracing::warn!("Store credentials not configured; serving fallback data only");
        return Ok(None);
    };

    let url = store_config.url.clone();
    let store = create_store(store_config).context("invalid store configuration")?;
    tracing::info!(%url, backend = store.name(), "Store client initialised");

    Ok(Some(Arc::from(store)))
}

fn init_tracing(config: &AppConfig) -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.logging.level.clone()))
        .unwrap_or_else(|_| EnvFilter::new("portfolio_api=info"));

    let registry = tracing_subscriber::registry().with(env_filter);

    match config.logging.format {
        LogFormat::Json => {
            registry
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
        LogFormat::Text => {
            registry.with(tracing_subscriber::fmt::layer()).init();
        }
    }

    Ok(())
}
