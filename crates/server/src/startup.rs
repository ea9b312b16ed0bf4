use std::net::SocketAddr;

use axum::Router;
use common::utils::logging::init_logging_from_env;
use configs::AppConfig;
use dotenvy::dotenv;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::errors::StartupError;
use crate::routes;
use service::{runtime, storage::FileCategoryStore};

/// Initialize logging via shared common utils
fn init_logging() {
    init_logging_from_env();
}

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Load config from `config.toml` or env vars, with sensible fallbacks
fn load_config() -> Result<AppConfig, StartupError> {
    AppConfig::load_or_env().map_err(|e| StartupError::InvalidConfig(e.to_string()))
}

fn bind_addr(cfg: &AppConfig) -> anyhow::Result<SocketAddr> {
    Ok(format!("{}:{}", cfg.server.host, cfg.server.port).parse()?)
}

/// Build the application router from config; the store creates the data directory if missing.
pub async fn build_app(cfg: &AppConfig) -> Result<Router, StartupError> {
    let storage = &cfg.storage;
    runtime::ensure_env(&storage.frontend_dir)
        .await
        .map_err(|e| StartupError::Runtime(e.to_string()))?;

    // 分类数据存储（data/<category>.json）
    let store = FileCategoryStore::new(&storage.data_dir)
        .await
        .map_err(|e| StartupError::Runtime(e.to_string()))?;
    info!(data_dir = %store.data_dir().display(), "category store ready");

    Ok(routes::build_router(store, &storage.frontend_dir, build_cors()))
}

/// Public entry: build the app and serve until `shutdown` resolves, finishing in-flight requests.
pub async fn run_until<F>(shutdown: F) -> anyhow::Result<()>
where
    F: std::future::Future<Output = ()> + Send + 'static,
{
    dotenv().ok();
    init_logging();

    let cfg = load_config()?;
    let app = build_app(&cfg).await?;

    let addr = bind_addr(&cfg)?;
    info!(%addr, "starting server crate");
    info!("API endpoints: POST /api/save-data, GET /api/load-data/:type?");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).with_graceful_shutdown(shutdown).await?;
    Ok(())
}
