use std::sync::Arc;

use axum::{
    routing::{get, post},
    Json, Router,
};
use tower_http::{
    cors::CorsLayer,
    services::ServeDir,
    trace::{TraceLayer, DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, DefaultOnFailure},
};
use tracing::Level;
use utoipa::OpenApi;

use common::types::Health;
use service::storage::CategoryStorage;

use crate::openapi::ApiDoc;

pub mod data;

/// Shared router state: the category store behind its trait seam.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn CategoryStorage>,
}

#[utoipa::path(get, path = "/health", tag = "health", responses((status = 200, description = "OK", body = crate::openapi::HealthResponse)))]
pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// Build the full application router: data API, health, docs and static assets
pub fn build_router(store: Arc<dyn CategoryStorage>, frontend_dir: &str, cors: CorsLayer) -> Router {
    let state = AppState { store };

    let api = Router::new()
        .route("/api/save-data", post(data::save_data))
        .route("/api/load-data", get(data::load_all))
        .route("/api/load-data/", get(data::load_all))
        .route("/api/load-data/:type", get(data::load_one));

    // 静态文件服务（原前端页面），未命中路由时回落到此
    let static_dir = ServeDir::new(frontend_dir);

    Router::new()
        .route("/health", get(health))
        .route("/api-docs/openapi.json", get(openapi_json))
        .merge(api)
        .fallback_service(static_dir)
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                // 每次请求创建 span，包含方法和路径等，日志级别为 INFO
                .make_span_with(
                    DefaultMakeSpan::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_request(
                    DefaultOnRequest::new()
                        .level(Level::INFO),
                )
                // 响应返回时打点，包含状态码与耗时
                .on_response(
                    DefaultOnResponse::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                // 失败（5xx 等）时以 ERROR 记录
                .on_failure(
                    DefaultOnFailure::new()
                        .level(Level::ERROR),
                )
        )
}
