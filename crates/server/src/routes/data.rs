use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    Json,
};
use serde::Deserialize;
use serde_json::Value;
use tracing::{info, warn};

use common::types::ApiResponse;
use service::storage::Category;

use crate::errors::{JsonApiError, Op};
use crate::routes::AppState;

pub const MSG_SAVED: &str = "数据保存成功";

/// Save request body: `{ "type": "<category>", "data": <document> }`
#[derive(Debug, Deserialize)]
pub struct SaveRequest {
    #[serde(rename = "type")]
    pub category: Option<String>,
    pub data: Option<Value>,
}

/// 保存数据：整体覆盖对应分类文件；`all` 时逐个分类写入
#[utoipa::path(
    post,
    path = "/api/save-data",
    tag = "data",
    request_body = crate::openapi::SaveRequestDoc,
    responses(
        (status = 200, description = "Saved"),
        (status = 400, description = "Missing parameter, invalid category or invalid JSON body"),
        (status = 500, description = "Write failed")
    )
)]
pub async fn save_data(
    State(state): State<AppState>,
    payload: Result<Json<SaveRequest>, JsonRejection>,
) -> Result<Json<ApiResponse>, JsonApiError> {
    let Json(req) = payload.map_err(|e| {
        warn!(err = %e, "save-data body rejected");
        JsonApiError::invalid_json(e.body_text())
    })?;

    // 先判断必填参数，再校验分类白名单
    let (Some(name), Some(data)) = (req.category, req.data.filter(|v| !v.is_null())) else {
        return Err(JsonApiError::missing_params(None));
    };
    let category: Category = name.parse().map_err(|e| JsonApiError::from_store(Op::Save, e))?;

    let written = state
        .store
        .save(category, Some(data))
        .await
        .map_err(|e| JsonApiError::from_store(Op::Save, e))?;
    let files: Vec<String> = written.iter().map(|c| c.as_str().to_string()).collect();
    info!(%category, ?files, "save-data ok");
    Ok(Json(ApiResponse::saved(MSG_SAVED, files)))
}

/// 加载全部分类（`/api/load-data` 未指定分类）
#[utoipa::path(
    get,
    path = "/api/load-data",
    tag = "data",
    responses(
        (status = 200, description = "Loaded every category, keyed by name"),
        (status = 500, description = "Read failed or stored file is not valid JSON")
    )
)]
pub async fn load_all(State(state): State<AppState>) -> Result<Json<ApiResponse>, JsonApiError> {
    load(&state, Category::default()).await
}

/// 加载指定分类
#[utoipa::path(
    get,
    path = "/api/load-data/{type}",
    tag = "data",
    params(("type" = String, Path, description = "users | games | products | servers | all")),
    responses(
        (status = 200, description = "Loaded"),
        (status = 400, description = "Invalid category"),
        (status = 500, description = "Read failed or stored file is not valid JSON")
    )
)]
pub async fn load_one(
    State(state): State<AppState>,
    category: Result<Path<String>, PathRejection>,
) -> Result<Json<ApiResponse>, JsonApiError> {
    // 无法解码的路径段（如 %FF）同样视为无效分类
    let Path(name) = category.map_err(|e| {
        warn!(err = %e, "load-data path rejected");
        JsonApiError::invalid_category(e.body_text())
    })?;
    let category: Category = name.parse().map_err(|e| JsonApiError::from_store(Op::Load, e))?;
    load(&state, category).await
}

async fn load(state: &AppState, category: Category) -> Result<Json<ApiResponse>, JsonApiError> {
    let data = state
        .store
        .load(category)
        .await
        .map_err(|e| JsonApiError::from_store(Op::Load, e))?;
    Ok(Json(ApiResponse::loaded(data)))
}
