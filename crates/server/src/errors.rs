use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use common::types::ApiResponse;
use service::errors::StoreError;
use thiserror::Error;
use tracing::error;

pub const MSG_MISSING_PARAMS: &str = "缺少必要参数";
pub const MSG_INVALID_CATEGORY: &str = "无效的数据类型";
pub const MSG_INVALID_JSON: &str = "无效的JSON格式";
pub const MSG_SAVE_FAILED: &str = "数据保存失败";
pub const MSG_LOAD_FAILED: &str = "数据加载失败";

/// Data API operation, used to pick the failure message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    Save,
    Load,
}

/// JSON error body `{success: false, message, error?}` with a status code.
#[derive(Debug)]
pub struct JsonApiError {
    pub status: StatusCode,
    pub message: String,
    pub detail: Option<String>,
}

impl JsonApiError {
    pub fn new(status: StatusCode, message: &str, detail: Option<String>) -> Self {
        Self { status, message: message.to_string(), detail }
    }

    pub fn missing_params(detail: Option<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, MSG_MISSING_PARAMS, detail)
    }

    pub fn invalid_category(detail: String) -> Self {
        Self::new(StatusCode::BAD_REQUEST, MSG_INVALID_CATEGORY, Some(detail))
    }

    pub fn invalid_json(detail: String) -> Self {
        Self::new(StatusCode::BAD_REQUEST, MSG_INVALID_JSON, Some(detail))
    }

    /// Map a store failure: bad input is 400, storage failures are 500 with the cause.
    pub fn from_store(op: Op, e: StoreError) -> Self {
        match e {
            StoreError::MissingParameter(_) => Self::missing_params(Some(e.to_string())),
            StoreError::InvalidCategory(_) => Self::invalid_category(e.to_string()),
            StoreError::Io { .. } | StoreError::MalformedStoredData { .. } => {
                let msg = match op {
                    Op::Save => MSG_SAVE_FAILED,
                    Op::Load => MSG_LOAD_FAILED,
                };
                error!(?op, err = %e, "data api storage failure");
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, msg, Some(e.to_string()))
            }
        }
    }
}

impl IntoResponse for JsonApiError {
    fn into_response(self) -> Response {
        let body = ApiResponse::failed(self.message, self.detail);
        (self.status, Json(body)).into_response()
    }
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("runtime check failed: {0}")]
    Runtime(String),
}
