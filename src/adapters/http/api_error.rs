use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use error_stack::{FrameKind, Report};
use serde_json::json;

pub const LOGIN_FAILED: &str = "帳號或密碼錯誤";
pub const MISSING_TOKEN: &str = "未授權：請提供 token";
pub const INVALID_TOKEN: &str = "token 無效或已過期";
pub const LIST_FAILED: &str = "無法讀取專案資料";
pub const SEARCH_FAILED: &str = "無法查詢資料";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// 401 with a fixed message only.
    Unauthorized(&'static str),
    BadRequest(String),
    /// 500 with a fixed message plus the underlying failure.
    Internal { message: &'static str, error: String },
}

impl ApiError {
    pub fn internal<C>(message: &'static str, report: &Report<C>) -> Self {
        ApiError::Internal {
            message,
            error: root_cause(report),
        }
    }
}

/// Message of the innermost context of `report`, i.e. the error that started it.
pub fn root_cause<C>(report: &Report<C>) -> String {
    report
        .frames()
        .filter_map(|frame| match frame.kind() {
            FrameKind::Context(context) => Some(context.to_string()),
            _ => None,
        })
        .last()
        .unwrap_or_else(|| report.to_string())
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Unauthorized(message) => {
                (StatusCode::UNAUTHORIZED, Json(json!({ "message": message }))).into_response()
            }
            ApiError::BadRequest(message) => {
                (StatusCode::BAD_REQUEST, Json(json!({ "message": message }))).into_response()
            }
            ApiError::Internal { message, error } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "message": message, "error": error })),
            )
                .into_response(),
        }
    }
}
