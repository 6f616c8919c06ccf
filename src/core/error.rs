//! 统一错误处理
//!
//! 提供应用级错误类型和响应结构。
//!
//! # 错误分类
//!
//! | 变体 | HTTP | kind |
//! |------|------|------|
//! | NotFound | 404 | not_found |
//! | Validation | 400 | invalid_input |
//! | Conflict | 409 | conflict |
//! | Upstream | 502 | upstream_unavailable |
//! | AggregateStale | 500 | aggregate_stale |
//! | Internal | 500 | internal_error |

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::db::repository::RepoError;
use crate::db::store::StoreError;

/// 应用错误枚举
#[derive(Error, Debug)]
pub enum AppError {
    /// 餐厅或评分不存在 (404)
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// 输入校验失败: 分数越界、坐标非法、必填字段为空 (400)
    #[error("Invalid input: {0}")]
    Validation(String),

    /// 预留给乐观并发检查，目前未使用 (409)
    #[error("Conflict: {0}")]
    Conflict(String),

    /// 文档存储 I/O 失败 (502)
    #[error("Document store unavailable: {0}")]
    Upstream(String),

    /// 评分已写入但聚合重算失败 — 与写入失败本身区分，
    /// 调用方据此识别 "评分已保存但均分过期"
    #[error("Rating {rating_id} saved but aggregate recomputation failed: {detail}")]
    AggregateStale { rating_id: String, detail: String },

    /// 内部服务器错误 (500)
    #[error("Internal server error")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::NotFound(resource.into())
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict(message.into())
    }

    pub fn upstream(message: impl Into<String>) -> Self {
        Self::Upstream(message.into())
    }

    pub fn aggregate_stale(rating_id: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::AggregateStale {
            rating_id: rating_id.into(),
            detail: detail.into(),
        }
    }
}

/// 结构化错误响应体
#[derive(Serialize)]
struct ErrorResponse {
    /// 机器可读错误类别
    error: String,
    /// 人类可读错误描述
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, kind, message) = match &self {
            AppError::NotFound(_) => (StatusCode::NOT_FOUND, "not_found", self.to_string()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "invalid_input", msg.clone()),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, "conflict", msg.clone()),
            AppError::Upstream(msg) => {
                tracing::error!(error = %msg, "document store unavailable");
                (
                    StatusCode::BAD_GATEWAY,
                    "upstream_unavailable",
                    "Document store unavailable".to_string(),
                )
            }
            AppError::AggregateStale { rating_id, detail } => {
                tracing::error!(
                    rating_id = %rating_id,
                    error = %detail,
                    "aggregate recomputation failed after successful write"
                );
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "aggregate_stale",
                    self.to_string(),
                )
            }
            AppError::Internal(err) => {
                // 记录内部错误但不暴露详细信息
                tracing::error!(error = ?err, "Internal server error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "An internal error occurred".to_string(),
                )
            }
        };

        let body = ErrorResponse {
            error: kind.to_string(),
            message,
            details: None,
        };

        (status, Json(body)).into_response()
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Missing(path) => AppError::not_found(path),
            other => AppError::upstream(other.to_string()),
        }
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::Store(e) => e.into(),
            RepoError::Decode(e) => AppError::Internal(anyhow::Error::new(e)),
        }
    }
}

/// 处理器的 Result 类型别名
pub type AppResult<T> = Result<T, AppError>;
