//! Rating Model

use serde::{Deserialize, Serialize};

/// Rating model
///
/// 追加式评分事件。`timestamp` 由服务端在写入/更新时盖章 (Unix 秒)。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Rating {
    /// 存储分配的 push key
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub restaurant_id: String,
    pub user_id: String,
    /// 分数，闭区间 [1.0, 5.0]
    pub score: f64,
    #[serde(default)]
    pub comment: Option<String>,
    pub timestamp: i64,
}

/// 评分提交请求 — restaurant_id 来自路径，timestamp 服务端生成
#[derive(Debug, Clone, Deserialize)]
pub struct RatingSubmit {
    pub user_id: String,
    pub score: f64,
    #[serde(default)]
    pub comment: Option<String>,
}

/// 评分更新请求 — 分数重新校验，timestamp 重新盖章
#[derive(Debug, Clone, Deserialize)]
pub struct RatingPatch {
    pub score: f64,
    #[serde(default)]
    pub comment: Option<String>,
}
