//! 评分账本 - 追加式评分事件与聚合重算
//!
//! 每次评分写入/更新/删除后同步重算所属餐厅的
//! `aggregate_rating` / `rating_count`：全量重扫该餐厅的评分集，
//! `avg = round(sum / count, 2)`，无评分时重置为 0.0 / 0。
//!
//! # 一致性
//!
//! 重算不是增量的。存储只提供 per-key last-write-wins，核心层不加锁，
//! 两个并发 submit 可能在 "读全部评分" 和 "写聚合" 之间交错，
//! 产生短暂的 lost-update 窗口。需要强一致的调用方应在外部
//! 加事务/CAS 层。
//!
//! 评分写入成功后重算失败时返回 [`AppError::AggregateStale`]，
//! 与写入失败本身区分。

use std::sync::Arc;

use serde_json::{Map, json};

use crate::core::{AppError, AppResult};
use crate::db::models::{Rating, RatingPatch, RatingSubmit};
use crate::db::repository::{RatingRepository, RepoResult, RestaurantRepository};
use crate::db::store::DocumentStore;
use crate::utils::now_ts;
use crate::utils::validation::{
    MAX_COMMENT_LEN, MAX_NAME_LEN, validate_optional_text, validate_required_text,
};

/// 分数下界 (含)
pub const MIN_SCORE: f64 = 1.0;
/// 分数上界 (含)
pub const MAX_SCORE: f64 = 5.0;

/// 均分四舍五入到 2 位小数
fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn validate_score(score: f64) -> AppResult<()> {
    if !score.is_finite() || !(MIN_SCORE..=MAX_SCORE).contains(&score) {
        return Err(AppError::validation(format!(
            "score must be between {MIN_SCORE} and {MAX_SCORE}, got {score}"
        )));
    }
    Ok(())
}

/// 评分账本服务
#[derive(Clone, Debug)]
pub struct RatingLedger {
    ratings: RatingRepository,
    restaurants: RestaurantRepository,
}

impl RatingLedger {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            ratings: RatingRepository::new(store.clone()),
            restaurants: RestaurantRepository::new(store),
        }
    }

    /// 提交评分，返回 (rating_id, 已盖章的完整记录)
    ///
    /// 分数越界 → InvalidInput；餐厅不存在 → NotFound。
    pub async fn submit(
        &self,
        restaurant_id: &str,
        submission: RatingSubmit,
    ) -> AppResult<(String, Rating)> {
        validate_score(submission.score)?;
        validate_required_text(&submission.user_id, "user_id", MAX_NAME_LEN)?;
        validate_optional_text(&submission.comment, "comment", MAX_COMMENT_LEN)?;

        // 提交时餐厅必须存在
        self.restaurants
            .find_by_id(restaurant_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Restaurant {restaurant_id}")))?;

        let mut rating = Rating {
            id: None,
            restaurant_id: restaurant_id.to_string(),
            user_id: submission.user_id,
            score: submission.score,
            comment: submission.comment,
            timestamp: now_ts(),
        };
        let id = self.ratings.create(&rating).await?;
        rating.id = Some(id.clone());
        tracing::info!(rating_id = %id, restaurant_id = %restaurant_id, "rating submitted");

        self.recompute_aggregate(restaurant_id)
            .await
            .map_err(|e| AppError::aggregate_stale(&id, e.to_string()))?;

        Ok((id, rating))
    }

    /// 更新评分: 重新校验分数，重新盖章 timestamp，触发聚合重算
    pub async fn update(&self, rating_id: &str, patch: RatingPatch) -> AppResult<Rating> {
        validate_score(patch.score)?;
        validate_optional_text(&patch.comment, "comment", MAX_COMMENT_LEN)?;

        let existing = self
            .ratings
            .find_by_id(rating_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Rating {rating_id}")))?;

        let mut fields = Map::new();
        fields.insert("score".into(), json!(patch.score));
        if let Some(comment) = &patch.comment {
            fields.insert("comment".into(), json!(comment));
        }
        fields.insert("timestamp".into(), json!(now_ts()));
        self.ratings.apply_patch(rating_id, fields).await?;

        self.recompute_aggregate(&existing.restaurant_id)
            .await
            .map_err(|e| AppError::aggregate_stale(rating_id, e.to_string()))?;

        self.ratings
            .find_by_id(rating_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Rating {rating_id}")))
    }

    /// 删除评分并为原餐厅触发聚合重算
    pub async fn delete(&self, rating_id: &str) -> AppResult<()> {
        let existing = self
            .ratings
            .find_by_id(rating_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Rating {rating_id}")))?;

        self.ratings.remove(rating_id).await?;
        tracing::info!(rating_id = %rating_id, "rating deleted");

        self.recompute_aggregate(&existing.restaurant_id)
            .await
            .map_err(|e| AppError::aggregate_stale(rating_id, e.to_string()))?;
        Ok(())
    }

    /// 某餐厅的全部评分，按 timestamp 降序 (最新在前)
    ///
    /// 排序是对外契约：客户端展示 "最新评论在前"。
    /// 餐厅不存在 → NotFound。
    pub async fn list_for_restaurant(&self, restaurant_id: &str) -> AppResult<Vec<Rating>> {
        self.restaurants
            .find_by_id(restaurant_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Restaurant {restaurant_id}")))?;

        let mut ratings = self.ratings.find_by_restaurant(restaurant_id).await?;
        ratings.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        Ok(ratings)
    }

    /// 某用户提交的全部评分，按 timestamp 降序
    pub async fn list_for_user(&self, user_id: &str) -> AppResult<Vec<Rating>> {
        let mut ratings = self.ratings.find_by_user(user_id).await?;
        ratings.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        Ok(ratings)
    }

    /// 级联清理: 删除某餐厅的全部评分，返回清理条数
    ///
    /// 餐厅删除后调用，不检查餐厅存在性，不触发聚合重算。
    pub async fn purge_for_restaurant(&self, restaurant_id: &str) -> AppResult<usize> {
        let ratings = self.ratings.find_by_restaurant(restaurant_id).await?;
        for rating in &ratings {
            if let Some(id) = &rating.id {
                self.ratings.remove(id).await?;
            }
        }
        Ok(ratings.len())
    }

    /// 全量重扫该餐厅评分集并写回聚合字段
    async fn recompute_aggregate(&self, restaurant_id: &str) -> RepoResult<()> {
        let ratings = self.ratings.find_by_restaurant(restaurant_id).await?;

        let (avg, count) = if ratings.is_empty() {
            (0.0, 0)
        } else {
            let sum: f64 = ratings.iter().map(|r| r.score).sum();
            (round2(sum / ratings.len() as f64), ratings.len() as u64)
        };

        self.restaurants
            .write_aggregate(restaurant_id, avg, count)
            .await
    }
}
