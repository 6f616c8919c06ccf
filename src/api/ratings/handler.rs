//! Rating API Handlers

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Serialize;

use crate::core::{AppResult, ServerState};
use crate::db::models::{Rating, RatingPatch, RatingSubmit};
use crate::ratings::RatingLedger;

#[derive(Serialize)]
pub struct SubmitResponse {
    pub rating_id: String,
    pub rating: Rating,
}

#[derive(Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

/// POST /ratings/:restaurant_id - 提交评分 (201)
pub async fn submit(
    State(state): State<ServerState>,
    Path(restaurant_id): Path<String>,
    Json(body): Json<RatingSubmit>,
) -> AppResult<(StatusCode, Json<SubmitResponse>)> {
    let ledger = RatingLedger::new(state.store.clone());
    let (rating_id, rating) = ledger.submit(&restaurant_id, body).await?;
    Ok((StatusCode::CREATED, Json(SubmitResponse { rating_id, rating })))
}

/// GET /ratings/:restaurant_id - 某餐厅的评分，最新在前
pub async fn list_for_restaurant(
    State(state): State<ServerState>,
    Path(restaurant_id): Path<String>,
) -> AppResult<Json<Vec<Rating>>> {
    let ledger = RatingLedger::new(state.store.clone());
    Ok(Json(ledger.list_for_restaurant(&restaurant_id).await?))
}

/// GET /ratings/user/:user_id - 某用户提交的评分，最新在前
pub async fn list_for_user(
    State(state): State<ServerState>,
    Path(user_id): Path<String>,
) -> AppResult<Json<Vec<Rating>>> {
    let ledger = RatingLedger::new(state.store.clone());
    Ok(Json(ledger.list_for_user(&user_id).await?))
}

/// PUT /ratings/:rating_id - 更新评分 (重新校验 + 重新盖章)
pub async fn update(
    State(state): State<ServerState>,
    Path(rating_id): Path<String>,
    Json(body): Json<RatingPatch>,
) -> AppResult<Json<Rating>> {
    let ledger = RatingLedger::new(state.store.clone());
    Ok(Json(ledger.update(&rating_id, body).await?))
}

/// DELETE /ratings/:rating_id - 删除评分
pub async fn delete(
    State(state): State<ServerState>,
    Path(rating_id): Path<String>,
) -> AppResult<Json<MessageResponse>> {
    let ledger = RatingLedger::new(state.store.clone());
    ledger.delete(&rating_id).await?;
    Ok(Json(MessageResponse { message: "Deleted" }))
}
