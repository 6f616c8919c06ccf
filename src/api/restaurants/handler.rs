//! Restaurant API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Serialize;

use crate::catalog::Catalog;
use crate::core::{AppResult, ServerState};
use crate::db::models::{Restaurant, RestaurantCreate, RestaurantUpdate};
use crate::ratings::RatingLedger;

#[derive(Serialize)]
pub struct CreateResponse {
    pub id: String,
}

#[derive(Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

/// POST /restaurants - 创建餐厅
pub async fn create(
    State(state): State<ServerState>,
    Json(body): Json<RestaurantCreate>,
) -> AppResult<Json<CreateResponse>> {
    let catalog = Catalog::new(state.store.clone());
    let id = catalog.create(body).await?;
    Ok(Json(CreateResponse { id }))
}

/// GET /restaurants - 获取所有餐厅
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Restaurant>>> {
    let catalog = Catalog::new(state.store.clone());
    Ok(Json(catalog.list_all().await?))
}

/// GET /restaurants/:id - 获取单个餐厅
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Restaurant>> {
    let catalog = Catalog::new(state.store.clone());
    Ok(Json(catalog.get(&id).await?))
}

/// PUT /restaurants/:id - 更新餐厅 (部分字段合并)
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(body): Json<RestaurantUpdate>,
) -> AppResult<Json<Restaurant>> {
    let catalog = Catalog::new(state.store.clone());
    Ok(Json(catalog.update(&id, body).await?))
}

/// DELETE /restaurants/:id - 删除餐厅并级联清理其评分
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<MessageResponse>> {
    let catalog = Catalog::new(state.store.clone());
    catalog.delete(&id).await?;

    let ledger = RatingLedger::new(state.store.clone());
    let purged = ledger.purge_for_restaurant(&id).await?;
    if purged > 0 {
        tracing::info!(restaurant_id = %id, purged, "cascade-deleted dependent ratings");
    }

    Ok(Json(MessageResponse { message: "Deleted" }))
}
