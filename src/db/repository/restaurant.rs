//! Restaurant Repository

use std::sync::Arc;

use serde_json::{Map, Value, json};

use super::RepoResult;
use crate::db::models::Restaurant;
use crate::db::store::DocumentStore;

const RESTAURANTS_PATH: &str = "restaurants";

#[derive(Clone, Debug)]
pub struct RestaurantRepository {
    store: Arc<dyn DocumentStore>,
}

impl RestaurantRepository {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    fn path(id: &str) -> String {
        format!("{RESTAURANTS_PATH}/{id}")
    }

    fn decode(id: &str, doc: Value) -> RepoResult<Restaurant> {
        let mut restaurant: Restaurant = serde_json::from_value(doc)?;
        restaurant.id = Some(id.to_string());
        Ok(restaurant)
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Restaurant>> {
        let doc = self.store.get(&Self::path(id)).await?;
        doc.map(|doc| Self::decode(id, doc)).transpose()
    }

    /// 全量扫描 — 顺序由存储的稳定 key 序决定
    pub async fn find_all(&self) -> RepoResult<Vec<Restaurant>> {
        self.store
            .list(RESTAURANTS_PATH)
            .await?
            .into_iter()
            .map(|(id, doc)| Self::decode(&id, doc))
            .collect()
    }

    /// 追加写入，返回存储生成的 id
    pub async fn create(&self, restaurant: &Restaurant) -> RepoResult<String> {
        let doc = serde_json::to_value(restaurant)?;
        Ok(self.store.push(RESTAURANTS_PATH, doc).await?)
    }

    /// 浅合并补丁到既有记录
    pub async fn apply_patch(&self, id: &str, patch: Map<String, Value>) -> RepoResult<()> {
        Ok(self.store.update(&Self::path(id), patch).await?)
    }

    pub async fn remove(&self, id: &str) -> RepoResult<()> {
        Ok(self.store.delete(&Self::path(id)).await?)
    }

    /// 写入服务端所有的聚合字段 (评分账本专用)
    pub async fn write_aggregate(
        &self,
        id: &str,
        aggregate_rating: f64,
        rating_count: u64,
    ) -> RepoResult<()> {
        let mut patch = Map::new();
        patch.insert("aggregate_rating".into(), json!(aggregate_rating));
        patch.insert("rating_count".into(), json!(rating_count));
        self.apply_patch(id, patch).await
    }
}
