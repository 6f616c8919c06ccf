//! Rating Repository

use std::sync::Arc;

use serde_json::{Map, Value, json};

use super::RepoResult;
use crate::db::models::Rating;
use crate::db::store::DocumentStore;

const RATINGS_PATH: &str = "ratings";

#[derive(Clone, Debug)]
pub struct RatingRepository {
    store: Arc<dyn DocumentStore>,
}

impl RatingRepository {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    fn path(id: &str) -> String {
        format!("{RATINGS_PATH}/{id}")
    }

    fn decode(id: &str, doc: Value) -> RepoResult<Rating> {
        let mut rating: Rating = serde_json::from_value(doc)?;
        rating.id = Some(id.to_string());
        Ok(rating)
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Rating>> {
        let doc = self.store.get(&Self::path(id)).await?;
        doc.map(|doc| Self::decode(id, doc)).transpose()
    }

    /// 按 restaurant_id 等值扫描 (线性，无二级索引)
    pub async fn find_by_restaurant(&self, restaurant_id: &str) -> RepoResult<Vec<Rating>> {
        self.store
            .scan_eq(RATINGS_PATH, "restaurant_id", &json!(restaurant_id))
            .await?
            .into_iter()
            .map(|(id, doc)| Self::decode(&id, doc))
            .collect()
    }

    /// 按 user_id 等值扫描
    pub async fn find_by_user(&self, user_id: &str) -> RepoResult<Vec<Rating>> {
        self.store
            .scan_eq(RATINGS_PATH, "user_id", &json!(user_id))
            .await?
            .into_iter()
            .map(|(id, doc)| Self::decode(&id, doc))
            .collect()
    }

    /// 追加写入，返回存储生成的 id
    pub async fn create(&self, rating: &Rating) -> RepoResult<String> {
        let doc = serde_json::to_value(rating)?;
        Ok(self.store.push(RATINGS_PATH, doc).await?)
    }

    pub async fn apply_patch(&self, id: &str, patch: Map<String, Value>) -> RepoResult<()> {
        Ok(self.store.update(&Self::path(id), patch).await?)
    }

    pub async fn remove(&self, id: &str) -> RepoResult<()> {
        Ok(self.store.delete(&Self::path(id)).await?)
    }
}
