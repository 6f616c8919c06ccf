//! 餐厅目录 - 餐厅记录的规范形状与增删改查
//!
//! 目录拥有 Restaurant 的规范形状。聚合字段
//! (`aggregate_rating` / `rating_count`) 是服务端所有的：
//! 创建时固定为 0.0 / 0；创建请求不携带这两个字段 (多传被忽略)，
//! 更新补丁携带它们会在反序列化时被拒绝。

use std::sync::Arc;

use serde_json::{Map, Value};

use crate::core::{AppError, AppResult};
use crate::db::models::{Restaurant, RestaurantCreate, RestaurantUpdate};
use crate::db::repository::RestaurantRepository;
use crate::db::store::DocumentStore;
use crate::geo::Coordinate;
use crate::utils::validation::{
    MAX_COMMENT_LEN, MAX_LOCATION_LEN, MAX_NAME_LEN, MAX_URL_LEN, validate_menu,
    validate_optional_text, validate_required_text,
};

/// 餐厅目录服务
#[derive(Clone, Debug)]
pub struct Catalog {
    repo: RestaurantRepository,
}

impl Catalog {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            repo: RestaurantRepository::new(store),
        }
    }

    /// 创建餐厅，返回存储分配的 id
    ///
    /// 校验名称/位置非空、坐标范围、菜单价格非负。
    pub async fn create(&self, data: RestaurantCreate) -> AppResult<String> {
        validate_required_text(&data.name, "name", MAX_NAME_LEN)?;
        validate_required_text(&data.location, "location", MAX_LOCATION_LEN)?;
        validate_optional_text(&data.description, "description", MAX_COMMENT_LEN)?;
        validate_optional_text(&data.image_url, "image_url", MAX_URL_LEN)?;
        Coordinate::new(data.latitude, data.longitude)?;
        validate_menu(&data.menu)?;

        let restaurant = Restaurant::from_create(data);
        let id = self.repo.create(&restaurant).await?;
        tracing::info!(restaurant_id = %id, name = %restaurant.name, "restaurant created");
        Ok(id)
    }

    pub async fn get(&self, id: &str) -> AppResult<Restaurant> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Restaurant {id}")))
    }

    /// 合并补丁到既有记录并返回更新后的完整记录
    ///
    /// 补丁中的坐标与现存值组合后整体重新校验。
    pub async fn update(&self, id: &str, patch: RestaurantUpdate) -> AppResult<Restaurant> {
        let current = self.get(id).await?;

        if let Some(name) = &patch.name {
            validate_required_text(name, "name", MAX_NAME_LEN)?;
        }
        if let Some(location) = &patch.location {
            validate_required_text(location, "location", MAX_LOCATION_LEN)?;
        }
        validate_optional_text(&patch.description, "description", MAX_COMMENT_LEN)?;
        validate_optional_text(&patch.image_url, "image_url", MAX_URL_LEN)?;
        let latitude = patch.latitude.unwrap_or(current.latitude);
        let longitude = patch.longitude.unwrap_or(current.longitude);
        Coordinate::new(latitude, longitude)?;
        if let Some(menu) = &patch.menu {
            validate_menu(menu)?;
        }

        let fields = patch_fields(&patch)?;
        if !fields.is_empty() {
            self.repo.apply_patch(id, fields).await?;
        }
        self.get(id).await
    }

    /// 删除餐厅；id 不存在时返回 NotFound (非静默幂等)
    ///
    /// 依赖评分的级联清理由 API 层通过评分账本完成。
    pub async fn delete(&self, id: &str) -> AppResult<()> {
        self.get(id).await?;
        self.repo.remove(id).await?;
        tracing::info!(restaurant_id = %id, "restaurant deleted");
        Ok(())
    }

    /// 全量扫描，顺序为存储的稳定 key 序
    pub async fn list_all(&self) -> AppResult<Vec<Restaurant>> {
        Ok(self.repo.find_all().await?)
    }
}

/// 补丁序列化为存储层浅合并字段集 (None 字段已跳过)
fn patch_fields(patch: &RestaurantUpdate) -> AppResult<Map<String, Value>> {
    match serde_json::to_value(patch) {
        Ok(Value::Object(fields)) => Ok(fields),
        Ok(_) => Err(AppError::Internal(anyhow::anyhow!(
            "restaurant patch did not serialize to an object"
        ))),
        Err(e) => Err(AppError::Internal(anyhow::Error::new(e))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::MemoryStore;
    use crate::db::models::SubscriptionTier;

    fn sample_restaurant() -> RestaurantCreate {
        RestaurantCreate {
            name: "Great Burger".into(),
            location: "Downtown Manhattan, NYC".into(),
            latitude: 40.7128,
            longitude: -74.0060,
            menu: [("Cheeseburger".to_string(), 9.5)].into(),
            services: ["delivery".to_string()].into(),
            cuisine: ["American".to_string()].into(),
            open_hours: "09:00".into(),
            close_hours: "22:00".into(),
            description: None,
            tier: SubscriptionTier::Free,
            image_url: None,
        }
    }

    #[tokio::test]
    async fn create_assigns_server_owned_defaults() {
        let catalog = Catalog::new(MemoryStore::shared());
        let id = catalog.create(sample_restaurant()).await.unwrap();

        let restaurant = catalog.get(&id).await.unwrap();
        assert_eq!(restaurant.id.as_deref(), Some(id.as_str()));
        assert_eq!(restaurant.name, "Great Burger");
        assert_eq!(restaurant.aggregate_rating, 0.0);
        assert_eq!(restaurant.rating_count, 0);
        assert_eq!(restaurant.tier, SubscriptionTier::Free);
    }

    #[tokio::test]
    async fn create_rejects_invalid_input() {
        let catalog = Catalog::new(MemoryStore::shared());

        let mut data = sample_restaurant();
        data.name = "  ".into();
        assert!(matches!(
            catalog.create(data).await.unwrap_err(),
            AppError::Validation(_)
        ));

        let mut data = sample_restaurant();
        data.latitude = 91.0;
        assert!(matches!(
            catalog.create(data).await.unwrap_err(),
            AppError::Validation(_)
        ));

        let mut data = sample_restaurant();
        data.menu.insert("Free Lunch".into(), -1.0);
        assert!(matches!(
            catalog.create(data).await.unwrap_err(),
            AppError::Validation(_)
        ));
    }

    #[tokio::test]
    async fn get_missing_restaurant_fails() {
        let catalog = Catalog::new(MemoryStore::shared());
        assert!(matches!(
            catalog.get("nope").await.unwrap_err(),
            AppError::NotFound(_)
        ));
    }

    #[tokio::test]
    async fn update_merges_only_present_fields() {
        let catalog = Catalog::new(MemoryStore::shared());
        let id = catalog.create(sample_restaurant()).await.unwrap();

        let patch = RestaurantUpdate {
            name: Some("Greater Burger".into()),
            ..Default::default()
        };
        let updated = catalog.update(&id, patch).await.unwrap();

        assert_eq!(updated.name, "Greater Burger");
        assert_eq!(updated.location, "Downtown Manhattan, NYC");
        assert_eq!(updated.latitude, 40.7128);
    }

    #[tokio::test]
    async fn update_revalidates_coordinates() {
        let catalog = Catalog::new(MemoryStore::shared());
        let id = catalog.create(sample_restaurant()).await.unwrap();

        let patch = RestaurantUpdate {
            longitude: Some(-181.0),
            ..Default::default()
        };
        assert!(matches!(
            catalog.update(&id, patch).await.unwrap_err(),
            AppError::Validation(_)
        ));
    }

    #[tokio::test]
    async fn update_missing_restaurant_fails() {
        let catalog = Catalog::new(MemoryStore::shared());
        let err = catalog
            .update("nope", RestaurantUpdate::default())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn delete_removes_record() {
        let catalog = Catalog::new(MemoryStore::shared());
        let id = catalog.create(sample_restaurant()).await.unwrap();

        catalog.delete(&id).await.unwrap();
        assert!(matches!(
            catalog.get(&id).await.unwrap_err(),
            AppError::NotFound(_)
        ));
        assert!(matches!(
            catalog.delete(&id).await.unwrap_err(),
            AppError::NotFound(_)
        ));
    }

    #[tokio::test]
    async fn list_all_on_empty_catalog() {
        let catalog = Catalog::new(MemoryStore::shared());
        assert!(catalog.list_all().await.unwrap().is_empty());
    }
}
