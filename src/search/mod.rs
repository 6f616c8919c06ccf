//! 搜索协调器 - 文本/菜系/地理/评分组合查询管线
//!
//! # 管线 (按序)
//!
//! 1. 从目录全量加载餐厅
//! 2. 文本过滤: 名称或位置包含查询串 (大小写不敏感子串匹配，不分词)
//! 3. 菜系过滤: cuisine 集合成员判定 (按存储原样，大小写敏感)
//! 4. 地理过滤: 半径内保留 (默认 5.0 km)，附带计算出的 distance_km
//! 5. 评分过滤: 目录上的 aggregate_rating 低于阈值的丢弃 (不从原始评分重算)
//! 6. 排序: 有中心点时按 distance_km 升序；否则保持目录稳定顺序
//!
//! 无匹配或目录为空时返回空序列，不报错。

use std::cmp::Ordering;
use std::sync::Arc;

use serde::Serialize;

use crate::catalog::Catalog;
use crate::core::{AppError, AppResult};
use crate::db::models::Restaurant;
use crate::db::store::DocumentStore;
use crate::geo::{self, Coordinate};

/// 未指定 radius_km 时的默认搜索半径 (km)
pub const DEFAULT_RADIUS_KM: f64 = 5.0;

/// 搜索查询 - 显式命名的可选过滤条件
///
/// 所有字段在分发前已校验 (坐标范围、半径非负)。
#[derive(Debug, Clone, Default)]
pub struct SearchQuery {
    /// 自由文本 (名称或位置子串)
    pub text: Option<String>,
    /// 菜系精确成员匹配
    pub cuisine: Option<String>,
    /// 地理过滤中心点
    pub center: Option<Coordinate>,
    /// 搜索半径 (km)，仅在有中心点时生效
    pub radius_km: Option<f64>,
    /// 聚合评分下限
    pub min_rating: Option<f64>,
}

impl SearchQuery {
    /// 校验查询参数组合
    pub fn validate(&self) -> AppResult<()> {
        if let Some(radius) = self.radius_km
            && (!radius.is_finite() || radius < 0.0)
        {
            return Err(AppError::validation(format!(
                "radius_km must be >= 0, got {radius}"
            )));
        }
        if let Some(min) = self.min_rating
            && !min.is_finite()
        {
            return Err(AppError::validation("min_rating must be a finite number"));
        }
        Ok(())
    }
}

/// 搜索结果: 餐厅记录 + 可选的计算距离
#[derive(Debug, Clone, Serialize)]
pub struct EnrichedRestaurant {
    #[serde(flatten)]
    pub restaurant: Restaurant,
    /// 距中心点的大圆距离 (km)，仅在指定中心点时存在
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance_km: Option<f64>,
}

/// 搜索协调器
#[derive(Clone, Debug)]
pub struct SearchService {
    catalog: Catalog,
}

impl SearchService {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            catalog: Catalog::new(store),
        }
    }

    pub async fn search(&self, query: SearchQuery) -> AppResult<Vec<EnrichedRestaurant>> {
        query.validate()?;

        let restaurants = self.catalog.list_all().await?;
        let needle = query
            .text
            .as_deref()
            .map(str::to_lowercase)
            .filter(|t| !t.is_empty());
        let radius_km = query.radius_km.unwrap_or(DEFAULT_RADIUS_KM);

        let mut results = Vec::new();
        for restaurant in restaurants {
            if let Some(needle) = &needle
                && !restaurant.name.to_lowercase().contains(needle)
                && !restaurant.location.to_lowercase().contains(needle)
            {
                continue;
            }

            if let Some(cuisine) = &query.cuisine
                && !restaurant.cuisine.contains(cuisine)
            {
                continue;
            }

            let mut distance_km = None;
            if let Some(center) = query.center {
                // 目录记录的坐标在写入时已校验过范围
                let point = Coordinate {
                    latitude: restaurant.latitude,
                    longitude: restaurant.longitude,
                };
                let d = geo::distance_km(center, point);
                if d > radius_km {
                    continue;
                }
                distance_km = Some(d);
            }

            if let Some(min) = query.min_rating
                && restaurant.aggregate_rating < min
            {
                continue;
            }

            results.push(EnrichedRestaurant {
                restaurant,
                distance_km,
            });
        }

        if query.center.is_some() {
            results.sort_by(|a, b| {
                a.distance_km
                    .partial_cmp(&b.distance_km)
                    .unwrap_or(Ordering::Equal)
            });
        }

        Ok(results)
    }
}
