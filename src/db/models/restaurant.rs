//! Restaurant Model

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

/// 订阅档位
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubscriptionTier {
    #[default]
    Free,
    Paid,
}

/// Restaurant model
///
/// `aggregate_rating` / `rating_count` 是服务端所有的反范式化字段：
/// 始终等于该餐厅全部现存评分的算术均值 (四舍五入到 2 位) 和条数，
/// 由评分账本在每次评分写入后重算，目录调用方只读。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Restaurant {
    /// 存储分配的 push key；写入文档时不序列化，读取时从路径回填
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    /// 自由文本位置描述 (用于文本搜索)
    pub location: String,
    /// 纬度 ∈ [-90, 90]
    pub latitude: f64,
    /// 经度 ∈ [-180, 180]
    pub longitude: f64,
    /// 菜单: 菜名 → 价格 (≥ 0)
    #[serde(default)]
    pub menu: BTreeMap<String, f64>,
    #[serde(default)]
    pub services: BTreeSet<String>,
    #[serde(default)]
    pub cuisine: BTreeSet<String>,
    pub open_hours: String,
    pub close_hours: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub tier: SubscriptionTier,
    /// 由外部上传协作者持有的不透明 URL
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub aggregate_rating: f64,
    #[serde(default)]
    pub rating_count: u64,
}

/// 创建请求 — 不携带 id 和聚合字段，调用方多传的字段被忽略
#[derive(Debug, Clone, Deserialize)]
pub struct RestaurantCreate {
    pub name: String,
    pub location: String,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default)]
    pub menu: BTreeMap<String, f64>,
    #[serde(default)]
    pub services: BTreeSet<String>,
    #[serde(default)]
    pub cuisine: BTreeSet<String>,
    pub open_hours: String,
    pub close_hours: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub tier: SubscriptionTier,
    #[serde(default)]
    pub image_url: Option<String>,
}

/// 更新补丁 — 所有字段可选，缺省字段不触碰
///
/// 序列化时跳过 None，序列化结果可直接作为存储层浅合并补丁。
/// `deny_unknown_fields`: 补丁不得携带服务端所有的聚合字段
/// (aggregate_rating / rating_count)，未知字段一律拒绝而非静默覆盖。
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RestaurantUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub menu: Option<BTreeMap<String, f64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub services: Option<BTreeSet<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cuisine: Option<BTreeSet<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub open_hours: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub close_hours: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tier: Option<SubscriptionTier>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl Restaurant {
    /// 从创建请求构造完整记录，聚合字段取服务端默认值
    pub fn from_create(data: RestaurantCreate) -> Self {
        Self {
            id: None,
            name: data.name,
            location: data.location,
            latitude: data.latitude,
            longitude: data.longitude,
            menu: data.menu,
            services: data.services,
            cuisine: data.cuisine,
            open_hours: data.open_hours,
            close_hours: data.close_hours,
            description: data.description,
            tier: data.tier,
            image_url: data.image_url,
            aggregate_rating: 0.0,
            rating_count: 0,
        }
    }
}
