//! Dinemap - 餐厅发现与评分服务
//!
//! # 架构概述
//!
//! 本服务聚合餐厅信息，提供地理位置检索和用户评分聚合：
//!
//! - **文档存储** (`db`): 外部层级式文档存储端口 + 内存引擎
//! - **地理引擎** (`geo`): haversine 大圆距离计算与半径过滤
//! - **餐厅目录** (`catalog`): 餐厅记录的增删改查
//! - **评分账本** (`ratings`): 追加式评分 + 聚合均分重算
//! - **搜索协调器** (`search`): 文本/菜系/地理/评分组合查询
//! - **HTTP API** (`api`): RESTful API 接口
//!
//! # 模块结构
//!
//! ```text
//! src/
//! ├── core/          # 配置、状态、服务器、错误
//! ├── db/            # 文档存储端口、模型、仓储
//! ├── geo/           # 距离引擎
//! ├── catalog/       # 餐厅目录
//! ├── ratings/       # 评分账本
//! ├── search/        # 搜索协调器
//! ├── api/           # HTTP 路由和处理器
//! └── utils/         # 日志、时间、校验工具
//! ```

pub mod api;
pub mod catalog;
pub mod core;
pub mod db;
pub mod geo;
pub mod ratings;
pub mod search;
pub mod utils;

// Re-export 公共类型
pub use catalog::Catalog;
pub use crate::core::{AppError, AppResult, Config, Server, ServerState};
pub use db::{DocumentStore, MemoryStore};
pub use ratings::RatingLedger;
pub use search::{SearchQuery, SearchService};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};
