//! 数据库层 - 文档存储端口、模型与仓储
//!
//! # 结构
//!
//! - [`store`] - [`DocumentStore`] 端口与内存引擎
//! - [`models`] - Restaurant / Rating 文档模型
//! - [`repository`] - 类型化仓储 (路径拼接 + 序列化)

pub mod models;
pub mod repository;
pub mod store;

pub use store::{DocumentStore, MemoryStore, StoreError, StoreResult};
