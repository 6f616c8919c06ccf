//! API 路由模块
//!
//! # 结构
//!
//! - [`health`] - 健康检查
//! - [`restaurants`] - 餐厅目录接口
//! - [`ratings`] - 评分接口
//! - [`search`] - 搜索接口

pub mod health;
pub mod ratings;
pub mod restaurants;
pub mod search;
