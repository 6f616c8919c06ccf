use std::sync::Arc;

use crate::core::Config;
use crate::db::{DocumentStore, MemoryStore};

/// 服务器状态 - 持有配置和文档存储句柄
///
/// ServerState 是服务的核心数据结构。存储句柄在进程启动时初始化一次，
/// 之后只读，注入到每个组件中 — 不使用隐藏的全局变量。
/// 使用 Arc 实现浅拷贝，所有权成本极低。
///
/// # 字段
///
/// | 字段 | 类型 | 说明 |
/// |------|------|------|
/// | config | Config | 配置项 (不可变) |
/// | store | Arc<dyn DocumentStore> | 文档存储句柄 |
///
/// # 使用示例
///
/// ```ignore
/// let catalog = Catalog::new(state.store.clone());
/// ```
#[derive(Clone, Debug)]
pub struct ServerState {
    /// 服务器配置
    pub config: Config,
    /// 文档存储句柄 (外部协作者的端口)
    pub store: Arc<dyn DocumentStore>,
}

impl ServerState {
    /// 创建服务器状态 (注入自定义存储实现)
    pub fn new(config: Config, store: Arc<dyn DocumentStore>) -> Self {
        Self { config, store }
    }

    /// 初始化服务器状态
    ///
    /// 使用内存存储引擎。持久化属于外部文档存储协作者，
    /// 核心层只依赖 [`DocumentStore`] 端口。
    pub fn initialize(config: &Config) -> Self {
        Self {
            config: config.clone(),
            store: MemoryStore::shared(),
        }
    }
}
