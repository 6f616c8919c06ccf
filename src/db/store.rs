//! 文档存储端口
//!
//! 外部协作者是一个层级式 key-path 文档存储：按路径点读/写/更新/删除，
//! 追加写入由存储生成唯一 push key，查询只有按字段等值的线性扫描
//! (不假设二级索引)。
//!
//! 路径命名空间是唯一的共享可变资源 (`restaurants/*`, `ratings/*`)。
//! 存储提供 per-key last-write-wins 语义，核心层不加锁 — 并发写入的
//! 弱一致性窗口是有意接受的取舍，见 [`crate::ratings`]。

use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;
use serde_json::{Map, Value};
use thiserror::Error;
use uuid::Uuid;

/// 存储层错误
#[derive(Debug, Error)]
pub enum StoreError {
    /// 存储不可达 (I/O 失败)
    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// update 的目标文档不存在
    #[error("document not found: {0}")]
    Missing(String),

    /// 文档形状非法 (非对象等)
    #[error("serialization error: {0}")]
    Serialization(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// 文档存储端口
///
/// 所有操作在 I/O 边界挂起；实现必须是 `Send + Sync`，
/// 通过 `Arc<dyn DocumentStore>` 在请求间共享。
#[async_trait]
pub trait DocumentStore: Send + Sync + std::fmt::Debug + 'static {
    /// 按路径点读，不存在返回 None
    async fn get(&self, path: &str) -> StoreResult<Option<Value>>;

    /// 整体写入 (覆盖)
    async fn set(&self, path: &str, doc: Value) -> StoreResult<()>;

    /// 浅合并字段到既有文档；文档不存在返回 [`StoreError::Missing`]
    async fn update(&self, path: &str, patch: Map<String, Value>) -> StoreResult<()>;

    /// 删除路径 (不存在时静默成功)
    async fn delete(&self, path: &str) -> StoreResult<()>;

    /// 追加写入，返回存储生成的唯一 push key
    async fn push(&self, parent: &str, doc: Value) -> StoreResult<String>;

    /// 列出 parent 下所有子文档 (key, doc)
    async fn list(&self, parent: &str) -> StoreResult<Vec<(String, Value)>>;

    /// 按字段等值线性扫描 parent 下的子文档
    async fn scan_eq(
        &self,
        parent: &str,
        field: &str,
        expected: &Value,
    ) -> StoreResult<Vec<(String, Value)>>;
}

/// 内存存储引擎
///
/// 使用 DashMap 实现无锁并发访问，key 为完整路径 `parent/key`。
/// push key 为 UUID v4。用于测试和单机开发部署；
/// 生产环境由外部文档存储适配器替换。
#[derive(Debug, Default)]
pub struct MemoryStore {
    docs: DashMap<String, Value>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            docs: DashMap::new(),
        }
    }

    /// 创建共享句柄
    pub fn shared() -> Arc<dyn DocumentStore> {
        Arc::new(Self::new())
    }

    /// 收集 parent 前缀下的所有 (key, doc)
    ///
    /// 返回按 key 升序排列 — 这是"无中心点搜索时的稳定目录顺序"契约
    fn collect_prefix(&self, parent: &str) -> Vec<(String, Value)> {
        let prefix = format!("{parent}/");
        let mut out: Vec<(String, Value)> = self
            .docs
            .iter()
            .filter(|entry| entry.key().starts_with(&prefix))
            .map(|entry| (entry.key()[prefix.len()..].to_string(), entry.value().clone()))
            .collect();
        out.sort_by(|a, b| a.0.cmp(&b.0));
        out
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn get(&self, path: &str) -> StoreResult<Option<Value>> {
        Ok(self.docs.get(path).map(|doc| doc.value().clone()))
    }

    async fn set(&self, path: &str, doc: Value) -> StoreResult<()> {
        self.docs.insert(path.to_string(), doc);
        Ok(())
    }

    async fn update(&self, path: &str, patch: Map<String, Value>) -> StoreResult<()> {
        let mut entry = self
            .docs
            .get_mut(path)
            .ok_or_else(|| StoreError::Missing(path.to_string()))?;

        match entry.value_mut() {
            Value::Object(fields) => {
                for (key, value) in patch {
                    fields.insert(key, value);
                }
                Ok(())
            }
            _ => Err(StoreError::Serialization(format!(
                "document at {path} is not an object"
            ))),
        }
    }

    async fn delete(&self, path: &str) -> StoreResult<()> {
        self.docs.remove(path);
        Ok(())
    }

    async fn push(&self, parent: &str, doc: Value) -> StoreResult<String> {
        let key = Uuid::new_v4().to_string();
        self.docs.insert(format!("{parent}/{key}"), doc);
        Ok(key)
    }

    async fn list(&self, parent: &str) -> StoreResult<Vec<(String, Value)>> {
        Ok(self.collect_prefix(parent))
    }

    async fn scan_eq(
        &self,
        parent: &str,
        field: &str,
        expected: &Value,
    ) -> StoreResult<Vec<(String, Value)>> {
        Ok(self
            .collect_prefix(parent)
            .into_iter()
            .filter(|(_, doc)| doc.get(field) == Some(expected))
            .collect())
    }
}
