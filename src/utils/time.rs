//! 时间工具函数
//!
//! Rating 的 timestamp 由服务端在写入/更新时盖章，
//! repository 层只接收 `i64` Unix 秒。

/// 当前 Unix 时间戳 (秒)
pub fn now_ts() -> i64 {
    chrono::Utc::now().timestamp()
}
