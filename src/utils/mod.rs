//! 工具模块 - 日志、时间、校验

pub mod logger;
pub mod time;
pub mod validation;

pub use time::now_ts;
pub use validation::{validate_menu, validate_optional_text, validate_required_text};
