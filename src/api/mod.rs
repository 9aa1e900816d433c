// ==========================================
// 发布管理控制台 - API 层
// ==========================================
// 职责: 提供导入 API 接口,供命令行/界面调用
// ==========================================

pub mod error;
pub mod import_api;

// 重导出核心类型
pub use error::{friendly_import_message, ApiError, ApiResult, UNREADABLE_FILE_MESSAGE};
pub use import_api::{ImportApi, ImportHooks, NoopHooks};
