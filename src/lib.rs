// ==========================================
// 发布管理控制台 - 核心库
// ==========================================
// 技术栈: Rust + REST 后端
// 范围: 批量表格导入管道（解析 → 校验 → 类型转换 → 批量分发）
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - Schema / 记录 / 结果
pub mod domain;

// 导入层 - 批量导入管道
pub mod importer;

// 数据仓储层 - 远端实体服务
pub mod repository;

// 配置层 - 后端配置与导入 Schema
pub mod config;

// API 层 - 调用方入口
pub mod api;

// 日志系统
pub mod logging;

// ==========================================
// 重导出核心类型
// ==========================================

pub use domain::{
    CoercedRecord, FieldKind, FieldSpec, FieldValue, ImportMode, ImportOutcome, ImportStage,
    Notification, RawRow, SchemaDescriptor,
};
pub use importer::{BulkImporter, BulkImporterImpl, ImportError, ImportResult};
pub use api::{ImportApi, ImportHooks};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "Deploy Console";
