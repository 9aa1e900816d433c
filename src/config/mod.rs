// ==========================================
// 发布管理控制台 - 配置层
// ==========================================
// 职责: 后端连接配置、导入 Schema 与样例模板
// ==========================================

pub mod config_manager;
pub mod import_schemas;

// 重导出核心配置
pub use config_manager::{config_keys, BackendConfig, ConfigError, ConfigManager, ConsoleConfig};
pub use import_schemas::{
    client_bulk_add_schema, client_bulk_update_schema, ImportSchemaKind,
    CLIENT_BULK_ADD_TEMPLATE, CLIENT_BULK_UPDATE_TEMPLATE,
};
