// ==========================================
// 发布管理控制台 - 导入层
// ==========================================
// 职责: 上传文件 → 校验 → 类型转换 → 远端批量创建/更新
// 支持: 分隔符文本（CSV）
// ==========================================

// 模块声明
pub mod bulk_importer_impl;
pub mod bulk_importer_trait;
pub mod error;
pub mod field_coercer;
pub mod file_parser;
pub mod import_dispatcher;
pub mod import_run;
pub mod row_validator;

// 重导出核心类型
pub use bulk_importer_impl::BulkImporterImpl;
pub use error::{ImportError, ImportResult, MISSING_HEADER_PREFIX, ROW_VALIDATION_MESSAGE};
pub use field_coercer::FieldCoercer;
pub use file_parser::{CsvParser, ParserOptions};
pub use import_dispatcher::{DispatchReceipt, ImportDispatcher};
pub use import_run::ImportRun;
pub use row_validator::RowValidator;

// 重导出 Trait 接口
pub use bulk_importer_trait::{BulkImporter, FileParser, RecordCoercer, SchemaValidator};
