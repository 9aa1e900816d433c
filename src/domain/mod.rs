// ==========================================
// 发布管理控制台 - 领域模型层
// ==========================================
// 职责: 定义导入 Schema、行记录、导入模式与结果
// 红线: 不含解析逻辑,不含远端调用
// ==========================================

pub mod outcome;
pub mod record;
pub mod schema;
pub mod types;

// 重导出核心类型
pub use outcome::{ImportErrorKind, ImportOutcome, ImportRunSummary, Notification};
pub use record::{CoercedRecord, FieldValue, RawRow};
pub use schema::{FieldKind, FieldSpec, SchemaDefinitionError, SchemaDescriptor};
pub use types::{ImportMode, ImportStage};
