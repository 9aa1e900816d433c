// ==========================================
// 发布管理控制台 - 批量导入 Trait
// ==========================================
// 职责: 定义导入管道各阶段接口（不包含实现）
// 流程: 解析 → 校验 → 类型转换 → 分发
// ==========================================

use crate::domain::{CoercedRecord, ImportMode, ImportOutcome, RawRow, SchemaDescriptor};
use crate::importer::error::ImportResult;
use async_trait::async_trait;

// ==========================================
// BulkImporter Trait
// ==========================================
// 用途: 批量导入主接口
// 实现者: BulkImporterImpl
#[async_trait]
pub trait BulkImporter: Send + Sync {
    /// 执行一次完整导入
    ///
    /// # 参数
    /// - content: 上传文件的原始字节
    /// - schema: 实体 Schema
    /// - mode: create / update
    ///
    /// # 返回
    /// - ImportOutcome: 成功或失败终态（失败也以 Outcome 返回，不走 Err）
    ///
    /// # 导入流程
    /// 1. 解析（Parsing）
    /// 2. 表头与必填校验（Validating）
    /// 3. 类型转换（Coercing）
    /// 4. 远端批量调用（Dispatching）
    async fn run(&self, content: &[u8], schema: &SchemaDescriptor, mode: ImportMode)
        -> ImportOutcome;

    /// 只执行解析/校验/转换，不调用远端（dry-run）
    fn prepare(
        &self,
        content: &[u8],
        schema: &SchemaDescriptor,
    ) -> ImportResult<Vec<CoercedRecord>>;
}

// ==========================================
// FileParser Trait
// ==========================================
// 用途: 文本解析接口（阶段 1）
// 实现者: CsvParser
pub trait FileParser: Send + Sync {
    /// 解析原始字节为行记录（首行为表头）
    ///
    /// # 返回
    /// - Ok(Vec<RawRow>): 行记录列表（保持文件顺序）
    /// - Err: FileUnreadable / CsvParseError
    fn parse_rows(&self, content: &[u8]) -> ImportResult<Vec<RawRow>>;
}

// ==========================================
// SchemaValidator Trait
// ==========================================
// 用途: 表头完整性与行级必填校验（阶段 2）
// 实现者: RowValidator
pub trait SchemaValidator: Send + Sync {
    /// 校验并返回可接受的行
    ///
    /// # 返回
    /// - Ok(Vec<RawRow>): 至少填了一个必填字段的行
    /// - Err: EmptyInput / SchemaError / RowValidationError
    fn accept_rows(&self, rows: Vec<RawRow>, schema: &SchemaDescriptor)
        -> ImportResult<Vec<RawRow>>;
}

// ==========================================
// RecordCoercer Trait
// ==========================================
// 用途: 字段类型转换（阶段 3）
// 实现者: FieldCoercer
pub trait RecordCoercer: Send + Sync {
    /// 批量转换，任一行失败即中止整个批次
    fn coerce_all(
        &self,
        rows: &[RawRow],
        schema: &SchemaDescriptor,
    ) -> ImportResult<Vec<CoercedRecord>>;
}
