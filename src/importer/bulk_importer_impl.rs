// ==========================================
// 发布管理控制台 - 批量导入器实现
// ==========================================
// 职责: 整合导入流程，从上传文件到远端批量调用
// 流程: 解析 → 校验 → 类型转换 → 分发
// 并发: 同一导入器同一时刻只允许一次运行（single-flight，不排队）
// ==========================================

use crate::domain::{CoercedRecord, ImportMode, ImportOutcome, ImportStage, SchemaDescriptor};
use crate::importer::bulk_importer_trait::{
    BulkImporter, FileParser, RecordCoercer, SchemaValidator,
};
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::field_coercer::FieldCoercer;
use crate::importer::file_parser::CsvParser;
use crate::importer::import_dispatcher::{DispatchReceipt, ImportDispatcher};
use crate::importer::import_run::ImportRun;
use crate::importer::row_validator::RowValidator;
use crate::repository::EntityBatchRepository;
use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

// ==========================================
// InFlightGuard - 单飞标志
// ==========================================
struct InFlightGuard<'a> {
    flag: &'a AtomicBool,
}

impl<'a> InFlightGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self { flag })
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

// ==========================================
// BulkImporterImpl - 批量导入器实现
// ==========================================
pub struct BulkImporterImpl {
    // 导入组件
    file_parser: Box<dyn FileParser>,
    validator: Box<dyn SchemaValidator>,
    coercer: Box<dyn RecordCoercer>,
    dispatcher: ImportDispatcher,

    // 单飞标志
    in_flight: AtomicBool,
}

impl BulkImporterImpl {
    /// 创建新的 BulkImporter 实例
    ///
    /// # 参数
    /// - file_parser: 文件解析器
    /// - validator: 行校验器
    /// - coercer: 字段类型转换器
    /// - repo: 远端实体批量服务
    pub fn new(
        file_parser: Box<dyn FileParser>,
        validator: Box<dyn SchemaValidator>,
        coercer: Box<dyn RecordCoercer>,
        repo: Arc<dyn EntityBatchRepository>,
    ) -> Self {
        Self {
            file_parser,
            validator,
            coercer,
            dispatcher: ImportDispatcher::new(repo),
            in_flight: AtomicBool::new(false),
        }
    }

    /// 使用默认组件（逗号 CSV / 标准校验 / 标准转换）
    pub fn with_defaults(parser: CsvParser, repo: Arc<dyn EntityBatchRepository>) -> Self {
        Self::new(
            Box::new(parser),
            Box::new(RowValidator),
            Box::new(FieldCoercer),
            repo,
        )
    }

    /// 当前是否有运行中的导入
    pub fn is_in_flight(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// 解析 → 校验 → 转换（按阶段推进运行状态）
    fn prepare_with_run(
        &self,
        run: &mut ImportRun,
        content: &[u8],
        schema: &SchemaDescriptor,
    ) -> ImportResult<Vec<CoercedRecord>> {
        // === 阶段 1: 解析 ===
        run.advance(ImportStage::Parsing);
        let rows = self.file_parser.parse_rows(content)?;
        run.record_parsed(rows.len());
        info!(rows = rows.len(), "文件解析完成");

        // === 阶段 2: 校验 ===
        run.advance(ImportStage::Validating);
        let accepted = self.validator.accept_rows(rows, schema)?;
        run.record_accepted(accepted.len());
        info!(accepted = accepted.len(), "行校验完成");

        // === 阶段 3: 类型转换 ===
        run.advance(ImportStage::Coercing);
        let records = self.coercer.coerce_all(&accepted, schema)?;
        debug!(records = records.len(), "类型转换完成");

        Ok(records)
    }

    async fn execute(
        &self,
        run: &mut ImportRun,
        content: &[u8],
        schema: &SchemaDescriptor,
        mode: ImportMode,
    ) -> ImportResult<DispatchReceipt> {
        let records = self.prepare_with_run(run, content, schema)?;

        // === 阶段 4: 分发（唯一挂起点）===
        run.advance(ImportStage::Dispatching);
        self.dispatcher.dispatch(records, schema, mode).await
    }
}

#[async_trait]
impl BulkImporter for BulkImporterImpl {
    #[instrument(
        skip_all,
        fields(entity = %schema.entity(), mode = %mode, run_id = tracing::field::Empty)
    )]
    async fn run(
        &self,
        content: &[u8],
        schema: &SchemaDescriptor,
        mode: ImportMode,
    ) -> ImportOutcome {
        let mut run = ImportRun::start(schema.entity(), mode);
        tracing::Span::current().record("run_id", run.run_id());
        info!(bytes = content.len(), "开始导入");

        let Some(_guard) = InFlightGuard::acquire(&self.in_flight) else {
            warn!("已有导入在进行中，拒绝本次提交");
            return run.fail(ImportError::ImportInFlight);
        };

        match self.execute(&mut run, content, schema, mode).await {
            Ok(receipt) => {
                info!(dispatched = receipt.dispatched, "导入完成");
                run.succeed(receipt)
            }
            Err(e) => run.fail(e),
        }
    }

    fn prepare(
        &self,
        content: &[u8],
        schema: &SchemaDescriptor,
    ) -> ImportResult<Vec<CoercedRecord>> {
        let mut run = ImportRun::start(schema.entity(), ImportMode::Create);
        self.prepare_with_run(&mut run, content, schema)
    }
}
