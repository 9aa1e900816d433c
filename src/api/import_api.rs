// ==========================================
// 批量导入API
// ==========================================
// 职责: 调用方一侧的导入入口
//   - 组装导入器（CSV 解析 + HTTP 后端）
//   - 改写可识别的解析错误为友好提示
//   - 成功后触发刷新/重置表单回调
// ==========================================

use crate::api::error::{ApiResult, UNREADABLE_FILE_MESSAGE};
use crate::config::ConsoleConfig;
use crate::domain::{
    CoercedRecord, ImportErrorKind, ImportMode, ImportOutcome, Notification, SchemaDescriptor,
};
use crate::importer::{BulkImporter, BulkImporterImpl, CsvParser, ImportError, ImportRun, ParserOptions};
use crate::repository::HttpEntityBatchRepository;
use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};

// ==========================================
// ImportHooks - 调用方回调
// ==========================================
// on_success: 刷新依赖视图
// reset_form: 重置上传表单
pub trait ImportHooks: Send + Sync {
    fn on_success(&self, _outcome: &ImportOutcome) {}

    fn reset_form(&self) {}
}

/// 不做任何事的回调
pub struct NoopHooks;

impl ImportHooks for NoopHooks {}

/// 导入API
pub struct ImportApi {
    importer: Arc<dyn BulkImporter>,
}

impl ImportApi {
    /// 使用已组装的导入器
    pub fn new(importer: Arc<dyn BulkImporter>) -> Self {
        Self { importer }
    }

    /// 按配置组装（CSV 分隔符 + HTTP 后端）
    pub fn from_config(config: &ConsoleConfig) -> ApiResult<Self> {
        let repo = HttpEntityBatchRepository::new(&config.backend)?;
        let parser = CsvParser::new(ParserOptions {
            delimiter: config.delimiter_byte(),
        });

        Ok(Self::new(Arc::new(BulkImporterImpl::with_defaults(
            parser,
            Arc::new(repo),
        ))))
    }

    /// 导入上传内容
    ///
    /// # 参数
    /// - content: 文件原始字节
    /// - schema: 调用点对应的 Schema
    /// - mode: create / update
    /// - hooks: 成功回调
    ///
    /// # 返回
    /// - ImportOutcome: 已完成文案改写的终态
    pub async fn import_content(
        &self,
        content: &[u8],
        schema: &SchemaDescriptor,
        mode: ImportMode,
        hooks: &dyn ImportHooks,
    ) -> ImportOutcome {
        let outcome = self.importer.run(content, schema, mode).await;
        Self::finish(outcome, hooks)
    }

    /// 从磁盘读取后导入
    pub async fn import_file<P: AsRef<Path>>(
        &self,
        file_path: P,
        schema: &SchemaDescriptor,
        mode: ImportMode,
        hooks: &dyn ImportHooks,
    ) -> ImportOutcome {
        let path = file_path.as_ref();
        info!(file = %path.display(), entity = %schema.entity(), mode = %mode, "读取导入文件");

        match tokio::fs::read(path).await {
            Ok(content) => self.import_content(&content, schema, mode, hooks).await,
            Err(e) => {
                let outcome = ImportRun::start(schema.entity(), mode).fail(ImportError::from(e));
                Self::finish(outcome, hooks)
            }
        }
    }

    /// 预览（不调用后端）
    pub fn preview(
        &self,
        content: &[u8],
        schema: &SchemaDescriptor,
    ) -> ApiResult<Vec<CoercedRecord>> {
        Ok(self.importer.prepare(content, schema)?)
    }

    fn finish(outcome: ImportOutcome, hooks: &dyn ImportHooks) -> ImportOutcome {
        let outcome = Self::rewrite_unreadable(outcome);
        if outcome.is_success() {
            hooks.on_success(&outcome);
            hooks.reset_form();
        }
        outcome
    }

    /// 改写"文件读取中途失败"类错误
    fn rewrite_unreadable(outcome: ImportOutcome) -> ImportOutcome {
        match outcome {
            ImportOutcome::Failed {
                kind: ImportErrorKind::Unreadable,
                errors,
                summary,
                ..
            } => {
                warn!(original = ?errors, "文件读取失败，改写为友好提示");
                ImportOutcome::Failed {
                    kind: ImportErrorKind::Unreadable,
                    errors: vec![UNREADABLE_FILE_MESSAGE.to_string()],
                    notification: Notification::error(UNREADABLE_FILE_MESSAGE),
                    summary,
                }
            }
            other => other,
        }
    }
}
