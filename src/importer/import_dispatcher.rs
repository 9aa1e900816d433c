// ==========================================
// 发布管理控制台 - 导入分发器实现
// ==========================================
// 阶段 4: 按模式调用唯一一个远端批量接口
// 红线: 整批一次调用；不分块、不重试、不做逐条隔离
// ==========================================

use crate::domain::{CoercedRecord, ImportMode, SchemaDescriptor};
use crate::importer::error::{ImportError, ImportResult};
use crate::repository::EntityBatchRepository;
use std::sync::Arc;
use tracing::{error, info};

/// 分发成功结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchReceipt {
    pub dispatched: usize,
    /// 静态成功提示，如 "Successfully added clients"
    pub summary: String,
}

pub struct ImportDispatcher {
    repo: Arc<dyn EntityBatchRepository>,
}

impl ImportDispatcher {
    pub fn new(repo: Arc<dyn EntityBatchRepository>) -> Self {
        Self { repo }
    }

    /// 成功提示文案
    pub fn success_summary(mode: ImportMode, entity: &str) -> String {
        format!("Successfully {} {}", mode.past_tense(), entity)
    }

    /// 分发整批记录
    ///
    /// # 参数
    /// - records: 全部已转换记录（所有权转移给分发器）
    /// - schema: 用于确定实体路径与提示文案
    /// - mode: create → bulk_create，update → bulk_update
    ///
    /// # 返回
    /// - Ok(DispatchReceipt): 远端受理
    /// - Err(RemoteError): 远端拒绝/传输失败（含外部中止）
    pub async fn dispatch(
        &self,
        records: Vec<CoercedRecord>,
        schema: &SchemaDescriptor,
        mode: ImportMode,
    ) -> ImportResult<DispatchReceipt> {
        let entity = schema.entity();
        let count = records.len();

        let result = match mode {
            ImportMode::Create => self.repo.bulk_create(entity, &records).await,
            ImportMode::Update => self.repo.bulk_update(entity, &records).await,
        };

        match result {
            Ok(ack) => {
                info!(entity = %entity, mode = %mode, count = count, status = ack.status, "批量操作成功");
                Ok(DispatchReceipt {
                    dispatched: count,
                    summary: Self::success_summary(mode, entity),
                })
            }
            Err(e) => {
                error!(entity = %entity, mode = %mode, error = %e, "批量操作失败");
                Err(ImportError::from(e))
            }
        }
    }
}
