// ==========================================
// 发布管理控制台 - 实体批量操作 Repository Trait
// ==========================================
// 职责: 定义远端实体服务的批量写接口（不包含业务逻辑）
// 红线: 一次调用携带整批记录，不分块、不重试
// ==========================================

use crate::domain::CoercedRecord;
use crate::repository::error::RepositoryResult;
use async_trait::async_trait;
use serde::Serialize;

/// 远端受理回执
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchAck {
    /// HTTP 状态码（非 HTTP 实现可填 200）
    pub status: u16,
    /// 响应体（后端未返回 JSON 时为 Null）
    pub body: serde_json::Value,
}

// ==========================================
// EntityBatchRepository Trait
// ==========================================
// 用途: 远端实体批量创建/更新
// 实现者: HttpEntityBatchRepository（使用 reqwest）
#[async_trait]
pub trait EntityBatchRepository: Send + Sync {
    /// 批量创建
    ///
    /// # 参数
    /// - entity: 实体路径名（如 "clients"）
    /// - records: 全部待创建记录（有序）
    ///
    /// # 返回
    /// - Ok(BatchAck): 后端受理
    /// - Err: 后端拒绝或传输失败（原子性由后端负责）
    async fn bulk_create(
        &self,
        entity: &str,
        records: &[CoercedRecord],
    ) -> RepositoryResult<BatchAck>;

    /// 批量更新
    async fn bulk_update(
        &self,
        entity: &str,
        records: &[CoercedRecord],
    ) -> RepositoryResult<BatchAck>;
}
