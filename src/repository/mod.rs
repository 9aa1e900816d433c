// ==========================================
// 发布管理控制台 - 数据仓储层
// ==========================================
// 红线: Repository 不含业务逻辑
// ==========================================
// 职责: 远端实体服务的访问接口，屏蔽 HTTP 细节
// ==========================================

pub mod entity_batch_repo;
pub mod entity_batch_repo_impl;
pub mod error;

// 重导出核心仓储
pub use entity_batch_repo::{BatchAck, EntityBatchRepository};
pub use entity_batch_repo_impl::{rejection_from_response, HttpEntityBatchRepository};
pub use error::{RepositoryError, RepositoryResult};
