// ==========================================
// 测试辅助函数
// ==========================================
// 职责: 提供 Mock 远端服务、测试 Schema、导入器构造
// ==========================================

#![allow(dead_code)]

use async_trait::async_trait;
use deploy_console::domain::{CoercedRecord, FieldSpec, ImportMode, SchemaDescriptor};
use deploy_console::importer::{BulkImporterImpl, CsvParser};
use deploy_console::repository::{
    rejection_from_response, BatchAck, EntityBatchRepository, RepositoryError, RepositoryResult,
};
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

/// 一次远端批量调用的记录
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub mode: ImportMode,
    pub entity: String,
    pub records: Vec<serde_json::Value>,
}

/// Mock 远端响应
#[derive(Debug, Clone)]
pub enum MockResponse {
    Accept,
    /// 模拟非 2xx 响应（状态码 + 响应体）
    Reject { status: u16, body: String },
    /// 模拟传输中止
    Abort,
}

/// Mock 远端实体服务
pub struct MockBatchRepository {
    response: MockResponse,
    calls: Mutex<Vec<RecordedCall>>,
    // 可选闸门：调用进入后通知 entered，等待 release 后返回
    entered: Arc<Notify>,
    release: Option<Arc<Notify>>,
}

impl MockBatchRepository {
    pub fn accepting() -> Self {
        Self::with_response(MockResponse::Accept)
    }

    pub fn rejecting(status: u16, body: &str) -> Self {
        Self::with_response(MockResponse::Reject {
            status,
            body: body.to_string(),
        })
    }

    pub fn with_response(response: MockResponse) -> Self {
        Self {
            response,
            calls: Mutex::new(Vec::new()),
            entered: Arc::new(Notify::new()),
            release: None,
        }
    }

    /// 带闸门的 Mock（用于并发测试）
    pub fn gated(release: Arc<Notify>) -> Self {
        Self {
            release: Some(release),
            ..Self::accepting()
        }
    }

    pub fn entered(&self) -> Arc<Notify> {
        self.entered.clone()
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    async fn handle(
        &self,
        mode: ImportMode,
        entity: &str,
        records: &[CoercedRecord],
    ) -> RepositoryResult<BatchAck> {
        let serialized = records
            .iter()
            .map(|r| serde_json::to_value(r).unwrap())
            .collect();
        self.calls.lock().unwrap().push(RecordedCall {
            mode,
            entity: entity.to_string(),
            records: serialized,
        });

        self.entered.notify_one();
        if let Some(release) = &self.release {
            release.notified().await;
        }

        match &self.response {
            MockResponse::Accept => Ok(BatchAck {
                status: 200,
                body: serde_json::Value::Null,
            }),
            MockResponse::Reject { status, body } => Err(rejection_from_response(*status, body)),
            MockResponse::Abort => Err(RepositoryError::TransportError(
                "request aborted".to_string(),
            )),
        }
    }
}

#[async_trait]
impl EntityBatchRepository for MockBatchRepository {
    async fn bulk_create(
        &self,
        entity: &str,
        records: &[CoercedRecord],
    ) -> RepositoryResult<BatchAck> {
        self.handle(ImportMode::Create, entity, records).await
    }

    async fn bulk_update(
        &self,
        entity: &str,
        records: &[CoercedRecord],
    ) -> RepositoryResult<BatchAck> {
        self.handle(ImportMode::Update, entity, records).await
    }
}

/// 场景测试用 Schema: name, pocEmail 必填
pub fn name_email_schema() -> SchemaDescriptor {
    SchemaDescriptor::new(
        "clients",
        vec![FieldSpec::text("name"), FieldSpec::text("pocEmail")],
        vec![],
    )
    .unwrap()
}

/// 构造使用 Mock 后端的导入器
pub fn create_test_importer(repo: Arc<MockBatchRepository>) -> BulkImporterImpl {
    BulkImporterImpl::with_defaults(CsvParser::default(), repo)
}
