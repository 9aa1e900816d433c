// ==========================================
// 发布管理控制台 - 实体批量操作 Repository 实现
// ==========================================
// 传输: reqwest（JSON 请求体）
// 约定: create → POST，update → PUT；路径模板中的 {entity} 替换为实体名
// 超时由传输层负责，管道本身不设超时
// ==========================================

use crate::config::BackendConfig;
use crate::domain::CoercedRecord;
use crate::repository::entity_batch_repo::{BatchAck, EntityBatchRepository};
use crate::repository::error::{RepositoryError, RepositoryResult};
use async_trait::async_trait;
use reqwest::{Client, Method};
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, error, info};

const USER_AGENT: &str = concat!("deploy-console/", env!("CARGO_PKG_VERSION"));

/// 后端错误载荷（仅关心 message）
#[derive(Debug, Deserialize)]
struct ErrorPayload {
    message: Option<String>,
}

/// 由非 2xx 响应构造拒绝错误
///
/// 响应体为 `{ "message": ... }` 时提取 message，否则只保留通用描述
pub fn rejection_from_response(status: u16, body: &str) -> RepositoryError {
    let message = serde_json::from_str::<ErrorPayload>(body)
        .ok()
        .and_then(|payload| payload.message);

    RepositoryError::Rejected {
        status,
        message,
        description: format!("Request failed with status code {}", status),
    }
}

// ==========================================
// HttpEntityBatchRepository
// ==========================================
pub struct HttpEntityBatchRepository {
    client: Client,
    base_url: String,
    bulk_create_path: String,
    bulk_update_path: String,
    auth_token: Option<String>,
}

impl HttpEntityBatchRepository {
    /// 按后端配置创建
    pub fn new(config: &BackendConfig) -> RepositoryResult<Self> {
        if config.base_url.trim().is_empty() {
            return Err(RepositoryError::ConfigError(
                "backend base url is empty".to_string(),
            ));
        }

        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            bulk_create_path: config.bulk_create_path.clone(),
            bulk_update_path: config.bulk_update_path.clone(),
            auth_token: config.auth_token.clone(),
        })
    }

    /// 拼接完整 URL
    pub fn endpoint(&self, path_template: &str, entity: &str) -> String {
        let path = path_template.replace("{entity}", entity);
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    async fn send_batch(
        &self,
        method: Method,
        url: String,
        records: &[CoercedRecord],
    ) -> RepositoryResult<BatchAck> {
        debug!(method = %method, url = %url, count = records.len(), "发送批量请求");

        let mut request = self.client.request(method.clone(), &url).json(records);
        if let Some(token) = &self.auth_token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await.map_err(|e| {
            error!(url = %url, error = %e, "批量请求传输失败");
            RepositoryError::from(e)
        })?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            error!(url = %url, status = status.as_u16(), "后端拒绝批量请求");
            return Err(rejection_from_response(status.as_u16(), &body));
        }

        info!(method = %method, url = %url, status = status.as_u16(), "批量请求已受理");
        Ok(BatchAck {
            status: status.as_u16(),
            body: serde_json::from_str(&body).unwrap_or(serde_json::Value::Null),
        })
    }
}

#[async_trait]
impl EntityBatchRepository for HttpEntityBatchRepository {
    async fn bulk_create(
        &self,
        entity: &str,
        records: &[CoercedRecord],
    ) -> RepositoryResult<BatchAck> {
        let url = self.endpoint(&self.bulk_create_path, entity);
        self.send_batch(Method::POST, url, records).await
    }

    async fn bulk_update(
        &self,
        entity: &str,
        records: &[CoercedRecord],
    ) -> RepositoryResult<BatchAck> {
        let url = self.endpoint(&self.bulk_update_path, entity);
        self.send_batch(Method::PUT, url, records).await
    }
}
