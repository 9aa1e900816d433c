// ==========================================
// 发布管理控制台 - 仓储层错误类型
// ==========================================
// 仓储层 = 远端 REST 后端的访问层
// 工具: thiserror 派生宏
// ==========================================

use thiserror::Error;

/// 仓储层错误类型
#[derive(Error, Debug)]
pub enum RepositoryError {
    // ===== 远端拒绝 =====
    /// 后端返回非 2xx；message 来自错误载荷（可能缺失）
    #[error("{description}")]
    Rejected {
        status: u16,
        message: Option<String>,
        description: String,
    },

    // ===== 传输错误 =====
    #[error("Network error: {0}")]
    TransportError(String),

    #[error("Request timed out: {0}")]
    Timeout(String),

    // ===== 配置错误 =====
    #[error("Invalid backend configuration: {0}")]
    ConfigError(String),
}

impl RepositoryError {
    /// 面向用户的错误文案
    ///
    /// 优先使用错误载荷中的 message，其次为通用描述
    pub fn user_message(&self) -> String {
        match self {
            RepositoryError::Rejected {
                message: Some(message),
                ..
            } if !message.trim().is_empty() => message.clone(),
            other => other.to_string(),
        }
    }
}

// 实现 From<reqwest::Error>
impl From<reqwest::Error> for RepositoryError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            RepositoryError::Timeout(err.to_string())
        } else if err.is_builder() {
            RepositoryError::ConfigError(err.to_string())
        } else {
            RepositoryError::TransportError(err.to_string())
        }
    }
}

/// Result 类型别名
pub type RepositoryResult<T> = Result<T, RepositoryError>;
