// ==========================================
// 发布管理控制台 - 导入结果
// ==========================================
// 职责: 一次导入运行的终态结果（由调用方渲染，不直接弹出通知）
// ==========================================

use crate::domain::types::{ImportMode, ImportStage};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// 通知载荷（成功/失败提示）
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub title: String,
    pub description: String,
}

impl Notification {
    pub fn success(description: impl Into<String>) -> Self {
        Self {
            title: "Success".to_string(),
            description: description.into(),
        }
    }

    pub fn error(description: impl Into<String>) -> Self {
        Self {
            title: "Error".to_string(),
            description: description.into(),
        }
    }
}

/// 失败类别（调用层据此改写提示文案）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ImportErrorKind {
    Unreadable,
    Parse,
    EmptyInput,
    Schema,
    RowValidation,
    Coercion,
    Remote,
    InFlight,
}

/// 单次运行摘要
#[derive(Debug, Clone, Serialize)]
pub struct ImportRunSummary {
    pub run_id: String,
    pub entity: String,
    pub mode: ImportMode,
    pub started_at: DateTime<Utc>,
    pub elapsed_ms: u64,
    pub final_stage: ImportStage,
    pub parsed_rows: usize,
    pub accepted_rows: usize,
}

// ==========================================
// ImportOutcome - 导入终态
// ==========================================
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ImportOutcome {
    Succeeded {
        dispatched: usize,
        notification: Notification,
        summary: ImportRunSummary,
    },
    Failed {
        kind: ImportErrorKind,
        errors: Vec<String>,
        notification: Notification,
        summary: ImportRunSummary,
    },
}

impl ImportOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, ImportOutcome::Succeeded { .. })
    }

    /// 错误列表（成功时为空）
    pub fn errors(&self) -> &[String] {
        match self {
            ImportOutcome::Succeeded { .. } => &[],
            ImportOutcome::Failed { errors, .. } => errors,
        }
    }

    pub fn notification(&self) -> &Notification {
        match self {
            ImportOutcome::Succeeded { notification, .. }
            | ImportOutcome::Failed { notification, .. } => notification,
        }
    }

    pub fn summary(&self) -> &ImportRunSummary {
        match self {
            ImportOutcome::Succeeded { summary, .. } | ImportOutcome::Failed { summary, .. } => {
                summary
            }
        }
    }

    pub fn error_kind(&self) -> Option<ImportErrorKind> {
        match self {
            ImportOutcome::Succeeded { .. } => None,
            ImportOutcome::Failed { kind, .. } => Some(*kind),
        }
    }

    pub fn dispatched(&self) -> usize {
        match self {
            ImportOutcome::Succeeded { dispatched, .. } => *dispatched,
            ImportOutcome::Failed { .. } => 0,
        }
    }
}
