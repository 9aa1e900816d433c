// ==========================================
// 发布管理控制台 - 领域类型定义
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ==========================================
// 导入模式 (Import Mode)
// ==========================================
// 决定调用哪一个远端批量接口
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImportMode {
    Create, // bulkCreate
    Update, // bulkUpdate
}

impl ImportMode {
    /// 成功提示中使用的动词
    pub fn past_tense(&self) -> &'static str {
        match self {
            ImportMode::Create => "added",
            ImportMode::Update => "updated",
        }
    }
}

impl fmt::Display for ImportMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImportMode::Create => write!(f, "create"),
            ImportMode::Update => write!(f, "update"),
        }
    }
}

impl FromStr for ImportMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "create" | "add" => Ok(ImportMode::Create),
            "update" => Ok(ImportMode::Update),
            other => Err(format!("unknown import mode: {}", other)),
        }
    }
}

// ==========================================
// 导入阶段 (Import Stage)
// ==========================================
// 状态机: Idle → Parsing → Validating → Coercing → Dispatching → {Succeeded | Failed}
// 终态不可再迁移；不存在 Cancelled 状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ImportStage {
    Idle,
    Parsing,
    Validating,
    Coercing,
    Dispatching,
    Succeeded,
    Failed,
}

impl ImportStage {
    pub fn is_terminal(&self) -> bool {
        matches!(self, ImportStage::Succeeded | ImportStage::Failed)
    }

    /// 合法迁移判定
    ///
    /// 任一非终态都可以迁移到 Failed；其余只允许按顺序前进一步
    pub fn can_transition_to(&self, next: ImportStage) -> bool {
        use ImportStage::{Coercing, Dispatching, Failed, Idle, Parsing, Succeeded, Validating};

        if self.is_terminal() {
            return false;
        }
        if next == Failed {
            return true;
        }
        matches!(
            (self, next),
            (Idle, Parsing)
                | (Parsing, Validating)
                | (Validating, Coercing)
                | (Coercing, Dispatching)
                | (Dispatching, Succeeded)
        )
    }
}

impl fmt::Display for ImportStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ImportStage::Idle => "IDLE",
            ImportStage::Parsing => "PARSING",
            ImportStage::Validating => "VALIDATING",
            ImportStage::Coercing => "COERCING",
            ImportStage::Dispatching => "DISPATCHING",
            ImportStage::Succeeded => "SUCCEEDED",
            ImportStage::Failed => "FAILED",
        };
        write!(f, "{}", label)
    }
}
