// ==========================================
// 发布管理控制台 - 单次导入运行状态
// ==========================================
// 状态机: Idle → Parsing → Validating → Coercing → Dispatching → {Succeeded | Failed}
// 每次上传创建一个新实例；运行之间不共享可变状态
// ==========================================

use crate::domain::{ImportMode, ImportOutcome, ImportRunSummary, ImportStage, Notification};
use crate::importer::error::ImportError;
use crate::importer::import_dispatcher::DispatchReceipt;
use chrono::{DateTime, Utc};
use std::time::Instant;
use tracing::{debug, warn};
use uuid::Uuid;

#[derive(Debug)]
pub struct ImportRun {
    run_id: String,
    entity: String,
    mode: ImportMode,
    stage: ImportStage,
    started_at: DateTime<Utc>,
    clock: Instant,
    parsed_rows: usize,
    accepted_rows: usize,
}

impl ImportRun {
    pub fn start(entity: &str, mode: ImportMode) -> Self {
        Self {
            run_id: Uuid::new_v4().to_string(),
            entity: entity.to_string(),
            mode,
            stage: ImportStage::Idle,
            started_at: Utc::now(),
            clock: Instant::now(),
            parsed_rows: 0,
            accepted_rows: 0,
        }
    }

    pub fn run_id(&self) -> &str {
        &self.run_id
    }

    pub fn stage(&self) -> ImportStage {
        self.stage
    }

    /// 推进到下一阶段；非法迁移只记录告警，不改变状态
    pub fn advance(&mut self, next: ImportStage) {
        if self.stage.can_transition_to(next) {
            debug!(run_id = %self.run_id, from = %self.stage, to = %next, "阶段迁移");
            self.stage = next;
        } else {
            warn!(run_id = %self.run_id, from = %self.stage, to = %next, "非法阶段迁移被忽略");
        }
    }

    pub fn record_parsed(&mut self, rows: usize) {
        self.parsed_rows = rows;
    }

    pub fn record_accepted(&mut self, rows: usize) {
        self.accepted_rows = rows;
    }

    fn summary(&self) -> ImportRunSummary {
        ImportRunSummary {
            run_id: self.run_id.clone(),
            entity: self.entity.clone(),
            mode: self.mode,
            started_at: self.started_at,
            elapsed_ms: self.clock.elapsed().as_millis() as u64,
            final_stage: self.stage,
            parsed_rows: self.parsed_rows,
            accepted_rows: self.accepted_rows,
        }
    }

    /// 成功终态
    pub fn succeed(mut self, receipt: DispatchReceipt) -> ImportOutcome {
        self.advance(ImportStage::Succeeded);
        ImportOutcome::Succeeded {
            dispatched: receipt.dispatched,
            notification: Notification::success(receipt.summary),
            summary: self.summary(),
        }
    }

    /// 失败终态（携带完整错误报告）
    pub fn fail(mut self, err: ImportError) -> ImportOutcome {
        let failed_at = self.stage;
        self.advance(ImportStage::Failed);
        warn!(run_id = %self.run_id, stage = %failed_at, error = %err, "导入失败");

        ImportOutcome::Failed {
            kind: err.kind(),
            errors: err.report(),
            notification: Notification::error(err.to_string()),
            summary: self.summary(),
        }
    }
}
