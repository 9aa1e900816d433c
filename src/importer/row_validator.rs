// ==========================================
// 发布管理控制台 - 行校验器实现
// ==========================================
// 阶段 2: 表头完整性 + 行级必填校验
// 策略: 表头缺列先失败；任一行缺必填单元格则整批拒绝
// 过滤: 必填字段全部为空的行静默丢弃（不算错误）
// ==========================================

use crate::domain::{RawRow, SchemaDescriptor};
use crate::importer::bulk_importer_trait::SchemaValidator;
use crate::importer::error::{ImportError, ImportResult};
use std::collections::HashSet;
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, Default)]
pub struct RowValidator;

/// 行内必填字段填充情况
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RequiredFill {
    /// 必填字段全部为空
    Blank,
    /// 部分填写
    Partial,
    /// 全部填写
    Complete,
}

impl RowValidator {
    /// 表头校验：返回缺失的必填列（按 Schema 声明顺序）
    pub fn missing_headers(&self, first_row: &RawRow, schema: &SchemaDescriptor) -> Vec<String> {
        let header: HashSet<&str> = first_row.columns().collect();
        schema
            .required_fields()
            .iter()
            .filter(|field| !header.contains(field.name.as_str()))
            .map(|field| field.name.clone())
            .collect()
    }

    fn required_fill(row: &RawRow, schema: &SchemaDescriptor) -> RequiredFill {
        let required = schema.required_fields();
        let populated = required
            .iter()
            .filter(|field| row.is_populated(&field.name))
            .count();

        if populated == 0 {
            RequiredFill::Blank
        } else if populated == required.len() {
            RequiredFill::Complete
        } else {
            RequiredFill::Partial
        }
    }
}

impl SchemaValidator for RowValidator {
    fn accept_rows(
        &self,
        rows: Vec<RawRow>,
        schema: &SchemaDescriptor,
    ) -> ImportResult<Vec<RawRow>> {
        // 步骤 1: 空输入
        let first_row = rows.first().ok_or(ImportError::EmptyInput)?;

        // 步骤 2: 表头完整性（先于任何行内容检查）
        let missing = self.missing_headers(first_row, schema);
        if !missing.is_empty() {
            warn!(missing = ?missing, "表头缺少必填列");
            return Err(ImportError::SchemaError { missing });
        }

        // 步骤 3: 行级必填校验（优先使用源文件行号，否则为数据行序号）
        let fills: Vec<RequiredFill> = rows
            .iter()
            .map(|row| Self::required_fill(row, schema))
            .collect();

        let invalid_rows: Vec<usize> = rows
            .iter()
            .zip(&fills)
            .enumerate()
            .filter(|(_, (_, fill))| **fill == RequiredFill::Partial)
            .map(|(idx, (row, _))| row.line().unwrap_or(idx + 1))
            .collect();

        if !invalid_rows.is_empty() {
            warn!(invalid = invalid_rows.len(), rows = ?invalid_rows, "存在必填字段缺失的行，整批拒绝");
            return Err(ImportError::RowValidationError { invalid_rows });
        }

        // 步骤 4: 丢弃必填字段全空的行
        let total = rows.len();
        let accepted: Vec<RawRow> = rows
            .into_iter()
            .zip(fills)
            .filter(|(_, fill)| *fill != RequiredFill::Blank)
            .map(|(row, _)| row)
            .collect();

        debug!(
            total = total,
            accepted = accepted.len(),
            dropped = total - accepted.len(),
            "行校验完成"
        );

        if accepted.is_empty() {
            return Err(ImportError::EmptyInput);
        }

        Ok(accepted)
    }
}
