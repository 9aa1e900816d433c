// ==========================================
// 发布管理控制台 - 字段类型转换器实现
// ==========================================
// 阶段 3: 原始字符串 → FieldValue
// 规则:
//   - 空字符串 → Null
//   - Structured: 智能引号归一化后按 JSON 对象解析，失败则整批中止
//   - Bool: 原值忽略大小写等于 "true" 才为 true（不修剪），其余（含 Null/缺列）为 false
//   - Text: 原样透传
// ==========================================

use crate::domain::{CoercedRecord, FieldKind, FieldSpec, FieldValue, RawRow, SchemaDescriptor};
use crate::importer::bulk_importer_trait::RecordCoercer;
use crate::importer::error::{ImportError, ImportResult};
use serde_json::{Map, Value};
use tracing::{debug, warn};

/// 需要归一化为 ASCII 双引号的弯引号
const SMART_DOUBLE_QUOTES: [char; 5] = ['\u{201C}', '\u{201D}', '\u{201E}', '\u{201F}', '\u{2033}'];

#[derive(Debug, Clone, Copy, Default)]
pub struct FieldCoercer;

impl FieldCoercer {
    /// 将弯引号替换为 ASCII 双引号
    pub fn normalize_quotes(raw: &str) -> String {
        raw.chars()
            .map(|c| if SMART_DOUBLE_QUOTES.contains(&c) { '"' } else { c })
            .collect()
    }

    /// 解析内嵌 JSON 对象
    ///
    /// 单元格里常见省略外层花括号的写法（如 `"compA":"2.0"`），此时补上花括号再解析
    ///
    /// # 返回
    /// - Some(Map): 解析成功且为 JSON 对象
    /// - None: 非法 JSON 或非对象
    pub fn parse_structured(raw: &str) -> Option<Map<String, Value>> {
        let normalized = Self::normalize_quotes(raw);
        let trimmed = normalized.trim();
        if trimmed.is_empty() {
            return None;
        }

        let candidate = if trimmed.starts_with('{') {
            trimmed.to_string()
        } else {
            format!("{{{}}}", trimmed)
        };

        match serde_json::from_str::<Value>(&candidate) {
            Ok(Value::Object(map)) => Some(map),
            _ => None,
        }
    }

    /// 布尔转换
    pub fn coerce_bool(raw: Option<&str>) -> bool {
        raw.is_some_and(|v| v.eq_ignore_ascii_case("true"))
    }

    /// 单字段转换
    ///
    /// # 参数
    /// - field: 字段声明
    /// - raw: 单元格原始值（缺列为 None）
    /// - row_number: 源文件行号（用于日志）
    pub fn coerce_field(
        &self,
        field: &FieldSpec,
        raw: Option<&str>,
        row_number: usize,
    ) -> ImportResult<FieldValue> {
        let normalized = raw.filter(|v| !v.is_empty());

        let value = match field.kind {
            FieldKind::Bool => FieldValue::Bool(Self::coerce_bool(normalized)),
            FieldKind::Structured => match normalized {
                None => FieldValue::Null,
                Some(text) => match Self::parse_structured(text) {
                    Some(map) => FieldValue::Structured(map),
                    None => {
                        warn!(field = %field.name, row = row_number, "内嵌 JSON 解析失败");
                        return Err(ImportError::CoercionError {
                            field: field.name.clone(),
                            row: row_number,
                        });
                    }
                },
            },
            FieldKind::Text => match normalized {
                None => FieldValue::Null,
                Some(text) => FieldValue::Text(text.to_string()),
            },
        };

        Ok(value)
    }

    /// 单行转换（必填字段在前，可选字段在后）
    pub fn coerce_row(
        &self,
        row: &RawRow,
        schema: &SchemaDescriptor,
        row_number: usize,
    ) -> ImportResult<CoercedRecord> {
        let mut record = CoercedRecord::new();
        for field in schema.declared_fields() {
            let value = self.coerce_field(field, row.get(&field.name), row_number)?;
            record.push(&field.name, value);
        }
        Ok(record)
    }
}

impl RecordCoercer for FieldCoercer {
    fn coerce_all(
        &self,
        rows: &[RawRow],
        schema: &SchemaDescriptor,
    ) -> ImportResult<Vec<CoercedRecord>> {
        let records = rows
            .iter()
            .enumerate()
            .map(|(idx, row)| self.coerce_row(row, schema, row.line().unwrap_or(idx + 1)))
            .collect::<ImportResult<Vec<_>>>()?;

        debug!(count = records.len(), "字段转换完成");
        Ok(records)
    }
}
