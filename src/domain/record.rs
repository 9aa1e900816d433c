// ==========================================
// 发布管理控制台 - 导入行记录
// ==========================================
// RawRow: 解析产物（列名 → 原始字符串）
// CoercedRecord: 类型转换产物（字段名 → FieldValue）
// ==========================================

use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;
use serde_json::{Map, Value};

// ==========================================
// RawRow - 原始行
// ==========================================
// 列集合由文件表头决定，与 Schema 无关；解析后不可变
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RawRow {
    cells: Vec<(String, String)>,
    /// 源文件行号（从 1 开始，表头为第 1 行）
    line: Option<usize>,
}

impl RawRow {
    pub fn new(cells: Vec<(String, String)>) -> Self {
        Self { cells, line: None }
    }

    /// 记录源文件行号
    pub fn with_line(mut self, line: usize) -> Self {
        self.line = Some(line);
        self
    }

    pub fn line(&self) -> Option<usize> {
        self.line
    }

    /// 读取单元格原始值
    ///
    /// 表头存在重名列时，后出现的列覆盖前面的列
    pub fn get(&self, column: &str) -> Option<&str> {
        self.cells
            .iter()
            .rev()
            .find(|(name, _)| name == column)
            .map(|(_, value)| value.as_str())
    }

    /// 单元格存在且非空
    pub fn is_populated(&self, column: &str) -> bool {
        self.get(column).is_some_and(|v| !v.is_empty())
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.cells.iter().map(|(name, _)| name.as_str())
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

// ==========================================
// FieldValue - 类型化字段值
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Null,
    Bool(bool),
    Text(String),
    Structured(Map<String, Value>),
}

impl FieldValue {
    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            FieldValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_structured(&self) -> Option<&Map<String, Value>> {
        match self {
            FieldValue::Structured(m) => Some(m),
            _ => None,
        }
    }
}

// ==========================================
// CoercedRecord - 类型化记录
// ==========================================
// 字段顺序与 Schema 声明顺序一致（必填在前）
// 序列化为 JSON 对象时保持该顺序
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CoercedRecord {
    fields: Vec<(String, FieldValue)>,
}

impl CoercedRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, name: &str, value: FieldValue) {
        self.fields.push((name.to_string(), value));
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, value)| value)
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.fields.iter().map(|(name, value)| (name.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl Serialize for CoercedRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (name, value) in &self.fields {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_raw_row_last_duplicate_column_wins() {
        let row = RawRow::new(vec![
            ("name".to_string(), "first".to_string()),
            ("name".to_string(), "second".to_string()),
        ]);
        assert_eq!(row.get("name"), Some("second"));
        assert_eq!(row.get("missing"), None);
    }

    #[test]
    fn test_raw_row_is_populated() {
        let row = RawRow::new(vec![
            ("name".to_string(), "Alpha".to_string()),
            ("pocEmail".to_string(), String::new()),
        ]);
        assert!(row.is_populated("name"));
        assert!(!row.is_populated("pocEmail"));
        assert!(!row.is_populated("region"));
    }

    #[test]
    fn test_coerced_record_serializes_in_declared_order() {
        let mut components = Map::new();
        components.insert("compA".to_string(), json!("1.2"));

        let mut record = CoercedRecord::new();
        record.push("name", FieldValue::Text("Alpha".to_string()));
        record.push("onHold", FieldValue::Bool(true));
        record.push("region", FieldValue::Null);
        record.push("componentVersions", FieldValue::Structured(components));

        let text = serde_json::to_string(&record).unwrap();
        assert_eq!(
            text,
            r#"{"name":"Alpha","onHold":true,"region":null,"componentVersions":{"compA":"1.2"}}"#
        );
    }
}
