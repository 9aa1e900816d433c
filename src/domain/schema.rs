// ==========================================
// 发布管理控制台 - 导入 Schema 描述
// ==========================================
// 职责: 声明某一实体类型的必填/可选字段及其语义类型
// 红线: 纯数据，不含解析/校验逻辑
// ==========================================

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

// ==========================================
// FieldKind - 字段语义类型
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    /// 布尔标志（如 onHold / active）
    Bool,
    /// 内嵌 JSON 对象（如 组件 → 版本 映射）
    Structured,
    /// 原样透传的文本
    Text,
}

/// 单个字段声明
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSpec {
    pub name: String,
    pub kind: FieldKind,
}

impl FieldSpec {
    pub fn text(name: &str) -> Self {
        Self {
            name: name.to_string(),
            kind: FieldKind::Text,
        }
    }

    pub fn boolean(name: &str) -> Self {
        Self {
            name: name.to_string(),
            kind: FieldKind::Bool,
        }
    }

    pub fn structured(name: &str) -> Self {
        Self {
            name: name.to_string(),
            kind: FieldKind::Structured,
        }
    }
}

/// Schema 构造错误
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SchemaDefinitionError {
    #[error("field '{0}' is declared as both required and optional")]
    OverlappingField(String),

    #[error("field '{0}' is declared more than once")]
    DuplicateField(String),
}

// ==========================================
// SchemaDescriptor - 实体导入 Schema
// ==========================================
// 不变量: required ∩ optional = ∅，字段名不重复
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SchemaDescriptor {
    entity: String,
    required: Vec<FieldSpec>,
    optional: Vec<FieldSpec>,
}

impl SchemaDescriptor {
    /// 创建 Schema
    ///
    /// # 参数
    /// - entity: 实体名称（复数形式，用于提示文案，如 "clients"）
    /// - required: 必填字段（有序）
    /// - optional: 可选字段（有序）
    ///
    /// # 返回
    /// - Err: 字段同时出现在必填与可选中，或重复声明
    pub fn new(
        entity: &str,
        required: Vec<FieldSpec>,
        optional: Vec<FieldSpec>,
    ) -> Result<Self, SchemaDefinitionError> {
        let required_names: HashSet<&str> = required.iter().map(|f| f.name.as_str()).collect();
        let mut seen = HashSet::new();

        for field in &required {
            if !seen.insert(field.name.as_str()) {
                return Err(SchemaDefinitionError::DuplicateField(field.name.clone()));
            }
        }

        for field in &optional {
            if required_names.contains(field.name.as_str()) {
                return Err(SchemaDefinitionError::OverlappingField(field.name.clone()));
            }
            if !seen.insert(field.name.as_str()) {
                return Err(SchemaDefinitionError::DuplicateField(field.name.clone()));
            }
        }

        Ok(Self {
            entity: entity.to_string(),
            required,
            optional,
        })
    }

    pub fn entity(&self) -> &str {
        &self.entity
    }

    pub fn required_fields(&self) -> &[FieldSpec] {
        &self.required
    }

    pub fn optional_fields(&self) -> &[FieldSpec] {
        &self.optional
    }

    /// 全部声明字段（必填在前，可选在后）
    pub fn declared_fields(&self) -> impl Iterator<Item = &FieldSpec> {
        self.required.iter().chain(self.optional.iter())
    }

    /// 内嵌 JSON 字段名集合
    pub fn structured_fields(&self) -> Vec<&str> {
        self.declared_fields()
            .filter(|f| f.kind == FieldKind::Structured)
            .map(|f| f.name.as_str())
            .collect()
    }

    pub fn field_count(&self) -> usize {
        self.required.len() + self.optional.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlapping_field_rejected() {
        let result = SchemaDescriptor::new(
            "clients",
            vec![FieldSpec::text("name")],
            vec![FieldSpec::text("name")],
        );
        assert_eq!(
            result,
            Err(SchemaDefinitionError::OverlappingField("name".to_string()))
        );
    }

    #[test]
    fn test_duplicate_required_rejected() {
        let result = SchemaDescriptor::new(
            "clients",
            vec![FieldSpec::text("name"), FieldSpec::boolean("name")],
            vec![],
        );
        assert!(matches!(
            result,
            Err(SchemaDefinitionError::DuplicateField(_))
        ));
    }

    #[test]
    fn test_declared_order_required_first() {
        let schema = SchemaDescriptor::new(
            "clients",
            vec![FieldSpec::text("name"), FieldSpec::text("pocEmail")],
            vec![
                FieldSpec::boolean("onHold"),
                FieldSpec::structured("componentVersions"),
            ],
        )
        .unwrap();

        let names: Vec<&str> = schema.declared_fields().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["name", "pocEmail", "onHold", "componentVersions"]);
        assert_eq!(schema.structured_fields(), vec!["componentVersions"]);
        assert_eq!(schema.field_count(), 4);
    }
}
