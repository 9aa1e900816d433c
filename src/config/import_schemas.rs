// ==========================================
// 发布管理控制台 - 批量导入 Schema 与模板
// ==========================================
// 职责: 提供客户端（client）批量新增/批量更新两套 Schema，及可下载样例模板
// 红线: Schema 由调用方显式选择，不从文件推断
// ==========================================

use crate::domain::{FieldSpec, SchemaDefinitionError, SchemaDescriptor};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

const CLIENT_ENTITY: &str = "clients";

/// 批量新增样例模板（表头 + 提示行）
pub const CLIENT_BULK_ADD_TEMPLATE: &str = "\
name,pocName,pocEmail,deploymentGroup,description,region,onHold,active,componentVersions
Acme Corp,Jane Doe,jane.doe@acme.com,group-a,Primary customer,eu-west,false,true,\"{\"\"compA\"\":\"\"1.2\"\",\"\"compB\"\":\"\"3.0\"\"}\"
";

/// 批量更新样例模板（表头 + 提示行）
pub const CLIENT_BULK_UPDATE_TEMPLATE: &str = "\
name,pocName,pocEmail,deploymentGroup,description,onHold,active
Acme Corp,Jane Doe,jane.doe@acme.com,group-b,Moved to group-b,true,true
";

/// 客户端批量新增 Schema（9 个字段，1 个内嵌 JSON 字段）
pub fn client_bulk_add_schema() -> Result<SchemaDescriptor, SchemaDefinitionError> {
    SchemaDescriptor::new(
        CLIENT_ENTITY,
        vec![
            FieldSpec::text("name"),
            FieldSpec::text("pocName"),
            FieldSpec::text("pocEmail"),
            FieldSpec::text("deploymentGroup"),
        ],
        vec![
            FieldSpec::text("description"),
            FieldSpec::text("region"),
            FieldSpec::boolean("onHold"),
            FieldSpec::boolean("active"),
            FieldSpec::structured("componentVersions"),
        ],
    )
}

/// 客户端批量更新 Schema（7 个字段，无内嵌 JSON 字段）
pub fn client_bulk_update_schema() -> Result<SchemaDescriptor, SchemaDefinitionError> {
    SchemaDescriptor::new(
        CLIENT_ENTITY,
        vec![FieldSpec::text("name")],
        vec![
            FieldSpec::text("pocName"),
            FieldSpec::text("pocEmail"),
            FieldSpec::text("deploymentGroup"),
            FieldSpec::text("description"),
            FieldSpec::boolean("onHold"),
            FieldSpec::boolean("active"),
        ],
    )
}

// ==========================================
// ImportSchemaKind - 调用方可选的 Schema
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ImportSchemaKind {
    ClientBulkAdd,
    ClientBulkUpdate,
}

impl ImportSchemaKind {
    pub fn descriptor(&self) -> Result<SchemaDescriptor, SchemaDefinitionError> {
        match self {
            ImportSchemaKind::ClientBulkAdd => client_bulk_add_schema(),
            ImportSchemaKind::ClientBulkUpdate => client_bulk_update_schema(),
        }
    }

    pub fn sample_template(&self) -> &'static str {
        match self {
            ImportSchemaKind::ClientBulkAdd => CLIENT_BULK_ADD_TEMPLATE,
            ImportSchemaKind::ClientBulkUpdate => CLIENT_BULK_UPDATE_TEMPLATE,
        }
    }
}

impl fmt::Display for ImportSchemaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImportSchemaKind::ClientBulkAdd => write!(f, "client-bulk-add"),
            ImportSchemaKind::ClientBulkUpdate => write!(f, "client-bulk-update"),
        }
    }
}

impl FromStr for ImportSchemaKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "client-bulk-add" => Ok(ImportSchemaKind::ClientBulkAdd),
            "client-bulk-update" => Ok(ImportSchemaKind::ClientBulkUpdate),
            other => Err(format!(
                "unknown schema: {} (expected client-bulk-add or client-bulk-update)",
                other
            )),
        }
    }
}
