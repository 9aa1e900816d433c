// ==========================================
// 发布管理控制台 - 导入模块错误类型
// ==========================================
// 工具: thiserror 派生宏
// 策略: 任一阶段失败即中止整个批次，不做部分提交
// ==========================================

use crate::domain::ImportErrorKind;
use crate::repository::error::RepositoryError;
use thiserror::Error;

/// 表头缺失提示前缀
pub const MISSING_HEADER_PREFIX: &str = "Missing mandatory header: ";

/// 行级必填校验失败的汇总提示
pub const ROW_VALIDATION_MESSAGE: &str = "All required fields must be present in each row.";

/// 导入模块错误类型
#[derive(Error, Debug)]
pub enum ImportError {
    // ===== 解析错误 (ParseError) =====
    /// 文件在选择后被修改/移动，或读取中途失败
    /// 调用层负责改写为更友好的提示
    #[error("File could not be read: {0}")]
    FileUnreadable(String),

    #[error("CSV parse failed: {0}")]
    CsvParseError(String),

    // ===== 校验错误 =====
    #[error("The uploaded file contains no data rows")]
    EmptyInput,

    /// 表头缺少必填列 (SchemaError)
    #[error("{}", format_missing_headers(.missing))]
    SchemaError { missing: Vec<String> },

    /// 至少一行缺少必填单元格 (RowValidationError)
    /// 行号只用于日志，不进入提示文案
    #[error("All required fields must be present in each row.")]
    RowValidationError { invalid_rows: Vec<usize> },

    // ===== 类型转换错误 (CoercionError) =====
    #[error("Invalid JSON format in {field}")]
    CoercionError { field: String, row: usize },

    // ===== 远端错误 (RemoteError) =====
    #[error("{message}")]
    RemoteError { message: String },

    // ===== 并发控制 =====
    #[error("An import is already in progress for this form")]
    ImportInFlight,
}

fn format_missing_headers(missing: &[String]) -> String {
    missing
        .iter()
        .map(|field| format!("{}{}", MISSING_HEADER_PREFIX, field))
        .collect::<Vec<_>>()
        .join("; ")
}

impl ImportError {
    /// 错误列表视图（供 UI 错误列表展示）
    ///
    /// SchemaError 每个缺失列一条，其余错误各一条
    pub fn report(&self) -> Vec<String> {
        match self {
            ImportError::SchemaError { missing } => missing
                .iter()
                .map(|field| format!("{}{}", MISSING_HEADER_PREFIX, field))
                .collect(),
            other => vec![other.to_string()],
        }
    }

    /// 失败类别
    pub fn kind(&self) -> ImportErrorKind {
        match self {
            ImportError::FileUnreadable(_) => ImportErrorKind::Unreadable,
            ImportError::CsvParseError(_) => ImportErrorKind::Parse,
            ImportError::EmptyInput => ImportErrorKind::EmptyInput,
            ImportError::SchemaError { .. } => ImportErrorKind::Schema,
            ImportError::RowValidationError { .. } => ImportErrorKind::RowValidation,
            ImportError::CoercionError { .. } => ImportErrorKind::Coercion,
            ImportError::RemoteError { .. } => ImportErrorKind::Remote,
            ImportError::ImportInFlight => ImportErrorKind::InFlight,
        }
    }

    /// 是否为解析阶段错误
    pub fn is_parse_error(&self) -> bool {
        matches!(
            self,
            ImportError::FileUnreadable(_) | ImportError::CsvParseError(_)
        )
    }
}

// 实现 From<std::io::Error>
impl From<std::io::Error> for ImportError {
    fn from(err: std::io::Error) -> Self {
        ImportError::FileUnreadable(err.to_string())
    }
}

// 实现 From<csv::Error>
// IO 类错误归为 FileUnreadable，其余（UTF-8 / 格式）归为 CsvParseError
impl From<csv::Error> for ImportError {
    fn from(err: csv::Error) -> Self {
        match err.kind() {
            csv::ErrorKind::Io(_) => ImportError::FileUnreadable(err.to_string()),
            _ => ImportError::CsvParseError(err.to_string()),
        }
    }
}

// 实现 From<RepositoryError>
impl From<RepositoryError> for ImportError {
    fn from(err: RepositoryError) -> Self {
        ImportError::RemoteError {
            message: err.user_message(),
        }
    }
}

/// Result 类型别名
pub type ImportResult<T> = Result<T, ImportError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_error_report_one_entry_per_field() {
        let err = ImportError::SchemaError {
            missing: vec!["name".to_string(), "pocEmail".to_string()],
        };
        assert_eq!(
            err.report(),
            vec![
                "Missing mandatory header: name".to_string(),
                "Missing mandatory header: pocEmail".to_string(),
            ]
        );
    }

    #[test]
    fn test_row_validation_report_is_aggregate() {
        let err = ImportError::RowValidationError {
            invalid_rows: vec![2, 5],
        };
        assert_eq!(err.report(), vec![ROW_VALIDATION_MESSAGE.to_string()]);
    }

    #[test]
    fn test_coercion_error_message() {
        let err = ImportError::CoercionError {
            field: "componentVersions".to_string(),
            row: 3,
        };
        assert_eq!(err.to_string(), "Invalid JSON format in componentVersions");
    }

    #[test]
    fn test_io_error_maps_to_unreadable() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: ImportError = io.into();
        assert!(matches!(err, ImportError::FileUnreadable(_)));
        assert!(err.is_parse_error());
    }
}
