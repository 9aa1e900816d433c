// ==========================================
// 发布管理控制台 - API层错误类型
// ==========================================
// 职责: 汇总配置/仓储/导入错误，转换为用户可读消息
// ==========================================

use crate::config::ConfigError;
use crate::domain::SchemaDefinitionError;
use crate::importer::ImportError;
use crate::repository::RepositoryError;
use thiserror::Error;

/// API层错误类型
#[derive(Error, Debug)]
pub enum ApiError {
    // ==========================================
    // 配置错误
    // ==========================================
    #[error("Configuration error: {0}")]
    ConfigError(#[from] ConfigError),

    #[error("Schema definition error: {0}")]
    SchemaError(#[from] SchemaDefinitionError),

    // ==========================================
    // 后端访问错误
    // ==========================================
    #[error("Backend error: {0}")]
    BackendError(#[from] RepositoryError),

    // ==========================================
    // 导入错误
    // ==========================================
    #[error("{}", friendly_import_message(.0))]
    ImportError(#[from] ImportError),
}

/// 文件在选择后被修改/移动时的友好提示
pub const UNREADABLE_FILE_MESSAGE: &str =
    "The selected file could not be read. It may have been modified, moved or deleted after it was selected. Please select the file again.";

/// 导入错误的用户提示（对可识别原因做改写）
pub fn friendly_import_message(err: &ImportError) -> String {
    match err {
        ImportError::FileUnreadable(_) => UNREADABLE_FILE_MESSAGE.to_string(),
        other => other.to_string(),
    }
}

/// API Result 类型别名
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unreadable_file_is_rewritten() {
        let err = ApiError::from(ImportError::FileUnreadable(
            "os error 2: No such file".to_string(),
        ));
        assert_eq!(err.to_string(), UNREADABLE_FILE_MESSAGE);
    }

    #[test]
    fn test_config_error_wrapped() {
        let err = ApiError::from(ConfigError::ValueError {
            key: "delimiter".to_string(),
            value: "\\n".to_string(),
            message: "delimiter cannot be a quote or line break".to_string(),
        });
        assert!(err.to_string().starts_with("Configuration error: "));
    }

    #[test]
    fn test_schema_definition_error_wrapped() {
        let err = ApiError::from(SchemaDefinitionError::OverlappingField("name".to_string()));
        assert_eq!(
            err.to_string(),
            "Schema definition error: field 'name' is declared as both required and optional"
        );
    }

    #[test]
    fn test_other_import_errors_pass_through() {
        let err = ApiError::from(ImportError::CsvParseError("bad quote".to_string()));
        assert_eq!(err.to_string(), "CSV parse failed: bad quote");
    }
}
