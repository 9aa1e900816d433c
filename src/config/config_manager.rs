// ==========================================
// 发布管理控制台 - 配置管理器
// ==========================================
// 职责: 配置加载、默认值、环境变量覆写
// 存储: <config_dir>/deploy-console/config.json（可选）
// 优先级: 环境变量 > 配置文件 > 默认值
// ==========================================

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

/// 配置键（环境变量名）
pub mod config_keys {
    pub const BACKEND_URL: &str = "DEPLOY_CONSOLE_BACKEND_URL";
    pub const AUTH_TOKEN: &str = "DEPLOY_CONSOLE_TOKEN";
    pub const TIMEOUT_SECS: &str = "DEPLOY_CONSOLE_TIMEOUT_SECS";
    pub const DELIMITER: &str = "DEPLOY_CONSOLE_DELIMITER";
}

const APP_DIR: &str = "deploy-console";
const CONFIG_FILE: &str = "config.json";

/// 配置错误
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {message}")]
    ReadError { path: String, message: String },

    #[error("Invalid config file {path}: {message}")]
    FormatError { path: String, message: String },

    #[error("Invalid config value (key: {key}, value: {value}): {message}")]
    ValueError {
        key: String,
        value: String,
        message: String,
    },
}

// ==========================================
// BackendConfig - 远端后端配置
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    pub base_url: String,
    /// 批量创建路径模板，{entity} 为实体名
    pub bulk_create_path: String,
    /// 批量更新路径模板
    pub bulk_update_path: String,
    /// 传输超时（秒）
    pub request_timeout_secs: u64,
    pub auth_token: Option<String>,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_string(),
            bulk_create_path: "/api/{entity}/bulk".to_string(),
            bulk_update_path: "/api/{entity}/bulk".to_string(),
            request_timeout_secs: 30,
            auth_token: None,
        }
    }
}

// ==========================================
// ConsoleConfig - 控制台配置
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsoleConfig {
    pub backend: BackendConfig,
    /// CSV 分隔符（单个 ASCII 字符）
    pub delimiter: char,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            backend: BackendConfig::default(),
            delimiter: ',',
        }
    }
}

impl ConsoleConfig {
    /// 校验分隔符：单个 ASCII 字符，且不能是引号或换行
    pub fn validate(&self) -> Result<(), ConfigError> {
        let reason = if !self.delimiter.is_ascii() {
            Some("delimiter must be an ASCII character")
        } else if matches!(self.delimiter, '"' | '\n' | '\r') {
            Some("delimiter cannot be a quote or line break")
        } else {
            None
        };

        match reason {
            Some(message) => Err(ConfigError::ValueError {
                key: "delimiter".to_string(),
                value: self.delimiter.escape_default().to_string(),
                message: message.to_string(),
            }),
            None => Ok(()),
        }
    }

    /// 分隔符字节（非法字符在加载阶段已拒绝）
    pub fn delimiter_byte(&self) -> u8 {
        if self.delimiter.is_ascii() {
            self.delimiter as u8
        } else {
            b','
        }
    }
}

// ==========================================
// ConfigManager - 配置管理器
// ==========================================
pub struct ConfigManager;

impl ConfigManager {
    /// 默认配置文件路径
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_DIR).join(CONFIG_FILE))
    }

    /// 加载配置（默认路径 + 进程环境变量）
    pub fn load() -> Result<ConsoleConfig, ConfigError> {
        let base = match Self::default_config_path() {
            Some(path) if path.exists() => Self::from_file(&path)?,
            _ => ConsoleConfig::default(),
        };
        Self::apply_env(base, |key| std::env::var(key).ok())
    }

    /// 从指定 JSON 文件加载（缺失字段取默认值）
    pub fn from_file(path: &Path) -> Result<ConsoleConfig, ConfigError> {
        let path_str = path.display().to_string();
        let raw = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path_str.clone(),
            message: e.to_string(),
        })?;

        let config: ConsoleConfig =
            serde_json::from_str(&raw).map_err(|e| ConfigError::FormatError {
                path: path_str.clone(),
                message: e.to_string(),
            })?;
        config.validate()?;

        info!(path = %path_str, "配置文件已加载");
        Ok(config)
    }

    /// 应用环境变量覆写
    ///
    /// # 参数
    /// - config: 基础配置
    /// - lookup: 环境变量读取函数（测试中可注入）
    pub fn apply_env<F>(mut config: ConsoleConfig, lookup: F) -> Result<ConsoleConfig, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(config_keys::BACKEND_URL) {
            debug!(key = config_keys::BACKEND_URL, "环境变量覆写");
            config.backend.base_url = url;
        }

        if let Some(token) = lookup(config_keys::AUTH_TOKEN) {
            config.backend.auth_token = Some(token).filter(|t| !t.is_empty());
        }

        if let Some(raw) = lookup(config_keys::TIMEOUT_SECS) {
            config.backend.request_timeout_secs =
                raw.trim().parse().map_err(|_| ConfigError::ValueError {
                    key: config_keys::TIMEOUT_SECS.to_string(),
                    value: raw.clone(),
                    message: "expected a whole number of seconds".to_string(),
                })?;
        }

        if let Some(raw) = lookup(config_keys::DELIMITER) {
            let mut chars = raw.chars();
            config.delimiter = match (chars.next(), chars.next()) {
                (Some(c), None) => c,
                _ => {
                    return Err(ConfigError::ValueError {
                        key: config_keys::DELIMITER.to_string(),
                        value: raw,
                        message: "expected a single character".to_string(),
                    })
                }
            };
        }

        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ConsoleConfig::default();
        assert_eq!(config.delimiter, ',');
        assert_eq!(config.backend.request_timeout_secs, 30);
        assert!(config.backend.auth_token.is_none());
    }

    #[test]
    fn test_env_overrides() {
        let config = ConfigManager::apply_env(
            ConsoleConfig::default(),
            env(&[
                (config_keys::BACKEND_URL, "https://deploy.internal"),
                (config_keys::AUTH_TOKEN, "secret"),
                (config_keys::TIMEOUT_SECS, "5"),
                (config_keys::DELIMITER, ";"),
            ]),
        )
        .unwrap();

        assert_eq!(config.backend.base_url, "https://deploy.internal");
        assert_eq!(config.backend.auth_token.as_deref(), Some("secret"));
        assert_eq!(config.backend.request_timeout_secs, 5);
        assert_eq!(config.delimiter_byte(), b';');
    }

    #[test]
    fn test_invalid_timeout_rejected() {
        let result = ConfigManager::apply_env(
            ConsoleConfig::default(),
            env(&[(config_keys::TIMEOUT_SECS, "soon")]),
        );
        assert!(matches!(result, Err(ConfigError::ValueError { .. })));
    }

    #[test]
    fn test_multi_char_delimiter_rejected() {
        let result = ConfigManager::apply_env(
            ConsoleConfig::default(),
            env(&[(config_keys::DELIMITER, "||")]),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_from_file_partial_json() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{"backend": {{"base_url": "http://backend:9000"}}}}"#).unwrap();

        let config = ConfigManager::from_file(file.path()).unwrap();

        assert_eq!(config.backend.base_url, "http://backend:9000");
        assert_eq!(config.backend.bulk_create_path, "/api/{entity}/bulk");
        assert_eq!(config.delimiter, ',');
    }

    #[test]
    fn test_from_file_invalid_json() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();

        let result = ConfigManager::from_file(file.path());
        assert!(matches!(result, Err(ConfigError::FormatError { .. })));
    }

    #[test]
    fn test_from_file_rejects_non_ascii_delimiter() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{"delimiter": "；"}}"#).unwrap();

        let result = ConfigManager::from_file(file.path());
        assert!(matches!(result, Err(ConfigError::ValueError { .. })));
    }

    #[test]
    fn test_quote_and_line_break_delimiters_rejected() {
        for raw in ["\"", "\n", "\r"] {
            let result =
                ConfigManager::apply_env(ConsoleConfig::default(), env(&[(config_keys::DELIMITER, raw)]));
            assert!(
                matches!(result, Err(ConfigError::ValueError { .. })),
                "{:?} should be rejected",
                raw
            );
        }
    }
}
