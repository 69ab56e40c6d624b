use crate::core::artifacts::{ArtifactNames, DEFAULT_MODEL_FILE, DEFAULT_SCALER_FILE};
use crate::utils::error::{Result, ServeError};
use crate::utils::validation::{
    validate_file_extensions, validate_file_name, validate_non_empty_string, validate_one_of,
    validate_path, validate_range, Validate,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const LOG_FORMATS: [&str; 2] = ["text", "json"];

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ServeConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub artifacts: ArtifactsConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 5000,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArtifactsConfig {
    pub model_dir: String,
    pub scaler_file: String,
    pub model_file: String,
}

impl Default for ArtifactsConfig {
    fn default() -> Self {
        Self {
            model_dir: "model".to_string(),
            scaler_file: DEFAULT_SCALER_FILE.to_string(),
            model_file: DEFAULT_MODEL_FILE.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// "text" 或 "json"
    pub format: String,
    /// EnvFilter 語法，例如 "house_price_serve=debug"
    pub filter: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            format: "text".to_string(),
            filter: None,
        }
    }
}

impl ServeConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(ServeError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| ServeError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${MODEL_DIR})，未設定的變數保留原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| ServeError::ConfigError {
            message: format!("invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn validate_config(&self) -> Result<()> {
        validate_non_empty_string("server.host", &self.server.host)?;
        validate_range("server.port", self.server.port, 1, u16::MAX)?;

        validate_path("artifacts.model_dir", &self.artifacts.model_dir)?;
        validate_file_name("artifacts.scaler_file", &self.artifacts.scaler_file)?;
        validate_file_name("artifacts.model_file", &self.artifacts.model_file)?;
        validate_file_extensions(
            "artifacts",
            &[
                self.artifacts.scaler_file.clone(),
                self.artifacts.model_file.clone(),
            ],
            &["json"],
        )?;
        if self.artifacts.scaler_file == self.artifacts.model_file {
            return Err(ServeError::InvalidConfigValueError {
                field: "artifacts.model_file".to_string(),
                value: self.artifacts.model_file.clone(),
                reason: "scaler and estimator must be different files".to_string(),
            });
        }

        validate_one_of("logging.format", &self.logging.format, &LOG_FORMATS)?;
        if let Some(filter) = &self.logging.filter {
            validate_non_empty_string("logging.filter", filter)?;
        }

        Ok(())
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    pub fn model_dir(&self) -> PathBuf {
        PathBuf::from(&self.artifacts.model_dir)
    }

    pub fn artifact_names(&self) -> ArtifactNames {
        ArtifactNames {
            scaler: self.artifacts.scaler_file.clone(),
            estimator: self.artifacts.model_file.clone(),
        }
    }

    pub fn json_logs(&self) -> bool {
        self.logging.format == "json"
    }
}

impl Validate for ServeConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
