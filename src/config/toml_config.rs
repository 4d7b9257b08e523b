use crate::core::cost::Pricing;
use crate::utils::error::{AppError, Result};
use crate::utils::validation::{
    validate_file_extension, validate_non_empty_string, validate_path, validate_positive_number,
    validate_range, validate_url, Validate,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const API_KEY_ENV: &str = "GEMINI_API_KEY";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TomlConfig {
    pub server: ServerConfig,
    pub dataset: DatasetConfig,
    pub llm: LlmConfig,
    pub pricing: Pricing,
    pub cors: CorsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
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

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatasetConfig {
    pub path: String,
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            path: "data/job_records.csv".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    pub endpoint: String,
    pub model: String,
    pub api_key: Option<String>,
    pub temperature: f32,
    pub max_output_tokens: u32,
    pub timeout_seconds: u64,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            model: "gemini-2.5-flash-lite".to_string(),
            api_key: None,
            temperature: 0.7,
            max_output_tokens: 2048,
            timeout_seconds: 60,
        }
    }
}

impl LlmConfig {
    /// 空字串或未被替換的 `${...}` 視為未設定
    pub fn resolved_api_key(&self) -> Option<String> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty() && !(key.starts_with("${") && key.ends_with('}')))
            .map(str::to_string)
    }

    /// 設定檔沒有可用的金鑰時改用 GEMINI_API_KEY 環境變數
    pub fn fill_api_key_from_env(&mut self) {
        if self.resolved_api_key().is_none() {
            self.api_key = std::env::var(API_KEY_ENV).ok();
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: vec![
                "http://localhost:3000".to_string(),
                "http://localhost:5173".to_string(),
            ],
        }
    }
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(AppError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| AppError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${GEMINI_API_KEY})，找不到的變數保留原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| AppError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("server.host", &self.server.host)?;
        validate_positive_number("server.port", u64::from(self.server.port), 1)?;

        validate_path("dataset.path", &self.dataset.path)?;
        validate_file_extension("dataset.path", &self.dataset.path, &["csv"])?;

        validate_url("llm.endpoint", &self.llm.endpoint)?;
        validate_non_empty_string("llm.model", &self.llm.model)?;
        validate_range("llm.temperature", self.llm.temperature, 0.0, 2.0)?;
        validate_positive_number("llm.max_output_tokens", u64::from(self.llm.max_output_tokens), 1)?;
        validate_positive_number("llm.timeout_seconds", self.llm.timeout_seconds, 1)?;

        validate_range("pricing.input_per_million", self.pricing.input_per_million, 0.0, 1000.0)?;
        validate_range("pricing.output_per_million", self.pricing.output_per_million, 0.0, 1000.0)?;

        for origin in &self.cors.allowed_origins {
            validate_url("cors.allowed_origins", origin)?;
        }

        Ok(())
    }
}
