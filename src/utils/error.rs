use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("HTTP client error: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("Invalid header value: {0}")]
    HeaderError(#[from] hyper::header::InvalidHeaderValue),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Configuration validation failed for {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Dataset error: {message}")]
    DatasetError { message: String },

    #[error("Validation error: {message}")]
    ValidationError { message: String },
}

/// LLM 呼叫失敗的原因，由比較流程改以 mock 回應取代
#[derive(Error, Debug)]
pub enum LlmError {
    #[error("no API key configured")]
    MissingCredentials,

    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("provider returned {status}: {body}")]
    Provider { status: u16, body: String },

    #[error("provider response contained no text")]
    EmptyResponse,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Data,
    Configuration,
    Validation,
    System,
}

impl AppError {
    pub fn validation(message: impl Into<String>) -> Self {
        AppError::ValidationError {
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            AppError::ApiError(_) => ErrorCategory::Network,
            AppError::CsvError(_) | AppError::SerializationError(_) | AppError::DatasetError { .. } => {
                ErrorCategory::Data
            }
            AppError::ConfigError { .. }
            | AppError::InvalidConfigValueError { .. }
            | AppError::ConfigValidationError { .. } => ErrorCategory::Configuration,
            AppError::ValidationError { .. } => ErrorCategory::Validation,
            AppError::IoError(_) | AppError::HeaderError(_) => ErrorCategory::System,
        }
    }

    /// 對應到 HTTP 狀態碼
    pub fn status_code(&self) -> u16 {
        match self.category() {
            ErrorCategory::Validation => 400,
            _ => 500,
        }
    }

    /// 回傳給 API 呼叫端的訊息
    pub fn user_friendly_message(&self) -> String {
        match self {
            AppError::ValidationError { message } => message.clone(),
            other => match other.category() {
                ErrorCategory::Network => "Upstream request failed".to_string(),
                ErrorCategory::Data => format!("Dataset could not be processed: {}", other),
                _ => other.to_string(),
            },
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Network => "Check network connectivity and the configured endpoint",
            ErrorCategory::Data => "Check that the dataset CSV exists and every row has the same columns",
            ErrorCategory::Configuration => "Review the TOML config file and command line flags",
            ErrorCategory::Validation => "Fix the request payload and retry",
            ErrorCategory::System => "Check file permissions and available disk space",
        }
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
