use thiserror::Error;

/// 模型 adapter 內部錯誤，作為 `ServeError::PredictionFailed` 的 source
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ModelError {
    #[error("expected {expected} features, got {actual}")]
    FeatureCountMismatch { expected: usize, actual: usize },

    #[error("estimator produced a non-finite value: {value}")]
    NonFiniteOutput { value: f64 },

    #[error("ensemble contains no trees")]
    EmptyEnsemble,

    #[error("tree {tree} is malformed: {reason}")]
    MalformedTree { tree: usize, reason: String },
}

#[derive(Error, Debug)]
pub enum ServeError {
    #[error("Artifact not found: {path}")]
    ArtifactNotFound { path: String },

    #[error("Artifact is corrupt: {path} ({reason})")]
    ArtifactCorrupt { path: String, reason: String },

    #[error("Missing required field: {field}")]
    MissingField { field: &'static str },

    #[error("Field '{field}' must be numeric, got {found}")]
    InvalidType {
        field: &'static str,
        found: &'static str,
    },

    #[error("Invalid request payload: {reason}")]
    InvalidPayload { reason: String },

    #[error("Scaling transform expects {expected} features but the feature vector has {actual}")]
    ScalingDimensionMismatch { expected: usize, actual: usize },

    #[error("Prediction failed: {source}")]
    PredictionFailed {
        #[source]
        source: ModelError,
    },

    #[error("Prediction endpoint returned {status}: {message}")]
    RemoteError { status: u16, message: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration error in '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

pub type Result<T> = std::result::Result<T, ServeError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Artifact,
    Request,
    Prediction,
    Configuration,
    Network,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl ServeError {
    pub fn prediction_failed(source: ModelError) -> Self {
        ServeError::PredictionFailed { source }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            ServeError::ArtifactNotFound { .. } | ServeError::ArtifactCorrupt { .. } => {
                ErrorCategory::Artifact
            }
            ServeError::MissingField { .. }
            | ServeError::InvalidType { .. }
            | ServeError::InvalidPayload { .. } => ErrorCategory::Request,
            ServeError::ScalingDimensionMismatch { .. } | ServeError::PredictionFailed { .. } => {
                ErrorCategory::Prediction
            }
            ServeError::RemoteError { .. } | ServeError::HttpError(_) => ErrorCategory::Network,
            ServeError::ConfigError { .. }
            | ServeError::ConfigValidationError { .. }
            | ServeError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            ServeError::IoError(_)
            | ServeError::SerializationError(_)
            | ServeError::CsvError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            // 啟動時載入失敗，服務不可啟動
            ErrorCategory::Artifact => ErrorSeverity::Critical,
            ErrorCategory::Request => ErrorSeverity::Low,
            // 通常代表 scaler / estimator 版本不相容，需要告警
            ErrorCategory::Prediction => ErrorSeverity::High,
            ErrorCategory::Network => ErrorSeverity::Medium,
            ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    /// 是否應回給呼叫端 400 (只拒絕這一筆請求)
    pub fn is_client_error(&self) -> bool {
        self.category() == ErrorCategory::Request
    }

    /// 出錯的欄位名稱 (僅限請求驗證錯誤)
    pub fn field(&self) -> Option<&'static str> {
        match self {
            ServeError::MissingField { field } | ServeError::InvalidType { field, .. } => {
                Some(*field)
            }
            _ => None,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            ServeError::ArtifactNotFound { .. } => {
                "Check that the model directory contains both the scaler and the estimator artifacts"
            }
            ServeError::ArtifactCorrupt { .. } => {
                "Re-export the artifacts from the training pipeline and redeploy"
            }
            ServeError::MissingField { .. }
            | ServeError::InvalidType { .. }
            | ServeError::InvalidPayload { .. } => {
                "Send a JSON object with numeric bedrooms, bathrooms, livingArea, condition and schoolsNearby"
            }
            ServeError::ScalingDimensionMismatch { .. } | ServeError::PredictionFailed { .. } => {
                "The scaler and estimator do not match this service; redeploy a compatible artifact pair"
            }
            ServeError::RemoteError { .. } | ServeError::HttpError(_) => {
                "Check that the prediction server is running and reachable"
            }
            ServeError::ConfigError { .. }
            | ServeError::ConfigValidationError { .. }
            | ServeError::InvalidConfigValueError { .. } => {
                "Review the configuration file and command line flags"
            }
            ServeError::IoError(_) | ServeError::SerializationError(_) | ServeError::CsvError(_) => {
                "Check file permissions and input file formats"
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Artifact => format!("Model artifacts could not be loaded: {}", self),
            ErrorCategory::Request => format!("Invalid request: {}", self),
            ErrorCategory::Prediction => "Prediction failed due to an internal model error".to_string(),
            ErrorCategory::Network => format!("Could not reach the prediction service: {}", self),
            ErrorCategory::Configuration => format!("Invalid configuration: {}", self),
            ErrorCategory::System => format!("System error: {}", self),
        }
    }

    /// 依嚴重程度決定 process exit code
    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }
}
