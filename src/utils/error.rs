use thiserror::Error;

use crate::domain::model::ViewState;

#[derive(Error, Debug)]
pub enum IntakeError {
    #[error("Unsupported document type: {name} ({media_type})")]
    UnsupportedType { name: String, media_type: String },

    #[error("Document too large: {size_bytes} bytes (limit: {limit} bytes)")]
    TooLarge { size_bytes: usize, limit: usize },

    #[error("Extraction yielded too little usable text ({chars} characters)")]
    LowYieldExtraction { chars: usize },

    #[error("Document contained no extractable text")]
    EmptyDocument,

    #[error("Job description too short: {word_count} words ({deficit} more needed)")]
    InsufficientInput { word_count: usize, deficit: usize },

    #[error("Request timed out")]
    NetworkTimeout,

    #[error("Service rejected the request: {reason}")]
    ServiceRejected { reason: String },

    #[error("PDF export failed: {reason}")]
    ExportFailure { reason: String },

    #[error("Illegal view transition: {from} -> {to}")]
    IllegalTransition { from: ViewState, to: ViewState },

    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Invalid value for {field}: '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Configuration error in {field}: {message}")]
    ConfigValidationError { field: String, message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Network,
    State,
    Config,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl IntakeError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            IntakeError::UnsupportedType { .. }
            | IntakeError::TooLarge { .. }
            | IntakeError::LowYieldExtraction { .. }
            | IntakeError::EmptyDocument
            | IntakeError::InsufficientInput { .. } => ErrorCategory::Input,

            IntakeError::NetworkTimeout
            | IntakeError::ServiceRejected { .. }
            | IntakeError::ExportFailure { .. }
            | IntakeError::ApiError(_) => ErrorCategory::Network,

            IntakeError::IllegalTransition { .. } => ErrorCategory::State,

            IntakeError::InvalidConfigValueError { .. }
            | IntakeError::MissingConfigError { .. }
            | IntakeError::ConfigValidationError { .. } => ErrorCategory::Config,

            IntakeError::IoError(_) | IntakeError::SerializationError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            // 輸入錯誤可由使用者就地修正
            ErrorCategory::Input => ErrorSeverity::Low,
            // 網路錯誤可重試，整個 session 重新開始
            ErrorCategory::Network => ErrorSeverity::Medium,
            ErrorCategory::State => ErrorSeverity::High,
            ErrorCategory::Config | ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            IntakeError::UnsupportedType { .. } => {
                "Upload a .txt, .pdf or .docx file, or paste the text directly"
            }
            IntakeError::TooLarge { .. } => "Upload a file under 5 MiB",
            IntakeError::LowYieldExtraction { .. } | IntakeError::EmptyDocument => {
                "The document could not be read reliably; paste the text instead"
            }
            IntakeError::InsufficientInput { .. } => {
                "Provide the full job description (at least 50 words)"
            }
            IntakeError::NetworkTimeout => "Check the backend and re-run the analysis",
            IntakeError::ServiceRejected { .. } => {
                "Check the backend logs and re-run the analysis"
            }
            IntakeError::ExportFailure { .. } => "Retry the export once the backend is reachable",
            IntakeError::IllegalTransition { .. } => "Navigate from the dashboard or editor",
            IntakeError::ApiError(_) => "Verify the API base URL and that the backend is running",
            IntakeError::IoError(_) => "Check file paths and permissions",
            IntakeError::SerializationError(_) => "Check the resume snapshot JSON",
            IntakeError::InvalidConfigValueError { .. }
            | IntakeError::MissingConfigError { .. }
            | IntakeError::ConfigValidationError { .. } => {
                "Fix the configuration value and restart"
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            IntakeError::UnsupportedType { name, .. } => {
                format!("'{}' is not a supported file type (.txt, .pdf, .docx)", name)
            }
            IntakeError::TooLarge { size_bytes, limit } => format!(
                "File is too large ({:.1} MiB, limit {} MiB)",
                *size_bytes as f64 / (1024.0 * 1024.0),
                limit / (1024 * 1024)
            ),
            IntakeError::LowYieldExtraction { .. } => {
                "Could not extract enough text from this document; please paste the text manually"
                    .to_string()
            }
            IntakeError::EmptyDocument => {
                "The document appears to be empty; please paste the text manually".to_string()
            }
            IntakeError::InsufficientInput { deficit, .. } => {
                format!("{} more words needed", deficit)
            }
            IntakeError::NetworkTimeout => "Request timed out".to_string(),
            IntakeError::ServiceRejected { reason } => reason.clone(),
            IntakeError::ExportFailure { .. } => "Failed to download PDF".to_string(),
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, IntakeError>;
