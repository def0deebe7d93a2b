use thiserror::Error;

/// 單一路線查價失敗，只影響該路線
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FetchError {
    #[error("Transport failure (status: {status:?}): {message}")]
    Transport { status: Option<u16>, message: String },

    #[error("No fare chart entry for {date}")]
    NotFound { date: String },

    #[error("No sellable fare for {date} (priceType: {price_type})")]
    Unavailable { date: String, price_type: String },
}

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        FetchError::Transport {
            status: e.status().map(|s| s.as_u16()),
            message: e.to_string(),
        }
    }
}

#[derive(Error, Debug)]
pub enum MonitorError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("API version resolution failed: {message}")]
    VersionResolution { message: String },

    #[error("Cannot persist state at {path}: {source}")]
    Persistence {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Missing configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Configuration error in {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Notification delivery failed: {message}")]
    NotificationError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl MonitorError {
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            MonitorError::VersionResolution { .. }
            | MonitorError::NotificationError { .. } => ErrorSeverity::Low,
            MonitorError::ApiError(_) | MonitorError::SerializationError(_) => {
                ErrorSeverity::Medium
            }
            MonitorError::MissingConfigError { .. }
            | MonitorError::InvalidConfigValueError { .. }
            | MonitorError::ConfigValidationError { .. } => ErrorSeverity::High,
            MonitorError::IoError(_) | MonitorError::Persistence { .. } => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            MonitorError::ApiError(_) => {
                "The upstream API may be throttling requests; the next pass will try again"
            }
            MonitorError::VersionResolution { .. } => {
                "The last known API version stays in use until discovery succeeds"
            }
            MonitorError::Persistence { .. } | MonitorError::IoError(_) => {
                "Check that the data directory exists, is writable and the disk is not full"
            }
            MonitorError::MissingConfigError { .. } => {
                "Add the missing value to the config file or the .env file"
            }
            MonitorError::InvalidConfigValueError { .. }
            | MonitorError::ConfigValidationError { .. } => "Fix the config file and restart",
            MonitorError::SerializationError(_) => "Check that the JSON data files are valid",
            MonitorError::NotificationError { .. } => {
                "Check the Telegram token and chat id"
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.severity() {
            ErrorSeverity::Critical => format!("Fatal: {}", self),
            _ => self.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, MonitorError>;
