use thiserror::Error;

#[derive(Error, Debug)]
pub enum DashError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Dataset request to {url} returned status {status}")]
    HttpStatus { url: String, status: u16 },

    #[error("CSV processing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

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

    #[error("Validation error: {message}")]
    ValidationError { message: String },

    #[error("Unknown launch site: {site}")]
    UnknownSite { site: String },

    #[error("Invalid payload range: [{low}, {high}]")]
    InvalidRange { low: f64, high: f64 },

    #[error("Server error: {message}")]
    ServerError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Data,
    Configuration,
    Request,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl DashError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            DashError::Http(_) | DashError::HttpStatus { .. } => ErrorCategory::Network,
            DashError::Csv(_) | DashError::Serialization(_) | DashError::ValidationError { .. } => {
                ErrorCategory::Data
            }
            DashError::ConfigError { .. }
            | DashError::ConfigValidationError { .. }
            | DashError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            DashError::UnknownSite { .. } | DashError::InvalidRange { .. } => {
                ErrorCategory::Request
            }
            DashError::Io(_) | DashError::ServerError { .. } => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Request => ErrorSeverity::Low,
            ErrorCategory::Network => ErrorSeverity::Medium,
            ErrorCategory::Data | ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    /// 是否為使用者請求造成的錯誤 (對應 HTTP 400)
    pub fn is_client_error(&self) -> bool {
        self.category() == ErrorCategory::Request
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            DashError::Http(_) | DashError::HttpStatus { .. } => {
                "Could not download the launch dataset".to_string()
            }
            DashError::Csv(_) | DashError::ValidationError { .. } => {
                format!("The launch dataset could not be read: {}", self)
            }
            DashError::UnknownSite { site } => format!("'{}' is not a known launch site", site),
            DashError::InvalidRange { .. } => {
                "The payload range must be two numbers with low <= high".to_string()
            }
            DashError::ConfigError { .. }
            | DashError::ConfigValidationError { .. }
            | DashError::InvalidConfigValueError { .. } => format!("Invalid configuration: {}", self),
            _ => self.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Network => {
                "Check the network connection and --dataset-url, or use --dataset-path with a local copy"
            }
            ErrorCategory::Data => {
                "Make sure the CSV has the columns 'Launch Site', 'Payload Mass (kg)', 'class' and 'Booster Version Category'"
            }
            ErrorCategory::Configuration => "Check the command line flags and the TOML config file",
            ErrorCategory::Request => "Pick a site from the dropdown and a valid payload range",
            ErrorCategory::System => "Check file permissions and that the port is free",
        }
    }
}

pub type Result<T> = std::result::Result<T, DashError>;
