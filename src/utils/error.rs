use thiserror::Error;

#[derive(Error, Debug)]
pub enum WatchError {
    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid configuration value for {field} ('{value}'): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Page request failed: {0}")]
    FetchError(#[from] reqwest::Error),

    #[error("Page request returned HTTP {status}")]
    HttpStatusError { status: u16 },

    #[error("TOEFL quantity not found")]
    QuantityNotFound,

    #[error("Malformed quantity '{value}': {source}")]
    MalformedQuantity {
        value: String,
        #[source]
        source: std::num::ParseIntError,
    },

    #[error("Email delivery failed: {message}")]
    DeliveryError { message: String },
}

/// Where an error came from, following the per-cycle error taxonomy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Config,
    Fetch,
    Extraction,
    Notification,
}

impl WatchError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            WatchError::MissingConfigError { .. }
            | WatchError::InvalidConfigValueError { .. }
            | WatchError::ConfigError { .. } => ErrorCategory::Config,
            WatchError::FetchError(_) | WatchError::HttpStatusError { .. } => ErrorCategory::Fetch,
            WatchError::QuantityNotFound | WatchError::MalformedQuantity { .. } => {
                ErrorCategory::Extraction
            }
            WatchError::DeliveryError { .. } => ErrorCategory::Notification,
        }
    }

    /// Only configuration problems stop the process; everything else is contained to one cycle.
    pub fn is_fatal(&self) -> bool {
        self.category() == ErrorCategory::Config
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            WatchError::MissingConfigError { field } => {
                format!("Set {} in the environment or in the .env file", field)
            }
            WatchError::InvalidConfigValueError { field, .. } => {
                format!("Check the value of {}", field)
            }
            WatchError::ConfigError { .. } => "Check the .env file path and contents".to_string(),
            WatchError::FetchError(e) if e.is_timeout() => {
                "The page did not answer within 15 seconds; the next cycle will try again"
                    .to_string()
            }
            WatchError::FetchError(_) | WatchError::HttpStatusError { .. } => {
                "Check that CHECK_URL is reachable".to_string()
            }
            WatchError::QuantityNotFound | WatchError::MalformedQuantity { .. } => {
                "The page layout may have changed".to_string()
            }
            WatchError::DeliveryError { .. } => {
                "Check SMTP host, port and credentials".to_string()
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, WatchError>;
