use thiserror::Error;

pub const VALIDATION_MESSAGE: &str = "Please enter a German city, district or postal code.";
pub const GEOCODING_UNAVAILABLE_MESSAGE: &str = "Geocoding service unavailable at the moment.";
pub const LOCATION_NOT_FOUND_MESSAGE: &str =
    "No German location found. Try another city or district.";

#[derive(Error, Debug)]
pub enum ScoutError {
    #[error("{message}")]
    ValidationError { message: String },

    #[error("Geocoding service unavailable at the moment.")]
    GeocodingUnavailable { reason: String },

    #[error("No German location found. Try another city or district.")]
    LocationNotFound { query: String },

    #[error("HTTP client error: {0}")]
    HttpClientError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

impl ScoutError {
    pub fn validation() -> Self {
        Self::ValidationError {
            message: VALIDATION_MESSAGE.to_string(),
        }
    }

    pub fn geocoding_unavailable<S: Into<String>>(reason: S) -> Self {
        Self::GeocodingUnavailable {
            reason: reason.into(),
        }
    }

    pub fn location_not_found<S: Into<String>>(query: S) -> Self {
        Self::LocationNotFound {
            query: query.into(),
        }
    }

    /// Whether this error ends a search run. Every variant that can come out
    /// of the orchestrator does; the rest only occur during setup.
    pub fn aborts_search(&self) -> bool {
        matches!(
            self,
            Self::ValidationError { .. }
                | Self::GeocodingUnavailable { .. }
                | Self::LocationNotFound { .. }
        )
    }

    /// Text shown to the user as the terminal status line.
    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::ValidationError { .. }
            | Self::GeocodingUnavailable { .. }
            | Self::LocationNotFound { .. } => self.to_string(),
            Self::HttpClientError(_) => "Could not set up the HTTP client.".to_string(),
            Self::IoError(_) => "Could not read a local file.".to_string(),
            Self::ConfigError { .. }
            | Self::ConfigValidationError { .. }
            | Self::InvalidConfigValueError { .. } => {
                format!("Configuration problem: {}", self)
            }
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            Self::ValidationError { .. } => "Pass a non-empty --location value.",
            Self::GeocodingUnavailable { .. } => {
                "Check your network connection and try again in a moment."
            }
            Self::LocationNotFound { .. } => {
                "Try a larger nearby city, a district name or a postal code."
            }
            Self::HttpClientError(_) => "Check the configured user agent and timeouts.",
            Self::IoError(_) => "Check that the config file exists and is readable.",
            Self::ConfigError { .. }
            | Self::ConfigValidationError { .. }
            | Self::InvalidConfigValueError { .. } => "Fix the config file and run again.",
        }
    }

    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ValidationError { .. } => 1,
            Self::LocationNotFound { .. } => 2,
            _ => 3,
        }
    }
}

pub type Result<T> = std::result::Result<T, ScoutError>;
