use thiserror::Error;

#[derive(Error, Debug)]
pub enum WorkingDaysError {
    #[error("At least one of the parameters 'days' or 'hours' is required")]
    MissingInput,

    #[error("Parameter '{parameter}' must be a non-negative integer, got {value}")]
    InvalidRange { parameter: String, value: i64 },

    #[error("Invalid type for parameter '{parameter}': {reason}")]
    InvalidParameterType { parameter: String, reason: String },

    #[error("Invalid value for parameter '{parameter}': {reason}")]
    InvalidParameterValue { parameter: String, reason: String },

    #[error(
        "Parameter 'date' must be an ISO 8601 UTC instant (YYYY-MM-DDTHH:mm:ssZ), got '{value}'"
    )]
    InvalidDateFormat { value: String },

    #[error("Parameter 'date' is not a valid calendar instant: '{value}'")]
    InvalidDate { value: String },

    #[error("Parameter 'date' cannot be more than 2 years in the future: '{value}'")]
    InvalidDateRange { value: String },

    #[error("Local time {local} does not exist in timezone {timezone}")]
    NonexistentLocalTime { local: String, timezone: String },

    #[error("Holiday source request failed: {0}")]
    HolidaySourceError(#[from] reqwest::Error),

    #[error("Holiday source returned status {status} for {url}")]
    HolidaySourceStatus { url: String, status: u16 },

    #[error("Holiday list could not be parsed: {message}")]
    HolidayParseError { message: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid configuration value for {field} ('{value}'): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl WorkingDaysError {
    /// Error code sent to HTTP clients in the `error` field.
    pub fn code(&self) -> &'static str {
        match self {
            Self::MissingInput => "MissingParameters",
            Self::InvalidRange { .. } | Self::InvalidParameterValue { .. } => {
                "InvalidParameterValue"
            }
            Self::InvalidParameterType { .. } => "InvalidParameterType",
            Self::InvalidDateFormat { .. } => "InvalidDateFormat",
            Self::InvalidDate { .. } => "InvalidDate",
            Self::InvalidDateRange { .. } => "InvalidDateRange",
            Self::NonexistentLocalTime { .. } => "CalculationError",
            Self::HolidaySourceError(_)
            | Self::HolidaySourceStatus { .. }
            | Self::HolidayParseError { .. } => "HolidaySourceError",
            Self::IoError(_) | Self::SerializationError(_) => "InternalServerError",
            Self::ConfigError { .. }
            | Self::InvalidConfigValueError { .. } => "ConfigurationError",
        }
    }

    /// True for errors caused by the caller's input.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::MissingInput
                | Self::InvalidRange { .. }
                | Self::InvalidParameterType { .. }
                | Self::InvalidParameterValue { .. }
                | Self::InvalidDateFormat { .. }
                | Self::InvalidDate { .. }
                | Self::InvalidDateRange { .. }
        )
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            _ if self.is_validation() => ErrorSeverity::High,
            Self::HolidaySourceError(_) | Self::HolidaySourceStatus { .. } => {
                ErrorSeverity::Medium
            }
            Self::ConfigError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::IoError(_) => ErrorSeverity::Critical,
            _ => ErrorSeverity::High,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            Self::MissingInput => "Pass --days and/or --hours",
            Self::InvalidRange { .. } | Self::InvalidParameterValue { .. } => {
                "Use whole numbers: days between 0 and 365, hours between 0 and 720"
            }
            Self::InvalidParameterType { .. } => "Pass each parameter once, as a plain number",
            Self::InvalidDateFormat { .. } | Self::InvalidDate { .. } => {
                "Use a UTC instant such as 2025-04-10T15:00:00Z"
            }
            Self::InvalidDateRange { .. } => "Use a date at most 2 years ahead of today",
            Self::NonexistentLocalTime { .. } => "Check the configured business timezone",
            Self::HolidaySourceError(_) | Self::HolidaySourceStatus { .. } => {
                "Check network access to the holiday URL, or load holidays from a file"
            }
            Self::HolidayParseError { .. } | Self::SerializationError(_) => {
                "The holiday list must be a JSON array of YYYY-MM-DD strings"
            }
            Self::IoError(_) => "Check that the file exists and is readable",
            Self::ConfigError { .. }
            | Self::InvalidConfigValueError { .. } => "Fix the configuration file and retry",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        if self.is_validation() {
            format!("Invalid request: {}", self)
        } else {
            format!("Calculation could not be completed: {}", self)
        }
    }
}

pub type Result<T> = std::result::Result<T, WorkingDaysError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_codes_match_wire_contract() {
        assert_eq!(WorkingDaysError::MissingInput.code(), "MissingParameters");
        let err = WorkingDaysError::InvalidRange {
            parameter: "days".to_string(),
            value: -1,
        };
        assert_eq!(err.code(), "InvalidParameterValue");
        assert!(err.is_validation());
        assert_eq!(err.severity(), ErrorSeverity::High);
    }

    #[test]
    fn source_failures_are_not_validation_errors() {
        let err = WorkingDaysError::HolidaySourceStatus {
            url: "http://localhost/holidays".to_string(),
            status: 500,
        };
        assert!(!err.is_validation());
        assert_eq!(err.severity(), ErrorSeverity::Medium);
        assert!(err.user_friendly_message().starts_with("Calculation"));
    }
}
