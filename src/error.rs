//! Error handling for confchain
//!
//! Reload has exactly one failure: a required variable was unset or empty.
//! Errors raised by an inner layer reach the caller unchanged.

use thiserror::Error;

/// Result type alias for configuration operations
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Error returned by a failed reload
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{variable} environment variable is not set")]
    MissingRequiredValue { variable: String },
}

impl ConfigError {
    pub(crate) fn missing(variable: impl Into<String>) -> Self {
        ConfigError::MissingRequiredValue {
            variable: variable.into(),
        }
    }

    /// Get the error code for this error type
    pub fn error_code(&self) -> &'static str {
        match self {
            ConfigError::MissingRequiredValue { .. } => "MISSING_REQUIRED_VALUE",
        }
    }

    /// Name of the environment variable that caused the failure
    pub fn variable(&self) -> &str {
        match self {
            ConfigError::MissingRequiredValue { variable } => variable,
        }
    }

    /// Check if this error is recoverable
    ///
    /// The chain keeps its previous values, so callers can carry on with them.
    pub fn is_recoverable(&self) -> bool {
        match self {
            ConfigError::MissingRequiredValue { .. } => true,
        }
    }

    /// Get recovery suggestions for this error
    pub fn recovery_suggestions(&self) -> Vec<&'static str> {
        match self {
            ConfigError::MissingRequiredValue { .. } => vec![
                "Export the variable with a non-empty value and reload",
                "Switch the field to a default-filling policy",
                "Previous configuration values are still in effect",
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_message_names_variable() {
        let err = ConfigError::missing("PORT");
        assert_eq!(err.to_string(), "PORT environment variable is not set");
        assert_eq!(err.variable(), "PORT");
    }

    #[test]
    fn test_error_codes() {
        let err = ConfigError::missing("DB_ADDRESS");
        assert_eq!(err.error_code(), "MISSING_REQUIRED_VALUE");
    }

    #[test]
    fn test_recovery_suggestions() {
        let err = ConfigError::missing("ADDRESS");
        assert!(!err.recovery_suggestions().is_empty());
        assert!(err.is_recoverable());
    }
}
