//! Error types for the logger facade
//!
//! Log calls never fail. These errors only surface from configuration
//! parsing and from the reference sinks that own an I/O handle.

pub type Result<T> = std::result::Result<T, LoggerError>;

#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    /// IO error with context
    #[error("IO error while {operation}: {message}")]
    IoOperation {
        operation: String,
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Generic IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON (de)serialization error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Unknown level name
    #[error("Invalid log level: '{0}'")]
    InvalidLevel(String),

    /// Invalid configuration with details
    #[error("Invalid configuration for {component}: {message}")]
    InvalidConfiguration { component: String, message: String },

    /// A styling pattern failed to compile
    #[error("Invalid pattern for {option}: {source}")]
    InvalidPattern {
        option: String,
        #[source]
        source: regex::Error,
    },

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl LoggerError {
    /// Create an IO operation error with context
    pub fn io_operation(
        operation: impl Into<String>,
        message: impl Into<String>,
        source: std::io::Error,
    ) -> Self {
        LoggerError::IoOperation {
            operation: operation.into(),
            message: message.into(),
            source,
        }
    }

    /// Create an invalid configuration error
    pub fn config(component: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::InvalidConfiguration {
            component: component.into(),
            message: message.into(),
        }
    }

    /// Create an invalid pattern error for a style option
    pub fn pattern(option: impl Into<String>, source: regex::Error) -> Self {
        LoggerError::InvalidPattern {
            option: option.into(),
            source,
        }
    }

    /// Create a generic error
    pub fn other<S: Into<String>>(msg: S) -> Self {
        LoggerError::Other(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = LoggerError::config("consoleStyle", "unknown color preset");
        assert!(matches!(err, LoggerError::InvalidConfiguration { .. }));

        let err = LoggerError::InvalidLevel("loud".to_string());
        assert!(matches!(err, LoggerError::InvalidLevel(_)));
    }

    #[test]
    fn test_error_display() {
        let err = LoggerError::config("replace", "expected \"collapse\"");
        assert_eq!(
            err.to_string(),
            "Invalid configuration for replace: expected \"collapse\""
        );

        let err = LoggerError::InvalidLevel("verbose".to_string());
        assert_eq!(err.to_string(), "Invalid log level: 'verbose'");
    }

    #[test]
    fn test_pattern_error() {
        let source = regex::Regex::new("(unclosed").unwrap_err();
        let err = LoggerError::pattern("bold", source);

        assert!(matches!(err, LoggerError::InvalidPattern { .. }));
        assert!(err.to_string().starts_with("Invalid pattern for bold"));
    }

    #[test]
    fn test_io_operation_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "pipe closed");
        let err = LoggerError::io_operation("writing json line", "sink closed", io_err);

        assert!(matches!(err, LoggerError::IoOperation { .. }));
        assert!(err.to_string().contains("writing json line"));
        assert!(err.to_string().contains("sink closed"));
    }
}
