//! Error types for SinkLog
//!
//! This module defines all error types used throughout the SinkLog facility.
//! Configuration-time failures are returned to the caller; per-sink write
//! failures during emission are isolated and only counted.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for SinkLog operations
#[derive(Error, Debug)]
pub enum SinkLogError {
    /// I/O errors (opening or writing a destination)
    #[error("I/O error{}: {source}", describe_path(.path))]
    IoError {
        path: Option<PathBuf>,
        #[source]
        source: std::io::Error,
    },

    /// 消息体格式化失败（调用点的编程错误）
    #[error("Format error: {0}")]
    FormatError(String),

    /// 级别位超出六个已定义级别的范围
    #[error("Level set bits outside the defined levels: {0:#010b}")]
    ConfigInvariantError(u8),

    /// Invalid log level name
    #[error("Invalid log level: {0}")]
    InvalidLogLevel(String),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

fn describe_path(path: &Option<PathBuf>) -> String {
    path.as_ref()
        .map(|p| format!(" on {}", p.display()))
        .unwrap_or_default()
}

impl From<std::io::Error> for SinkLogError {
    fn from(source: std::io::Error) -> Self {
        Self::IoError { path: None, source }
    }
}

/// Result type alias for SinkLog operations
pub type Result<T> = std::result::Result<T, SinkLogError>;

impl SinkLogError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Self::ConfigError(msg.into())
    }

    /// 创建带路径信息的 I/O 错误
    pub fn io_at<P: Into<PathBuf>>(path: P, source: std::io::Error) -> Self {
        Self::IoError {
            path: Some(path.into()),
            source,
        }
    }

    /// Check if this error is recoverable
    ///
    /// Only I/O failures may succeed on retry; everything else is a
    /// programming or configuration mistake.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::IoError { .. })
    }

    /// Get the error category for logging purposes
    pub fn category(&self) -> &'static str {
        match self {
            Self::IoError { .. } => "io",
            Self::FormatError(_) => "format",
            Self::ConfigInvariantError(_) | Self::InvalidLogLevel(_) | Self::ConfigError(_) => {
                "config"
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_error_creation() {
        let config_err = SinkLogError::config("Invalid configuration");
        assert!(matches!(config_err, SinkLogError::ConfigError(_)));
        assert_eq!(
            config_err.to_string(),
            "Configuration error: Invalid configuration"
        );
    }

    #[test]
    fn test_error_from_io() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "File not found");
        let err: SinkLogError = io_error.into();
        assert!(matches!(err, SinkLogError::IoError { path: None, .. }));
        assert_eq!(err.to_string(), "I/O error: File not found");
    }

    #[test]
    fn test_io_error_with_path() {
        let io_error = io::Error::new(io::ErrorKind::PermissionDenied, "Access denied");
        let err = SinkLogError::io_at("/var/log/app.log", io_error);
        let msg = err.to_string();
        assert!(msg.contains("/var/log/app.log"));
        assert!(msg.contains("Access denied"));
    }

    #[test]
    fn test_invariant_error_display() {
        let err = SinkLogError::ConfigInvariantError(0b1100_0000);
        assert_eq!(
            err.to_string(),
            "Level set bits outside the defined levels: 0b11000000"
        );
    }

    #[test]
    fn test_error_recoverability() {
        let io_error = io::Error::new(io::ErrorKind::Interrupted, "eintr");
        assert!(SinkLogError::from(io_error).is_recoverable());
        assert!(!SinkLogError::config("bad").is_recoverable());
        assert!(!SinkLogError::FormatError("fmt".into()).is_recoverable());
        assert!(!SinkLogError::ConfigInvariantError(0x40).is_recoverable());
    }

    #[test]
    fn test_error_categories() {
        assert_eq!(SinkLogError::config("test").category(), "config");
        assert_eq!(SinkLogError::InvalidLogLevel("x".into()).category(), "config");
        assert_eq!(SinkLogError::FormatError("x".into()).category(), "format");
        let io_error = io::Error::new(io::ErrorKind::Other, "x");
        assert_eq!(SinkLogError::from(io_error).category(), "io");
    }

    #[test]
    fn test_unicode_error_message() {
        let unicode_msg = "配置错误: 无效的参数 🚫";
        let err = SinkLogError::config(unicode_msg);
        assert!(err.to_string().contains(unicode_msg));
    }
}
