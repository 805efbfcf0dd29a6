//! Unified error hierarchy for RecoveryRS
//!
//! The recovery estimator itself never fails; these errors cover history
//! import, report export and configuration handling.

use std::path::PathBuf;
use thiserror::Error;

/// Top-level error type for all RecoveryRS operations
#[derive(Debug, Error)]
pub enum RecoveryRsError {
    /// History import errors
    #[error("Import error: {0}")]
    Import(#[from] ImportError),

    /// Report export errors
    #[error("Export error: {0}")]
    Export(#[from] ExportError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration file errors
    #[error("Configuration error: {0}")]
    Configuration(String),
}

/// History import errors
#[derive(Debug, Error)]
pub enum ImportError {
    /// File not found at specified path
    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Unsupported format
    #[error("Unsupported format: {format}")]
    UnsupportedFormat { format: String },

    /// Format-specific parsing error
    #[error("Parse error in {format}: {reason}")]
    ParseError { format: String, reason: String },

    /// Missing required column or field
    #[error("Missing required data: {field}")]
    MissingData { field: String },

    /// Field present but out of range or malformed
    #[error("Invalid value for {field} at row {row}: {value}")]
    InvalidValue {
        field: String,
        row: usize,
        value: String,
    },
}

/// Report export errors
#[derive(Debug, Error)]
pub enum ExportError {
    /// Unsupported format
    #[error("Unsupported export format: {format}")]
    UnsupportedFormat { format: String },

    /// Writing the output failed
    #[error("Export failed to {path}: {reason}")]
    ExportFailed { path: PathBuf, reason: String },

    /// Serialization failed
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Result type alias for RecoveryRS operations
pub type Result<T> = std::result::Result<T, RecoveryRsError>;

impl RecoveryRsError {
    /// Get error severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            RecoveryRsError::Import(ImportError::FileNotFound { .. }) => ErrorSeverity::Warning,
            RecoveryRsError::Import(ImportError::InvalidValue { .. }) => ErrorSeverity::Warning,
            _ => ErrorSeverity::Error,
        }
    }

    /// Get user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            RecoveryRsError::Import(ImportError::FileNotFound { path }) => {
                format!("Could not find training history: {}", path.display())
            }
            RecoveryRsError::Import(ImportError::UnsupportedFormat { format }) => {
                format!("Unsupported history file format '{}'.", format)
            }
            RecoveryRsError::Import(ImportError::InvalidValue { field, row, value }) => {
                format!(
                    "Row {} of the history has an invalid {}: '{}'",
                    row, field, value
                )
            }
            _ => self.to_string(),
        }
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    /// Error that prevents operation but system can continue
    Error,
    /// Warning that doesn't prevent operation
    Warning,
}

impl ErrorSeverity {
    /// Convert to tracing level
    pub fn to_tracing_level(&self) -> tracing::Level {
        match self {
            ErrorSeverity::Error => tracing::Level::ERROR,
            ErrorSeverity::Warning => tracing::Level::WARN,
        }
    }
}
