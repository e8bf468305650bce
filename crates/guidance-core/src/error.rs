//! Error types and exit codes for guidance-compress
//!
//! Exit codes:
//! - 0: Success (including "no files found" and dry runs)
//! - 1: Generic failure (compressor unavailable, interrupted run, IO)
//! - 2: Usage error (bad flags/args, invalid configuration)

mod macros;

use std::path::PathBuf;

use thiserror::Error;

use crate::compressor::CompressionError;

/// Process exit codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Success (0)
    Success = 0,
    /// Generic failure (1)
    Failure = 1,
    /// Usage error - bad flags/args (2)
    Usage = 2,
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> i32 {
        code as i32
    }
}

/// Errors that can occur during guidance-compress operations
#[derive(Error, Debug)]
pub enum GuidanceError {
    // Usage errors (exit code 2)
    #[error("unknown format: {0} (expected: human, json, or records)")]
    UnknownFormat(String),

    #[error("{0}")]
    UsageError(String),

    #[error("invalid {context}: {value}")]
    InvalidValue { context: String, value: String },

    #[error("invalid config in {path:?}: {reason}")]
    InvalidConfig { path: PathBuf, reason: String },

    // Generic failures (exit code 1)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{context} not found: {value}")]
    NotFound { context: String, value: String },

    #[error("failed to {operation} {target}: {reason}")]
    FailedOperationWithTarget {
        operation: String,
        target: String,
        reason: String,
    },

    #[error(transparent)]
    Compression(#[from] CompressionError),

    #[error("{0}")]
    Other(String),

    #[error("Run interrupted with {remaining} file(s) left. Re-run to resume.")]
    Interrupted { remaining: usize },
}

impl GuidanceError {
    /// Create an error for a failed IO operation with context
    pub fn io_operation(
        operation: &str,
        path: impl std::fmt::Display,
        error: impl std::fmt::Display,
    ) -> Self {
        GuidanceError::FailedOperationWithTarget {
            operation: operation.to_string(),
            target: path.to_string(),
            reason: error.to_string(),
        }
    }

    /// Create an error for an invalid value or configuration
    pub fn invalid_value(context: &str, value: impl std::fmt::Display) -> Self {
        GuidanceError::InvalidValue {
            context: context.to_string(),
            value: value.to_string(),
        }
    }

    /// Create an error for an entity that was not found
    pub fn not_found(context: &str, value: impl std::fmt::Display) -> Self {
        GuidanceError::NotFound {
            context: context.to_string(),
            value: value.to_string(),
        }
    }

    /// Get the appropriate exit code for this error
    pub fn exit_code(&self) -> ExitCode {
        match self {
            GuidanceError::UnknownFormat(_)
            | GuidanceError::UsageError(_)
            | GuidanceError::InvalidValue { .. }
            | GuidanceError::InvalidConfig { .. } => ExitCode::Usage,

            GuidanceError::Compression(CompressionError::InvalidRequest(_)) => ExitCode::Usage,

            GuidanceError::Io(_)
            | GuidanceError::Json(_)
            | GuidanceError::NotFound { .. }
            | GuidanceError::FailedOperationWithTarget { .. }
            | GuidanceError::Compression(_)
            | GuidanceError::Other(_)
            | GuidanceError::Interrupted { .. } => ExitCode::Failure,
        }
    }

    /// Get the error type identifier
    fn error_type(&self) -> &'static str {
        match self {
            GuidanceError::UnknownFormat(_) => "unknown_format",
            GuidanceError::UsageError(_) => "usage_error",
            GuidanceError::InvalidValue { .. } => "invalid_value",
            GuidanceError::InvalidConfig { .. } => "invalid_config",
            GuidanceError::Io(_) => "io_error",
            GuidanceError::Json(_) => "json_error",
            GuidanceError::NotFound { .. } => "not_found",
            GuidanceError::FailedOperationWithTarget { .. } => "failed_operation_with_target",
            GuidanceError::Compression(CompressionError::Unavailable { .. }) => {
                "compressor_unavailable"
            }
            GuidanceError::Compression(_) => "compression_error",
            GuidanceError::Other(_) => "other",
            GuidanceError::Interrupted { .. } => "interrupted",
        }
    }

    /// Convert error to JSON representation for structured error output.
    pub fn to_json(&self) -> serde_json::Value {
        let mut error_obj = serde_json::json!({
            "code": self.exit_code() as i32,
            "type": self.error_type(),
            "message": self.to_string(),
        });

        if let GuidanceError::Compression(CompressionError::Unavailable { hint, .. }) = self {
            error_obj["hint"] = serde_json::json!(hint);
        }

        serde_json::json!({ "error": error_obj })
    }
}

/// Result type alias for guidance-compress operations
pub type Result<T> = std::result::Result<T, GuidanceError>;
