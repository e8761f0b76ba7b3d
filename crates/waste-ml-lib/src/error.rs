//! Error types for artifact loading and request handling

use std::path::PathBuf;
use thiserror::Error;

/// Failure to load one model artifact
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("artifact not found: {}", .0.display())]
    Missing(PathBuf),

    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("artifact {} is {size} bytes, maximum is {max}", path.display())]
    TooLarge { path: PathBuf, size: u64, max: u64 },

    #[error("checksum mismatch for {}: expected {expected}, got {actual}", path.display())]
    ChecksumMismatch {
        path: PathBuf,
        expected: String,
        actual: String,
    },

    #[error("unsupported artifact format: {}", .0.display())]
    UnsupportedFormat(PathBuf),

    #[error("invalid artifact {}: {source:#}", path.display())]
    Invalid {
        path: PathBuf,
        #[source]
        source: anyhow::Error,
    },
}

/// Request-level failure, mapped to an HTTP status by the service layer
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Malformed or out-of-range input (400)
    #[error("{0}")]
    Validation(String),

    /// A required artifact is not loaded (500)
    #[error("{0}")]
    ModelUnavailable(&'static str),

    /// Inference or any unexpected failure while serving (500)
    #[error("{context}: {source:#}")]
    Inference {
        context: &'static str,
        #[source]
        source: anyhow::Error,
    },
}

impl ServiceError {
    pub fn validation(message: impl Into<String>) -> Self {
        ServiceError::Validation(message.into())
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, ServiceError::Validation(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inference_error_wraps_cause() {
        let err = ServiceError::Inference {
            context: "Prediction failed",
            source: anyhow::anyhow!("tensor shape mismatch"),
        };
        assert_eq!(err.to_string(), "Prediction failed: tensor shape mismatch");
        assert!(!err.is_validation());
    }

    #[test]
    fn test_validation_message_is_verbatim() {
        let err = ServiceError::validation("month must be between 1 and 12");
        assert_eq!(err.to_string(), "month must be between 1 and 12");
        assert!(err.is_validation());
    }
}
