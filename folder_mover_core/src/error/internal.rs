//! Internal library error types

use thiserror::Error;

/// Internal library errors
#[derive(Error, Debug)]
pub enum InternalError {
    /// JSON encoding or decoding failed
    #[error("Serialization failed: {message}")]
    Serialization { message: String },

    /// Internal assertion failure
    #[error("Internal assertion failed: {message}")]
    Assertion { message: String },
}

impl InternalError {
    /// Create a serialization error
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::Serialization {
            message: message.into(),
        }
    }

    /// Create an internal assertion failure error
    pub fn assertion(message: impl Into<String>) -> Self {
        Self::Assertion {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialization_error() {
        let error = InternalError::serialization("expected `,` at line 3");
        assert!(error.to_string().contains("Serialization failed"));
        assert!(error.to_string().contains("line 3"));
    }

    #[test]
    fn test_assertion_error() {
        let error = InternalError::assertion("orphaned arena entry");
        assert!(error.to_string().contains("Internal assertion failed"));
        assert!(error.to_string().contains("orphaned arena entry"));
    }
}
