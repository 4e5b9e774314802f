//! Validation related error types

use thiserror::Error;

/// Invalid input and structurally inconsistent folder data
#[derive(Error, Debug)]
pub enum ValidationError {
    /// Invalid input parameter
    #[error("Invalid parameter '{parameter}': {reason}")]
    InvalidParameter { parameter: String, reason: String },

    /// Folder document that does not parse
    #[error("Malformed folder document: {message}")]
    MalformedDocument { message: String },

    /// Folder listed as a descendant of itself
    #[error("Folder cycle detected: {arn} is its own ancestor")]
    CycleDetected { arn: String },
}

impl ValidationError {
    /// Create an invalid parameter error
    pub fn invalid_parameter(parameter: &str, reason: &str) -> Self {
        Self::InvalidParameter {
            parameter: parameter.to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn malformed_document(message: impl Into<String>) -> Self {
        Self::MalformedDocument {
            message: message.into(),
        }
    }

    /// Create a cycle detected error
    pub fn cycle_detected(arn: &str) -> Self {
        Self::CycleDetected {
            arn: arn.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_parameter_error() {
        let error = ValidationError::invalid_parameter("destination", "must be an ARN");
        assert!(error.to_string().contains("Invalid parameter"));
        assert!(error.to_string().contains("destination"));
        assert!(error.to_string().contains("must be an ARN"));
    }

    #[test]
    fn test_malformed_document_error() {
        let error = ValidationError::malformed_document("expected `,` at line 3 column 9");
        assert!(error.to_string().contains("Malformed folder document"));
        assert!(error.to_string().contains("line 3"));
    }

    #[test]
    fn test_cycle_detected_error() {
        let error = ValidationError::cycle_detected("arn:aws:quicksight:eu-west-1:1:folder/a");
        assert!(error.to_string().contains("cycle"));
        assert!(error.to_string().contains("folder/a"));
    }
}
