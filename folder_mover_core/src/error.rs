//! Error types for the folder-mover core library
//!
//! Errors are split by where they originate so callers can decide how to
//! react without string matching.

use thiserror::Error;

pub mod internal;
pub mod io;
pub mod service;
pub mod validation;

pub use self::io::{IoError, IoErrorKind};
pub use self::service::ServiceError;
pub use self::validation::ValidationError;
pub use internal::InternalError;

/// Result type alias for the library
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the folder-mover core library
///
/// Errors are categorized into four main types:
/// - Service errors: failures reported by the remote folder service
/// - Validation errors: malformed documents or structurally inconsistent input
/// - I/O errors: reading and writing folder documents
/// - Internal errors: serialization and library invariants
#[derive(Error, Debug)]
pub enum Error {
    /// Remote folder service errors
    #[error(transparent)]
    Service(#[from] ServiceError),

    /// Validation related errors
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// I/O related errors
    #[error(transparent)]
    Io(#[from] IoError),

    /// Internal library errors
    #[error(transparent)]
    Internal(#[from] InternalError),
}

impl From<std::io::Error> for Error {
    fn from(source: std::io::Error) -> Self {
        Self::Io(IoError::from_std(source))
    }
}

// Encoding failures only; parse failures of operator input are validation errors
impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::Internal(InternalError::serialization(err.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as StdError;
    use std::path::Path;

    #[test]
    fn test_service_error_is_wrapped_transparently() {
        let error = Error::from(ServiceError::not_found("folder", "F1"));

        assert!(matches!(
            error,
            Error::Service(ServiceError::NotFound { .. })
        ));
        assert_eq!(error.to_string(), "folder not found: F1");
    }

    #[test]
    fn test_validation_error_is_wrapped_transparently() {
        let error = Error::from(ValidationError::cycle_detected("arn:folder/a"));
        assert!(matches!(
            error,
            Error::Validation(ValidationError::CycleDetected { .. })
        ));
        assert!(error.to_string().contains("arn:folder/a"));
    }

    #[test]
    fn test_from_io_error() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let error: Error = io_error.into();

        match error {
            Error::Io(io_err) => assert_eq!(io_err.kind, IoErrorKind::FileNotFound),
            _ => panic!("Expected Io error"),
        }
    }

    #[test]
    fn test_from_serde_json_error() {
        let parse_error = serde_json::from_str::<Vec<String>>("{not json").unwrap_err();
        let error: Error = parse_error.into();

        assert!(matches!(
            error,
            Error::Internal(InternalError::Serialization { .. })
        ));
        assert!(error.to_string().contains("Serialization failed"));
    }

    #[test]
    fn test_io_errors_include_path_context() {
        let path = Path::new("/exports/[prod] folders.json");
        let io_error = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let error = Error::Io(IoError::from_std(io_error).with_path(path));

        assert!(error.to_string().contains("[prod] folders.json"));
        assert!(error.source().is_some());
    }

    #[test]
    fn test_error_is_send_and_sync() {
        fn assert_send<T: Send>() {}
        fn assert_sync<T: Sync>() {}

        assert_send::<Error>();
        assert_sync::<Error>();
    }
}
