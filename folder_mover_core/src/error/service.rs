//! Remote folder service error types

use thiserror::Error;

/// Errors reported by (or while talking to) the remote folder service
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ServiceError {
    /// Network is offline or the service is unreachable
    #[error("Network is offline or folder service unavailable")]
    NetworkOffline,

    /// Caller is not authorized for the requested account or resource
    #[error("Access denied: {message}")]
    AccessDenied { message: String },

    /// Request rate exceeded
    #[error("Request throttled by folder service")]
    Throttled,

    /// Referenced resource does not exist
    #[error("{resource} not found: {id}")]
    NotFound { resource: String, id: String },

    /// Resource already exists (e.g. folder id collision on create)
    #[error("{resource} already exists: {id}")]
    Conflict { resource: String, id: String },
}

impl ServiceError {
    /// Create an access denied error
    pub fn access_denied(message: impl Into<String>) -> Self {
        Self::AccessDenied {
            message: message.into(),
        }
    }

    /// Create a not found error
    pub fn not_found(resource: &str, id: &str) -> Self {
        Self::NotFound {
            resource: resource.to_string(),
            id: id.to_string(),
        }
    }

    /// Create a conflict error
    pub fn conflict(resource: &str, id: &str) -> Self {
        Self::Conflict {
            resource: resource.to_string(),
            id: id.to_string(),
        }
    }
}
