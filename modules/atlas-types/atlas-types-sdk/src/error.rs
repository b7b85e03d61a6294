//! Error types for the Atlas types catalog.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// What the service said when it rejected a request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceError {
    /// HTTP status code.
    pub status: u16,
    /// Service error code, e.g. `ATLAS-404-00-007`, when the body carried one.
    pub error_code: Option<String>,
    /// Service error message, or the body preview when the body was not an
    /// Atlas error document.
    pub message: String,
    /// Raw body preview, truncated by the transport.
    pub body: String,
}

impl ServiceError {
    #[must_use]
    pub fn new(status: u16, message: impl Into<String>) -> Self {
        let message = message.into();
        Self {
            status,
            error_code: None,
            body: message.clone(),
            message,
        }
    }
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.error_code {
            Some(code) => write!(f, "HTTP {} [{}]: {}", self.status, code, self.message),
            None => write!(f, "HTTP {}: {}", self.status, self.message),
        }
    }
}

/// Errors surfaced by the types catalog API.
///
/// Each failure class keeps its own variant; nothing is retried or folded
/// into another class on the way to the caller.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum AtlasTypesError {
    /// A required argument was missing or empty. Raised before any request
    /// is built.
    #[error("Invalid argument '{argument}': {reason}")]
    InvalidArgument {
        argument: &'static str,
        reason: String,
    },

    /// The service has no matching definition.
    #[error("Not found: {0}")]
    NotFound(ServiceError),

    /// The service rejected a create/update/delete due to a naming or
    /// consistency violation.
    #[error("Conflict: {0}")]
    Conflict(ServiceError),

    /// The service failed (5xx).
    #[error("Server error: {0}")]
    Server(ServiceError),

    /// Any other non-2xx status.
    #[error("Request rejected: {0}")]
    HttpStatus(ServiceError),

    /// Network, connection or TLS failure.
    #[error("Transport error: {0}")]
    Transport(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// The transport gave up waiting for a response.
    #[error("Request timed out after {0:?}")]
    Timeout(Duration),

    /// Response body exceeded the configured size limit.
    #[error("Response body too large: limit {limit} bytes, got {actual} bytes")]
    BodyTooLarge { limit: usize, actual: usize },

    /// A successful response could not be decoded into the expected shape.
    #[error("Failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    /// A successful response that must carry a value had an empty body.
    #[error("Response body is empty")]
    EmptyBody,

    /// Local failure unrelated to the service.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AtlasTypesError {
    /// Creates an `InvalidArgument` error.
    #[must_use]
    pub fn invalid_argument(argument: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            argument,
            reason: reason.into(),
        }
    }

    /// Creates a `Transport` error from any error type.
    #[must_use]
    pub fn transport(err: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Self::Transport(err.into())
    }

    /// Creates an `Internal` error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Classifies a non-2xx service response.
    #[must_use]
    pub fn from_service(error: ServiceError) -> Self {
        match error.status {
            404 => Self::NotFound(error),
            409 => Self::Conflict(error),
            500..=599 => Self::Server(error),
            _ => Self::HttpStatus(error),
        }
    }

    #[must_use]
    pub const fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::InvalidArgument { .. })
    }

    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    #[must_use]
    pub const fn is_conflict(&self) -> bool {
        matches!(self, Self::Conflict(_))
    }

    #[must_use]
    pub const fn is_server_error(&self) -> bool {
        matches!(self, Self::Server(_))
    }

    /// Returns `true` for failures that never reached a service response.
    #[must_use]
    pub const fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_) | Self::Timeout(_))
    }

    /// The service's response details, when the error came from one.
    #[must_use]
    pub const fn service_error(&self) -> Option<&ServiceError> {
        match self {
            Self::NotFound(e) | Self::Conflict(e) | Self::Server(e) | Self::HttpStatus(e) => {
                Some(e)
            }
            _ => None,
        }
    }

    /// HTTP status returned by the service, if any.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        self.service_error().map(|e| e.status)
    }
}
