//! Error types for the library layer.

use std::fmt;

/// Errors produced by the library layer, wrapping upstream API errors
/// and adding serialization, input validation and permission failures.
#[derive(Debug)]
pub enum AdminError {
    /// An error from the underlying API client.
    Api(bizadmin_api::Error),
    /// JSON serialization or deserialization failed.
    Serialization(serde_json::Error),
    /// User-provided input failed validation before any request was sent.
    InvalidInput(String),
    /// The signed-in session lacks the named permission.
    Unauthorized(String),
}

impl AdminError {
    /// Message suitable for a user-facing notification.
    pub fn user_message(&self) -> String {
        match self {
            Self::Api(e) => e.user_message(),
            other => other.to_string(),
        }
    }
}

impl fmt::Display for AdminError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Api(e) => write!(f, "API error: {}", e),
            Self::Serialization(e) => write!(f, "Serialization error: {}", e),
            Self::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            Self::Unauthorized(perm) => write!(f, "Missing permission: {}", perm),
        }
    }
}

impl std::error::Error for AdminError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Api(e) => Some(e),
            Self::Serialization(e) => Some(e),
            _ => None,
        }
    }
}

impl From<bizadmin_api::Error> for AdminError {
    fn from(e: bizadmin_api::Error) -> Self {
        Self::Api(e)
    }
}

impl From<serde_json::Error> for AdminError {
    fn from(e: serde_json::Error) -> Self {
        Self::Serialization(e)
    }
}
