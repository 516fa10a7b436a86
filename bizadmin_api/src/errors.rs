//! Error types for the API client.

use serde::{Deserialize, Serialize};

/// Error body the backend sends alongside a non-success status.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ErrorPayload {
    pub status_code: Option<i64>,
    pub message: Option<String>,
}

/// Errors that can occur when making API requests.
///
/// `Clone` so a single failed request can be handed to every caller that
/// was waiting on it.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// The request never produced a response (connect error, timeout, TLS).
    #[error("Request failed")]
    RequestFailed,
    /// The API returned a non-success status. `payload` is the parsed error
    /// body when the server sent one.
    #[error("Request failed with status {status}")]
    HttpStatus {
        status: u16,
        body: String,
        payload: Option<ErrorPayload>,
    },
    /// A success response whose body did not match the expected shape.
    #[error("Failed to decode response: {0}")]
    Decode(String),
    /// The base URL and path did not form a valid URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

impl Error {
    /// Server-supplied error payload, if any.
    pub fn payload(&self) -> Option<&ErrorPayload> {
        match self {
            Error::HttpStatus { payload, .. } => payload.as_ref(),
            _ => None,
        }
    }

    /// HTTP status code for status errors.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::HttpStatus { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Message suitable for showing to a user: the server's message when it
    /// sent one, otherwise this error's own description.
    pub fn user_message(&self) -> String {
        self.payload()
            .and_then(|p| p.message.clone())
            .unwrap_or_else(|| self.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_message_prefers_server_payload() {
        let err = Error::HttpStatus {
            status: 400,
            body: r#"{"message":"Contract number already exists"}"#.to_string(),
            payload: Some(ErrorPayload {
                status_code: None,
                message: Some("Contract number already exists".to_string()),
            }),
        };
        assert_eq!(err.user_message(), "Contract number already exists");
        assert_eq!(err.status(), Some(400));
    }

    #[test]
    fn user_message_falls_back_to_display() {
        assert_eq!(Error::RequestFailed.user_message(), "Request failed");
        assert!(Error::RequestFailed.payload().is_none());
    }
}
