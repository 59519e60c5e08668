//! Error types for the Rookery client.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A shared error type for the entire client.
///
/// This provides typed, structured error variants with automatic conversion
/// from common error types via the `From` trait. Every failure is terminal
/// for the call that produced it; the client never retries on its own.
#[derive(Error, Debug, Clone, Serialize, Deserialize)]
pub enum RookeryError {
    /// Entity not found (including "data present but nested field is null"
    /// responses, e.g. an unknown profile).
    #[error("Not found: {entity_type} '{id}'")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },

    /// Client-side validation failure. Raised before any request is made.
    #[error("{0}")]
    Validation(String),

    /// Transport-level failure (connection, HTTP, malformed body).
    #[error("Transport error: {message}")]
    Transport { message: String },

    /// Server-reported GraphQL errors, in response order.
    #[error("Server error: {}", .messages.first().map(String::as_str).unwrap_or("unknown"))]
    Server { messages: Vec<String> },

    /// Durable storage error (credential file operations).
    #[error("Storage error: {0}")]
    Storage(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization { format: String, message: String },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl RookeryError {
    /// Creates a NotFound error
    pub fn not_found(entity_type: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type,
            id: id.into(),
        }
    }

    /// Creates a Validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Creates a Transport error
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    /// Creates a Server error from a list of GraphQL error messages.
    pub fn server(messages: Vec<String>) -> Self {
        Self::Server { messages }
    }

    /// Creates a Storage error
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage(message.into())
    }

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Check if this is a NotFound error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a client-side validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Returns the message a view should display for this error.
    ///
    /// Follows the original client's fallback chain: first structured
    /// server error message, then the error's own text, then the caller's
    /// hardcoded fallback string.
    pub fn display_message(&self, fallback: &str) -> String {
        match self {
            Self::Server { messages } => messages
                .first()
                .cloned()
                .unwrap_or_else(|| fallback.to_string()),
            Self::Validation(message) => message.clone(),
            Self::Transport { message } if !message.is_empty() => message.clone(),
            _ => fallback.to_string(),
        }
    }
}

impl From<std::io::Error> for RookeryError {
    fn from(err: std::io::Error) -> Self {
        Self::Storage(format!("{} (kind: {:?})", err, err.kind()))
    }
}

impl From<serde_json::Error> for RookeryError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for RookeryError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<reqwest::Error> for RookeryError {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport {
            message: err.to_string(),
        }
    }
}

/// A type alias for `Result<T, RookeryError>`.
pub type Result<T> = std::result::Result<T, RookeryError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_message_prefers_first_server_error() {
        let err = RookeryError::server(vec![
            "Invalid credentials".to_string(),
            "second".to_string(),
        ]);
        assert_eq!(
            err.display_message("Login failed. Please check your credentials."),
            "Invalid credentials"
        );
    }

    #[test]
    fn test_display_message_falls_back_for_empty_server_errors() {
        let err = RookeryError::server(vec![]);
        assert_eq!(err.display_message("fallback"), "fallback");
    }

    #[test]
    fn test_display_message_uses_validation_text() {
        let err = RookeryError::validation("Passwords do not match");
        assert_eq!(err.display_message("fallback"), "Passwords do not match");
    }

    #[test]
    fn test_not_found_predicate() {
        assert!(RookeryError::not_found("profile", "alice").is_not_found());
        assert!(!RookeryError::validation("x").is_not_found());
    }
}
