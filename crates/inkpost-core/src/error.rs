//! Error types for the Inkpost client.

use std::collections::BTreeMap;

use serde::Serialize;
use thiserror::Error;

/// A shared error type for the entire Inkpost client.
///
/// This provides typed, structured error variants with automatic conversion
/// from common error types via the `From` trait.
#[derive(Error, Debug, Clone, Serialize)]
pub enum InkpostError {
    /// A private endpoint answered with an authentication-failure status.
    ///
    /// This is the universal signal to clear the session and return to the
    /// login view; every private call site maps 401-class responses to it.
    #[error("Authentication required")]
    AuthRequired,

    /// Client-detected validation failure for a single field.
    ///
    /// Never reaches the network: the request is blocked entirely.
    #[error("Validation failed for '{field}': {message}")]
    Validation { field: String, message: String },

    /// Request-scoped error reported by the server as a single message.
    #[error("Server error: {message}")]
    Server { message: String },

    /// Field-scoped errors reported by the server as a field-to-message map.
    #[error("Server rejected {} field(s)", .errors.len())]
    FieldErrors { errors: BTreeMap<String, String> },

    /// Network failure or malformed response.
    #[error("Transport error: {message}")]
    Transport { message: String },

    /// Entity not found error with type information
    #[error("Entity not found: {entity_type} '{id}'")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },

    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization {
        format: String, // "TOML", "JSON", etc.
        message: String,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl InkpostError {
    /// Creates a Validation error
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Creates a Server error
    pub fn server(message: impl Into<String>) -> Self {
        Self::Server {
            message: message.into(),
        }
    }

    /// Creates a Transport error
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    /// Creates a NotFound error
    pub fn not_found(entity_type: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type,
            id: id.into(),
        }
    }

    /// Creates an IO error
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Check if this is an authentication failure
    pub fn is_auth_failure(&self) -> bool {
        matches!(self, Self::AuthRequired)
    }

    /// Check if this is a client-side validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }

    /// Check if this is a transport error
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport { .. })
    }

    /// Check if this is a NotFound error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// The text to surface to the user for this error.
    ///
    /// Server-reported messages are shown verbatim; transport failures get a
    /// generic notice so network hiccups are distinguishable from rejections.
    pub fn user_message(&self) -> String {
        match self {
            Self::Server { message } => message.clone(),
            Self::Validation { message, .. } => message.clone(),
            Self::NotFound { entity_type, .. } => format!("{} not found", entity_type),
            Self::Transport { .. } => "Something went wrong! Please try again.".to_string(),
            Self::AuthRequired => "Please log in to continue.".to_string(),
            other => other.to_string(),
        }
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<std::io::Error> for InkpostError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for InkpostError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for InkpostError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::ser::Error> for InkpostError {
    fn from(err: toml::ser::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

/// A type alias for `Result<T, InkpostError>`.
pub type Result<T> = std::result::Result<T, InkpostError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_message_surfaced_verbatim() {
        let err = InkpostError::server("Not authorized");
        assert_eq!(err.user_message(), "Not authorized");
    }

    #[test]
    fn test_transport_message_is_generic() {
        let err = InkpostError::transport("connection refused");
        assert!(!err.user_message().contains("connection refused"));
    }

    #[test]
    fn test_predicates() {
        assert!(InkpostError::AuthRequired.is_auth_failure());
        assert!(InkpostError::validation("email", "bad shape").is_validation());
        assert!(InkpostError::transport("timeout").is_transport());
        assert!(!InkpostError::server("nope").is_auth_failure());
    }

    #[test]
    fn test_io_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: InkpostError = io.into();
        assert!(matches!(err, InkpostError::Io { .. }));
    }
}
