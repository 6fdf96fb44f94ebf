//! Error types for the roster application.

use thiserror::Error;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, RosterError>;

/// A shared error type for the entire roster application.
///
/// This provides typed, structured error variants with automatic conversion
/// from common error types via the `From` trait. The embedding HTTP layer is
/// expected to map `NotFound` to 404, `DuplicateUsername` to 409 and
/// `InvalidSubmission` to 400; everything else is a generic 500.
#[derive(Error, Debug, Clone)]
pub enum RosterError {
    /// No record exists for the given username
    #[error("User not found: '{username}'")]
    NotFound { username: String },

    /// A record with the given username already exists
    #[error("Username already taken: '{username}'")]
    DuplicateUsername { username: String },

    /// The submission is missing a required field or is otherwise unusable
    #[error("Invalid submission: {0}")]
    InvalidSubmission(String),

    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization {
        format: String, // "JSON", "TOML", etc.
        message: String,
    },

    /// Data access error (database/storage layer)
    #[error("Data access error: {0}")]
    DataAccess(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Template rendering error
    #[error("Template error: {0}")]
    Template(String),

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl RosterError {
    /// Creates a NotFound error
    pub fn not_found(username: impl Into<String>) -> Self {
        Self::NotFound {
            username: username.into(),
        }
    }

    /// Creates a DuplicateUsername error
    pub fn duplicate(username: impl Into<String>) -> Self {
        Self::DuplicateUsername {
            username: username.into(),
        }
    }

    /// Creates an InvalidSubmission error
    pub fn invalid_submission(message: impl Into<String>) -> Self {
        Self::InvalidSubmission(message.into())
    }

    /// Creates an IO error
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    /// Creates a DataAccess error
    pub fn data_access(message: impl Into<String>) -> Self {
        Self::DataAccess(message.into())
    }

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates a Template error
    pub fn template(message: impl Into<String>) -> Self {
        Self::Template(message.into())
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Check if this is a NotFound error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a DuplicateUsername error
    pub fn is_duplicate(&self) -> bool {
        matches!(self, Self::DuplicateUsername { .. })
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<std::io::Error> for RosterError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for RosterError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for RosterError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_display_and_predicate() {
        let err = RosterError::not_found("alice");
        assert!(err.is_not_found());
        assert!(!err.is_duplicate());
        assert_eq!(err.to_string(), "User not found: 'alice'");
    }

    #[test]
    fn test_duplicate_predicate() {
        let err = RosterError::duplicate("bob");
        assert!(err.is_duplicate());
        assert!(!err.is_not_found());
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: RosterError = io.into();
        assert!(matches!(err, RosterError::Io { .. }));
    }

    #[test]
    fn test_json_error_conversion() {
        let bad = serde_json::from_str::<serde_json::Value>("{not json");
        let err: RosterError = bad.unwrap_err().into();
        match err {
            RosterError::Serialization { format, .. } => assert_eq!(format, "JSON"),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
