//! Typed replies for the embedding HTTP layer.
//!
//! The facade produces `Reply` values instead of touching a socket; the
//! external router maps them 1:1 onto HTTP responses. Failure bodies stay
//! generic — the structured detail goes to the server-side log, keyed by the
//! failing operation name.

use roster_core::error::RosterError;

/// Location successful mutations redirect back to.
pub const INDEX_LOCATION: &str = "/index.html";

/// A response the embedding HTTP layer renders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// See-other redirect to the given location
    Redirect { location: String },
    /// 200 with a rendered HTML body
    Html { body: String },
    /// Failure with an HTTP status and a generic message
    Error { status: u16, message: String },
}

impl Reply {
    /// The post-mutation redirect back to the index page.
    pub fn redirect_to_index() -> Self {
        Self::Redirect {
            location: INDEX_LOCATION.to_string(),
        }
    }

    /// The HTTP status the reply maps to.
    pub fn status(&self) -> u16 {
        match self {
            Self::Redirect { .. } => 303,
            Self::Html { .. } => 200,
            Self::Error { status, .. } => *status,
        }
    }

    /// Converts a failed operation into an error reply, logging the
    /// structured error under the operation's name.
    pub fn from_error(operation: &str, err: &RosterError) -> Self {
        let status = status_for(err);
        tracing::error!(operation, %err, status, "request failed");
        Self::Error {
            status,
            message: format!("Error ({operation})"),
        }
    }
}

/// Maps the error taxonomy onto HTTP statuses: not-found is 404 in every
/// flow, a duplicate username is 409, a bad submission is 400, and any
/// storage, template or internal failure is a generic 500.
fn status_for(err: &RosterError) -> u16 {
    match err {
        RosterError::NotFound { .. } => 404,
        RosterError::DuplicateUsername { .. } => 409,
        RosterError::InvalidSubmission(_) => 400,
        _ => 500,
    }
}
