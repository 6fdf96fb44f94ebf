//! Notification capability.
//!
//! Directory mutations emit fire-and-forget events to an injected
//! [`Notifier`]. A notifier failure never affects the reported outcome of the
//! operation that triggered it; the orchestrator logs and discards the error.

use crate::error::Result;

/// Outcome events emitted after directory operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DirectoryEvent {
    Created { username: String },
    Updated { username: String },
    Deleted { username: String },
    Found { username: String },
    NotFound { username: String },
}

impl DirectoryEvent {
    /// Short headline for the event.
    pub fn title(&self) -> &'static str {
        match self {
            Self::Created { .. } => "Account created",
            Self::Updated { .. } => "Account updated",
            Self::Deleted { .. } => "Account deleted",
            Self::Found { .. } => "Account found",
            Self::NotFound { .. } => "Account not found",
        }
    }

    /// Human-readable event detail.
    pub fn message(&self) -> String {
        match self {
            Self::Created { username } => format!("{username} has been created"),
            Self::Updated { username } => format!("{username} has been updated"),
            Self::Deleted { username } => format!("{username} has been deleted"),
            Self::Found { username } => format!("{username} exists"),
            Self::NotFound { username } => format!("no account named {username} exists"),
        }
    }
}

/// A sink for directory outcome events.
///
/// Implementations may forward events to a desktop notifier, a log, or
/// anything else the embedding process wires in. Implementations must not
/// assume their result is inspected.
#[async_trait::async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, event: &DirectoryEvent) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_message_names_the_user() {
        let event = DirectoryEvent::Deleted {
            username: "alice".to_string(),
        };
        assert_eq!(event.title(), "Account deleted");
        assert!(event.message().contains("alice"));
    }
}
