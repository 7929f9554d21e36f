//! Error types for the auth client and session storage.
//!
//! ERROR HANDLING
//! ==============
//! A rejected login is an expected outcome, not a crash. Every variant keeps
//! enough context to render a single banner line via [`AuthError::user_message`].
//! A rejection whose body carries no `message` yields `None` there, and the
//! form substitutes its own generic banner.

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

/// Failure writing to durable session storage.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StorageError {
    /// No storage backend is reachable (no window, storage disabled).
    #[error("storage unavailable")]
    Unavailable,

    /// The backend refused the write (quota, private mode).
    #[error("storage write failed for key {key}: {reason}")]
    Write { key: String, reason: String },
}

/// Errors produced by [`crate::net::api::AuthClient`] operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    /// The server answered with a non-success status. `message` is the
    /// body's `message` field, when present and non-blank.
    #[error("request rejected ({status}): {}", message.as_deref().unwrap_or("no message"))]
    Rejected { status: u16, message: Option<String> },

    /// The request never produced a response.
    #[error("transport failed: {detail}")]
    Transport { detail: String, fallback: String },

    /// A success response carried an unexpected body.
    #[error("response decode failed: {detail}")]
    Decode { detail: String, fallback: String },

    /// The session could not be persisted after a successful exchange.
    #[error("session not persisted: {source}")]
    Storage {
        #[source]
        source: StorageError,
        fallback: String,
    },
}

impl AuthError {
    /// Text suitable for the form-level banner: the server's message for a
    /// rejection, the operation fallback otherwise.
    pub fn user_message(&self) -> Option<&str> {
        match self {
            Self::Rejected { message, .. } => message.as_deref(),
            Self::Transport { fallback, .. } | Self::Decode { fallback, .. } | Self::Storage { fallback, .. } => {
                Some(fallback)
            }
        }
    }

    /// HTTP status when the server rejected the request.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Rejected { status, .. } => Some(*status),
            _ => None,
        }
    }
}
