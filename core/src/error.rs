//! Error types for ticket operations.

use crate::types::{TicketId, TicketStatus};
use thiserror::Error;

/// Errors returned by ticket operations
///
/// Every variant is detected before the store is mutated, so a rejected
/// request never leaves a record partially updated.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TicketError {
    /// The referenced ticket does not exist
    #[error("Ticket with ID {0} not found")]
    NotFound(TicketId),

    /// Malformed or missing fields
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Status change not permitted by the transition table
    #[error("Invalid status transition from {from} to {to}")]
    InvalidTransition {
        /// Status currently stored
        from: TicketStatus,
        /// Status the caller asked for
        to: TicketStatus,
    },

    /// Attempt to reach or remain in `IN_PROGRESS` without an assignee
    #[error("A ticket in IN_PROGRESS must have an assignee")]
    MissingAssignee,

    /// Delete attempted while tickets are append/mutate-only
    #[error("Tickets cannot be deleted; transition the ticket to COMPLETED instead")]
    MethodNotAllowed,

    /// The underlying store failed
    #[error("Storage error: {0}")]
    Storage(String),
}

impl TicketError {
    /// Stable machine-readable name of the error kind
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "not_found",
            Self::BadRequest(_) => "bad_request",
            Self::InvalidTransition { .. } => "invalid_transition",
            Self::MissingAssignee => "missing_assignee",
            Self::MethodNotAllowed => "method_not_allowed",
            Self::Storage(_) => "storage",
        }
    }

    /// Shorthand for a [`TicketError::BadRequest`]
    #[must_use]
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest(message.into())
    }
}

/// Result alias for ticket operations
pub type Result<T> = std::result::Result<T, TicketError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_transition_names_both_statuses() {
        let err = TicketError::InvalidTransition {
            from: TicketStatus::Completed,
            to: TicketStatus::InProgress,
        };
        assert_eq!(
            err.to_string(),
            "Invalid status transition from COMPLETED to IN_PROGRESS"
        );
        assert_eq!(err.kind(), "invalid_transition");
    }
}
