//! The ticket status machine and the guard that runs on every update.
//!
//! ```text
//! CREATED ──► IN_PROGRESS ──► COMPLETED
//! ```
//!
//! `COMPLETED` is terminal. Repeating the current status is a no-op, not a
//! transition. Independently of the table, a ticket whose effective status is
//! `IN_PROGRESS` must have an effective assignee.
//!
//! The guard is a pure function of the stored ticket and the patch. It holds
//! no state and does no I/O, so one instance can be shared freely across
//! request handlers.

use crate::error::{Result, TicketError};
use crate::patch::TicketPatch;
use crate::types::{Ticket, TicketStatus};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

impl TicketStatus {
    /// Statuses reachable from `self` in one step
    #[must_use]
    pub const fn successors(self) -> &'static [Self] {
        match self {
            Self::Created => &[Self::InProgress],
            Self::InProgress => &[Self::Completed],
            Self::Completed => &[],
        }
    }

    /// Whether moving from `self` to `next` is allowed
    ///
    /// Staying in the same status is always allowed.
    #[must_use]
    pub fn can_transition_to(self, next: Self) -> bool {
        self == next || self.successors().contains(&next)
    }

    /// Whether no transition leaves this status
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        self.successors().is_empty()
    }
}

/// Checks a single status change against the transition table
///
/// # Errors
///
/// Returns [`TicketError::InvalidTransition`] naming both statuses when the
/// pair is not in the table.
pub fn check_transition(from: TicketStatus, to: TicketStatus) -> Result<()> {
    if from.can_transition_to(to) {
        Ok(())
    } else {
        Err(TicketError::InvalidTransition { from, to })
    }
}

/// Which set of update and delete rules a service enforces
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RulesVariant {
    /// Status machine and assignment rule in force; deletes are refused
    #[default]
    Enforced,
    /// Patches merge unchecked; deletes remove the record
    Legacy,
}

impl RulesVariant {
    /// Whether tickets may be physically removed
    #[must_use]
    pub const fn allows_delete(self) -> bool {
        matches!(self, Self::Legacy)
    }
}

impl fmt::Display for RulesVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Enforced => f.write_str("enforced"),
            Self::Legacy => f.write_str("legacy"),
        }
    }
}

impl FromStr for RulesVariant {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "enforced" => Ok(Self::Enforced),
            "legacy" => Ok(Self::Legacy),
            other => Err(format!("unknown rules variant '{other}'")),
        }
    }
}

/// Decides whether a patch may be applied to a stored ticket
#[derive(Clone, Copy, Debug, Default)]
pub struct TransitionGuard {
    variant: RulesVariant,
}

impl TransitionGuard {
    /// Creates a guard enforcing the given rules
    #[must_use]
    pub const fn new(variant: RulesVariant) -> Self {
        Self { variant }
    }

    /// Rules this guard enforces
    #[must_use]
    pub const fn variant(&self) -> RulesVariant {
        self.variant
    }

    /// Runs the checks in order and returns the merged ticket on success
    ///
    /// 1. Status transition against the table (skipped when the patch omits
    ///    `status` or repeats the current one).
    /// 2. Effective status `IN_PROGRESS` requires an effective assignee.
    ///
    /// Under [`RulesVariant::Legacy`] both checks are skipped.
    ///
    /// # Errors
    ///
    /// - [`TicketError::InvalidTransition`] if step 1 fails
    /// - [`TicketError::MissingAssignee`] if step 2 fails
    pub fn evaluate(&self, current: &Ticket, patch: &TicketPatch) -> Result<Ticket> {
        if self.variant == RulesVariant::Enforced {
            if let Some(requested) = patch.status {
                check_transition(current.status, requested)?;
            }

            if patch.effective_status(current) == TicketStatus::InProgress
                && patch.effective_assignee(current).is_none()
            {
                return Err(TicketError::MissingAssignee);
            }
        }

        Ok(patch.apply_to(current))
    }

    /// Delete entry point: fails closed unless legacy rules are in force
    ///
    /// # Errors
    ///
    /// Returns [`TicketError::MethodNotAllowed`] under
    /// [`RulesVariant::Enforced`].
    pub const fn check_delete(&self) -> Result<()> {
        if self.variant.allows_delete() {
            Ok(())
        } else {
            Err(TicketError::MethodNotAllowed)
        }
    }
}
