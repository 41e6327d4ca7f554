//! Partial updates and the merge of a patch onto a stored ticket.
//!
//! A [`TicketPatch`] carries only the fields a caller wants to change. The
//! assignee field is tri-state so that "leave as is" and "clear" stay
//! distinguishable all the way to the guard:
//!
//! | JSON                     | `assignee_id`     |
//! |--------------------------|-------------------|
//! | key absent               | `None`            |
//! | `"assignee_id": null`    | `Some(None)`      |
//! | `"assignee_id": 7`       | `Some(Some(7))`   |

use crate::types::{ActorId, Ticket, TicketPriority, TicketStatus, TicketTopic};
use serde::{Deserialize, Deserializer, Serialize};

/// Fields a caller wishes to change on an existing ticket
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicketPatch {
    /// New title
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// New description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// New requester
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requester_id: Option<ActorId>,
    /// New assignee: outer `None` keeps the current one, `Some(None)` clears it
    #[serde(
        default,
        deserialize_with = "deserialize_present",
        skip_serializing_if = "Option::is_none"
    )]
    pub assignee_id: Option<Option<ActorId>>,
    /// New priority
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<TicketPriority>,
    /// New topic
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub topic: Option<TicketTopic>,
    /// Requested status
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<TicketStatus>,
}

/// Maps a present key to `Some(..)`, including a present `null`.
///
/// Absent keys never reach this function; `#[serde(default)]` yields `None`.
fn deserialize_present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

impl TicketPatch {
    /// An empty patch
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the requested status
    #[must_use]
    pub fn with_status(mut self, status: TicketStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Sets the assignee
    #[must_use]
    pub fn with_assignee(mut self, assignee: ActorId) -> Self {
        self.assignee_id = Some(Some(assignee));
        self
    }

    /// Explicitly clears the assignee
    #[must_use]
    pub fn clearing_assignee(mut self) -> Self {
        self.assignee_id = Some(None);
        self
    }

    /// Sets the title
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Sets the priority
    #[must_use]
    pub fn with_priority(mut self, priority: TicketPriority) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Whether the patch changes nothing
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Status the ticket would have after this patch
    #[must_use]
    pub fn effective_status(&self, current: &Ticket) -> TicketStatus {
        self.status.unwrap_or(current.status)
    }

    /// Assignee the ticket would have after this patch
    ///
    /// A present key wins over the stored value, including an explicit clear.
    /// The reserved zero id counts as unassigned.
    #[must_use]
    pub fn effective_assignee(&self, current: &Ticket) -> Option<ActorId> {
        let assignee = match self.assignee_id {
            Some(patched) => patched,
            None => current.assignee_id,
        };
        assignee.filter(|a| !a.is_unassigned())
    }

    /// Merges the patch onto `current`
    ///
    /// Present fields overwrite, absent fields keep the stored value. `id` and
    /// `created_at` are never touched.
    #[must_use]
    pub fn apply_to(&self, current: &Ticket) -> Ticket {
        Ticket {
            id: current.id,
            title: self.title.clone().unwrap_or_else(|| current.title.clone()),
            description: self
                .description
                .clone()
                .unwrap_or_else(|| current.description.clone()),
            requester_id: self.requester_id.unwrap_or(current.requester_id),
            assignee_id: self.effective_assignee(current),
            priority: self.priority.unwrap_or(current.priority),
            topic: self.topic.unwrap_or(current.topic),
            status: self.effective_status(current),
            created_at: current.created_at,
        }
    }
}
