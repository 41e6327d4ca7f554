//! Domain types for helpdesk tickets.
//!
//! A ticket is the only entity. Its `status` is governed by the transition
//! table in [`crate::transition`]; `priority` and `topic` are informational.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Unique identifier for a ticket
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TicketId(Uuid);

impl TicketId {
    /// Creates a new random `TicketId`
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a `TicketId` from a UUID
    #[must_use]
    pub const fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    /// Returns the inner UUID
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for TicketId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TicketId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for TicketId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

/// Identifier of an actor (requester or assignee)
///
/// Zero is reserved: as an assignee it means "nobody".
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActorId(u64);

impl ActorId {
    /// Creates an `ActorId` from its numeric value
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the numeric value
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }

    /// Whether this is the reserved "nobody" id
    #[must_use]
    pub const fn is_unassigned(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for ActorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Lifecycle status of a ticket
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TicketStatus {
    /// Newly created, nobody working on it yet
    Created,
    /// Assigned and being worked on
    InProgress,
    /// Resolved; terminal
    Completed,
}

impl TicketStatus {
    /// All statuses, in lifecycle order
    pub const ALL: [Self; 3] = [Self::Created, Self::InProgress, Self::Completed];

    /// Wire name of the status
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Created => "CREATED",
            Self::InProgress => "IN_PROGRESS",
            Self::Completed => "COMPLETED",
        }
    }
}

impl fmt::Display for TicketStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Priority of a ticket
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TicketPriority {
    /// Low priority
    Low,
    /// Medium priority
    Medium,
    /// High priority
    High,
}

impl TicketPriority {
    /// All priorities
    pub const ALL: [Self; 3] = [Self::Low, Self::Medium, Self::High];
}

/// Topic a ticket is filed under
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TicketTopic {
    /// Invoices, payments, refunds
    Billing,
    /// Something is broken
    Bug,
    /// Something is missing
    Feature,
    /// Anything else
    Other,
}

impl TicketTopic {
    /// All topics
    pub const ALL: [Self; 4] = [Self::Billing, Self::Bug, Self::Feature, Self::Other];
}

/// A single ticket record
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ticket {
    /// Unique identifier, assigned at creation
    pub id: TicketId,
    /// Short summary
    pub title: String,
    /// Free-form details
    pub description: String,
    /// Who filed the ticket
    pub requester_id: ActorId,
    /// Who is responsible for resolving it (`None` means unassigned)
    pub assignee_id: Option<ActorId>,
    /// Priority
    pub priority: TicketPriority,
    /// Topic
    pub topic: TicketTopic,
    /// Lifecycle status
    pub status: TicketStatus,
    /// When the ticket was created
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

impl Ticket {
    /// Builds a freshly created ticket. Status is always `Created`.
    #[must_use]
    pub fn from_new(id: TicketId, fields: NewTicket, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            title: fields.title,
            description: fields.description,
            requester_id: fields.requester_id,
            assignee_id: fields.assignee_id.filter(|a| !a.is_unassigned()),
            priority: fields.priority,
            topic: fields.topic,
            status: TicketStatus::Created,
            created_at,
        }
    }

    /// Whether someone is assigned
    #[must_use]
    pub const fn is_assigned(&self) -> bool {
        self.assignee_id.is_some()
    }
}

/// Validated fields for a ticket about to be created
///
/// There is deliberately no status field: new tickets always start in
/// [`TicketStatus::Created`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewTicket {
    /// Short summary
    pub title: String,
    /// Free-form details
    pub description: String,
    /// Who filed the ticket
    pub requester_id: ActorId,
    /// Optional initial assignee
    pub assignee_id: Option<ActorId>,
    /// Priority
    pub priority: TicketPriority,
    /// Topic
    pub topic: TicketTopic,
}
