//! # Helpdesk Core
//!
//! Ticket domain and the status-transition guard for the helpdesk service.
//!
//! ## Core Concepts
//!
//! - **Ticket**: a trackable work item with a lifecycle status
//! - **Patch**: the subset of fields a caller wants to change
//! - **Guard**: pure decision `(Ticket, Patch) → Ticket | rejection`
//! - **Store**: persistence, injected as `Arc<dyn TicketStore>`
//! - **Service**: validate → load → guard → save
//!
//! ## Status Machine
//!
//! ```text
//! CREATED ──► IN_PROGRESS ──► COMPLETED
//! ```
//!
//! Entering or staying in `IN_PROGRESS` requires an assignee. Tickets are
//! never deleted while these rules are enforced.

pub mod environment;
pub mod error;
pub mod locks;
pub mod memory;
pub mod patch;
pub mod service;
pub mod store;
pub mod transition;
pub mod types;
pub mod validation;

// Re-export commonly used types
pub use environment::{Clock, SystemClock};
pub use error::{Result, TicketError};
pub use memory::InMemoryTicketStore;
pub use patch::TicketPatch;
pub use service::TicketService;
pub use store::{StoreFuture, TicketStore};
pub use transition::{check_transition, RulesVariant, TransitionGuard};
pub use types::{
    ActorId, NewTicket, Ticket, TicketId, TicketPriority, TicketStatus, TicketTopic,
};
pub use validation::{validate_create, validate_patch, CreateTicket};
