//! Ticket operations exposed to transports.
//!
//! Every operation follows the same order: validate the payload, load the
//! stored ticket, ask the guard, and only then touch the store. A rejected
//! request therefore never mutates anything.
//!
//! # Example
//!
//! ```
//! use helpdesk_core::{
//!     ActorId, CreateTicket, InMemoryTicketStore, RulesVariant, SystemClock, TicketPatch,
//!     TicketPriority, TicketService, TicketStatus, TicketTopic,
//! };
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), helpdesk_core::TicketError> {
//! let store = Arc::new(InMemoryTicketStore::new(Arc::new(SystemClock)));
//! let service = TicketService::new(store, RulesVariant::Enforced);
//!
//! let ticket = service
//!     .create_ticket(CreateTicket {
//!         title: "Printer jam".to_string(),
//!         description: "Tray 2 is stuck".to_string(),
//!         requester_id: ActorId::new(1),
//!         assignee_id: None,
//!         priority: TicketPriority::Low,
//!         topic: TicketTopic::Other,
//!         status: None,
//!     })
//!     .await?;
//!
//! let started = service
//!     .update_ticket(
//!         ticket.id,
//!         TicketPatch::new()
//!             .with_assignee(ActorId::new(7))
//!             .with_status(TicketStatus::InProgress),
//!     )
//!     .await?;
//! assert_eq!(started.status, TicketStatus::InProgress);
//! # Ok(())
//! # }
//! ```

use crate::error::{Result, TicketError};
use crate::locks::KeyedLocks;
use crate::patch::TicketPatch;
use crate::store::TicketStore;
use crate::transition::{RulesVariant, TransitionGuard};
use crate::types::{Ticket, TicketId};
use crate::validation::{validate_create, validate_patch, CreateTicket};
use std::sync::Arc;

/// Runs create, read, update and delete against a store
pub struct TicketService {
    store: Arc<dyn TicketStore>,
    guard: TransitionGuard,
    locks: KeyedLocks<TicketId>,
}

impl TicketService {
    /// Creates a service over `store` enforcing `variant`
    #[must_use]
    pub fn new(store: Arc<dyn TicketStore>, variant: RulesVariant) -> Self {
        Self {
            store,
            guard: TransitionGuard::new(variant),
            locks: KeyedLocks::new(),
        }
    }

    /// Rules this service enforces
    #[must_use]
    pub const fn variant(&self) -> RulesVariant {
        self.guard.variant()
    }

    /// Creates a ticket in status `CREATED`
    ///
    /// Any status in the request is ignored.
    ///
    /// # Errors
    ///
    /// - [`TicketError::BadRequest`] if a required field is blank
    /// - [`TicketError::Storage`] if the store fails
    #[tracing::instrument(skip(self, request), fields(requester_id = %request.requester_id))]
    pub async fn create_ticket(&self, request: CreateTicket) -> Result<Ticket> {
        let fields = validate_create(request).inspect_err(Self::record_rejection)?;
        let ticket = self.store.create(fields).await?;

        metrics::counter!("tickets.created").increment(1);
        tracing::info!(ticket_id = %ticket.id, "Ticket created");
        Ok(ticket)
    }

    /// Loads one ticket
    ///
    /// # Errors
    ///
    /// - [`TicketError::NotFound`] if the id is unknown
    /// - [`TicketError::Storage`] if the store fails
    pub async fn get_ticket(&self, id: TicketId) -> Result<Ticket> {
        self.store.get(id).await
    }

    /// All tickets, newest first
    ///
    /// # Errors
    ///
    /// [`TicketError::Storage`] if the store fails.
    pub async fn list_tickets(&self) -> Result<Vec<Ticket>> {
        self.store.list().await
    }

    /// Applies a partial update after the guard accepts it
    ///
    /// Concurrent updates to the same id are serialized; each one is decided
    /// against the state left by the previous one.
    ///
    /// # Errors
    ///
    /// - [`TicketError::BadRequest`] if a present field is blank
    /// - [`TicketError::NotFound`] if the id is unknown
    /// - [`TicketError::InvalidTransition`] if the status change is not allowed
    /// - [`TicketError::MissingAssignee`] if the result would be `IN_PROGRESS`
    ///   without an assignee
    /// - [`TicketError::Storage`] if the store fails
    #[tracing::instrument(skip(self, patch), fields(ticket_id = %id))]
    pub async fn update_ticket(&self, id: TicketId, patch: TicketPatch) -> Result<Ticket> {
        let patch = validate_patch(patch).inspect_err(Self::record_rejection)?;

        let _guard = self.locks.lock(id).await;
        let current = self.store.get(id).await?;
        let merged = self
            .guard
            .evaluate(&current, &patch)
            .inspect_err(Self::record_rejection)?;

        if merged == current {
            tracing::debug!("Patch leaves ticket unchanged");
            return Ok(current);
        }

        let saved = self.store.save(merged).await?;
        metrics::counter!("tickets.updated").increment(1);
        if saved.status == current.status {
            tracing::info!("Ticket updated");
        } else {
            tracing::info!(from = %current.status, to = %saved.status, "Ticket status changed");
        }
        Ok(saved)
    }

    /// Removes a ticket, if the rules allow it
    ///
    /// Under [`RulesVariant::Enforced`] this fails for every id, existing or
    /// not, without consulting the store.
    ///
    /// # Errors
    ///
    /// - [`TicketError::MethodNotAllowed`] under enforced rules
    /// - [`TicketError::NotFound`] under legacy rules if the id is unknown
    /// - [`TicketError::Storage`] if the store fails
    #[tracing::instrument(skip(self), fields(ticket_id = %id))]
    pub async fn delete_ticket(&self, id: TicketId) -> Result<()> {
        if let Err(err) = self.guard.check_delete() {
            metrics::counter!("tickets.delete_rejected").increment(1);
            tracing::warn!(error = %err, "Delete refused");
            return Err(err);
        }

        let _guard = self.locks.lock(id).await;
        self.store.delete(id).await?;
        metrics::counter!("tickets.deleted").increment(1);
        tracing::info!("Ticket deleted");
        Ok(())
    }

    fn record_rejection(err: &TicketError) {
        metrics::counter!("tickets.rejected", "reason" => err.kind()).increment(1);
        tracing::warn!(reason = err.kind(), error = %err, "Request rejected");
    }
}

impl std::fmt::Debug for TicketService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TicketService")
            .field("guard", &self.guard)
            .finish_non_exhaustive()
    }
}
