//! Persistence interface consumed by the ticket service.
//!
//! The service never assumes a storage engine. Anything that provides these
//! five operations with these contracts can back it. [`crate::memory`]
//! provides the in-process implementation.
//!
//! # Dyn Compatibility
//!
//! Methods return `Pin<Box<dyn Future>>` instead of using `async fn` so the
//! store can be shared as `Arc<dyn TicketStore>`.

use crate::error::Result;
use crate::types::{NewTicket, Ticket, TicketId};
use std::future::Future;
use std::pin::Pin;

/// Boxed future returned by [`TicketStore`] methods
pub type StoreFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T>> + Send + 'a>>;

/// Ticket persistence
pub trait TicketStore: Send + Sync {
    /// Persists a new ticket, assigning its id and creation timestamp
    ///
    /// The stored status is always `CREATED`.
    ///
    /// # Errors
    ///
    /// `Storage` if the backend fails.
    fn create(&self, fields: NewTicket) -> StoreFuture<'_, Ticket>;

    /// Loads a ticket by id
    ///
    /// # Errors
    ///
    /// `NotFound` if no ticket has this id, `Storage` if the backend fails.
    fn get(&self, id: TicketId) -> StoreFuture<'_, Ticket>;

    /// All tickets, newest first
    ///
    /// # Errors
    ///
    /// `Storage` if the backend fails.
    fn list(&self) -> StoreFuture<'_, Vec<Ticket>>;

    /// Overwrites the record with the same id
    ///
    /// Saving the same ticket twice leaves the store unchanged.
    ///
    /// # Errors
    ///
    /// `Storage` if the backend fails.
    fn save(&self, ticket: Ticket) -> StoreFuture<'_, Ticket>;

    /// Physically removes a ticket
    ///
    /// Only reachable under legacy rules.
    ///
    /// # Errors
    ///
    /// `NotFound` if no ticket has this id, `Storage` if the backend fails.
    fn delete(&self, id: TicketId) -> StoreFuture<'_, ()>;
}
