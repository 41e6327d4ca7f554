//! Store wrapper that records mutating calls.
//!
//! Lets tests assert that a rejected request never reached `save` or
//! `delete`, independently of what the wrapped store contains.

use helpdesk_core::store::{StoreFuture, TicketStore};
use helpdesk_core::{NewTicket, Ticket, TicketId};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Counts `create`, `save` and `delete` calls before delegating
pub struct SpyTicketStore {
    inner: Arc<dyn TicketStore>,
    creates: AtomicUsize,
    saves: AtomicUsize,
    deletes: AtomicUsize,
}

impl SpyTicketStore {
    /// Wraps `inner`
    #[must_use]
    pub fn new(inner: Arc<dyn TicketStore>) -> Self {
        Self {
            inner,
            creates: AtomicUsize::new(0),
            saves: AtomicUsize::new(0),
            deletes: AtomicUsize::new(0),
        }
    }

    /// Number of `create` calls
    #[must_use]
    pub fn creates(&self) -> usize {
        self.creates.load(Ordering::SeqCst)
    }

    /// Number of `save` calls
    #[must_use]
    pub fn saves(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }

    /// Number of `delete` calls
    #[must_use]
    pub fn deletes(&self) -> usize {
        self.deletes.load(Ordering::SeqCst)
    }

    /// Total mutating calls
    #[must_use]
    pub fn mutations(&self) -> usize {
        self.creates() + self.saves() + self.deletes()
    }
}

impl TicketStore for SpyTicketStore {
    fn create(&self, fields: NewTicket) -> StoreFuture<'_, Ticket> {
        self.creates.fetch_add(1, Ordering::SeqCst);
        self.inner.create(fields)
    }

    fn get(&self, id: TicketId) -> StoreFuture<'_, Ticket> {
        self.inner.get(id)
    }

    fn list(&self) -> StoreFuture<'_, Vec<Ticket>> {
        self.inner.list()
    }

    fn save(&self, ticket: Ticket) -> StoreFuture<'_, Ticket> {
        self.saves.fetch_add(1, Ordering::SeqCst);
        self.inner.save(ticket)
    }

    fn delete(&self, id: TicketId) -> StoreFuture<'_, ()> {
        self.deletes.fetch_add(1, Ordering::SeqCst);
        self.inner.delete(id)
    }
}
