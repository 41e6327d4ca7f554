//! In-process ticket store.
//!
//! Each instance owns its records; nothing is global. Construct one per
//! server (or per test) and share it through `Arc`.

use crate::environment::Clock;
use crate::error::{Result, TicketError};
use crate::store::{StoreFuture, TicketStore};
use crate::types::{NewTicket, Ticket, TicketId};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Debug)]
struct Entry {
    /// Insertion order, breaks `created_at` ties when listing
    seq: u64,
    ticket: Ticket,
}

#[derive(Debug, Default)]
struct Inner {
    next_seq: u64,
    tickets: HashMap<TicketId, Entry>,
}

/// `HashMap`-backed [`TicketStore`]
#[derive(Clone)]
pub struct InMemoryTicketStore {
    clock: Arc<dyn Clock>,
    inner: Arc<RwLock<Inner>>,
}

impl InMemoryTicketStore {
    /// Creates an empty store stamping tickets with `clock`
    #[must_use]
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            clock,
            inner: Arc::new(RwLock::new(Inner::default())),
        }
    }

    /// Number of stored tickets
    #[cfg(test)]
    pub async fn len(&self) -> usize {
        self.inner.read().await.tickets.len()
    }

    /// Whether the store holds no tickets
    #[cfg(test)]
    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.tickets.is_empty()
    }

    async fn insert(&self, ticket: Ticket) -> Ticket {
        let mut inner = self.inner.write().await;
        let existing = inner.tickets.get(&ticket.id).map(|entry| entry.seq);
        let seq = if let Some(seq) = existing {
            seq
        } else {
            inner.next_seq += 1;
            inner.next_seq
        };
        inner.tickets.insert(
            ticket.id,
            Entry {
                seq,
                ticket: ticket.clone(),
            },
        );
        ticket
    }
}

impl std::fmt::Debug for InMemoryTicketStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryTicketStore").finish_non_exhaustive()
    }
}

impl TicketStore for InMemoryTicketStore {
    fn create(&self, fields: NewTicket) -> StoreFuture<'_, Ticket> {
        Box::pin(async move {
            let ticket = Ticket::from_new(TicketId::new(), fields, self.clock.now());
            Ok(self.insert(ticket).await)
        })
    }

    fn get(&self, id: TicketId) -> StoreFuture<'_, Ticket> {
        Box::pin(async move {
            self.inner
                .read()
                .await
                .tickets
                .get(&id)
                .map(|entry| entry.ticket.clone())
                .ok_or(TicketError::NotFound(id))
        })
    }

    fn list(&self) -> StoreFuture<'_, Vec<Ticket>> {
        Box::pin(async move {
            let inner = self.inner.read().await;
            let mut entries: Vec<&Entry> = inner.tickets.values().collect();
            entries.sort_by(|a, b| {
                b.ticket
                    .created_at
                    .cmp(&a.ticket.created_at)
                    .then(b.seq.cmp(&a.seq))
            });
            Ok(entries.into_iter().map(|entry| entry.ticket.clone()).collect())
        })
    }

    fn save(&self, ticket: Ticket) -> StoreFuture<'_, Ticket> {
        Box::pin(async move { Ok(self.insert(ticket).await) })
    }

    fn delete(&self, id: TicketId) -> StoreFuture<'_, ()> {
        Box::pin(async move {
            let mut inner = self.inner.write().await;
            inner
                .tickets
                .remove(&id)
                .map(|_| ())
                .ok_or(TicketError::NotFound(id))
        })
    }
}
