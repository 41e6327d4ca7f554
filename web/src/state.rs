//! Application state for Axum handlers.

use helpdesk_core::TicketService;
use std::sync::Arc;

/// Application state shared across all HTTP handlers.
///
/// Cheap to clone; every clone points at the same service and store.
#[derive(Clone, Debug)]
pub struct AppState {
    /// Ticket operations
    pub tickets: Arc<TicketService>,
}

impl AppState {
    /// Create a new application state.
    #[must_use]
    pub fn new(tickets: TicketService) -> Self {
        Self {
            tickets: Arc::new(tickets),
        }
    }
}
