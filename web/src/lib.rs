//! HTTP transport for the helpdesk service.
//!
//! # Request Flow
//!
//! 1. **HTTP Request** arrives at an Axum handler
//! 2. **Extract** path id and JSON body (malformed input → `400`)
//! 3. **Dispatch** to `TicketService`
//! 4. **Map** the result or `TicketError` to an HTTP response
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │         Imperative Shell (Axum)         │  ← HTTP, JSON, CORS
//! │  - Request parsing                      │  ← Correlation IDs, tracing
//! │  - Error → status mapping               │
//! ├─────────────────────────────────────────┤
//! │         Functional Core                 │
//! │  - Transition guard (pure)              │
//! │  - Patch merge                          │
//! └─────────────────────────────────────────┘
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod server;
pub mod state;

// Re-export key types for convenience
pub use config::{Config, ConfigError};
pub use error::AppError;
pub use extractors::{ApiJson, TicketIdParam};
pub use middleware::{CorrelationId, CORRELATION_ID_HEADER};
pub use router::build_router;
pub use state::AppState;

/// Result type alias for web handlers.
pub type WebResult<T> = Result<T, AppError>;
