//! Server lifecycle: bind, serve, drain on shutdown.

use crate::config::Config;
use crate::router::build_router;
use crate::state::AppState;
use helpdesk_core::{InMemoryTicketStore, SystemClock, TicketService};
use std::future::{Future, IntoFuture};
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::Notify;

/// Builds the service graph described by `config`.
#[must_use]
pub fn build_state(config: &Config) -> AppState {
    let store = Arc::new(InMemoryTicketStore::new(Arc::new(SystemClock)));
    AppState::new(TicketService::new(store, config.rules))
}

/// Serves until `shutdown` resolves, then gives in-flight requests up to the
/// configured timeout to finish.
///
/// # Errors
///
/// Returns an I/O error if the listener cannot be bound or the server fails.
pub async fn serve<F>(config: Config, shutdown: F) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let addr = config.server.bind_addr()?;
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(%addr, rules = %config.rules, "Listening");

    let router = build_router(build_state(&config));
    let drain = Arc::new(Notify::new());
    let server = {
        let drain = Arc::clone(&drain);
        tokio::spawn(
            axum::serve(listener, router)
                .with_graceful_shutdown(async move { drain.notified().await })
                .into_future(),
        )
    };

    shutdown.await;
    tracing::info!("Shutting down gracefully...");
    drain.notify_one();

    match tokio::time::timeout(config.server.shutdown_timeout(), server).await {
        Ok(joined) => joined??,
        Err(_) => tracing::warn!(
            timeout_secs = config.server.shutdown_timeout,
            "Shutdown timed out; dropping in-flight requests"
        ),
    }
    Ok(())
}
