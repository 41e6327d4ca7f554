//! Router configuration.

use crate::handlers::{health::health_check, tickets};
use crate::middleware::correlation_id;
use crate::state::AppState;
use axum::{routing::get, Router};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// Build the complete Axum router.
///
/// The browser client is served from a different origin, hence the
/// permissive CORS layer.
pub fn build_router(state: AppState) -> Router {
    let ticket_routes = Router::new()
        .route(
            "/tickets",
            get(tickets::list_tickets).post(tickets::create_ticket),
        )
        .route(
            "/tickets/:id",
            get(tickets::get_ticket)
                .patch(tickets::update_ticket)
                .delete(tickets::delete_ticket),
        );

    Router::new()
        .route("/health", get(health_check))
        .merge(ticket_routes)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .layer(axum::middleware::from_fn(correlation_id))
        .with_state(state)
}
