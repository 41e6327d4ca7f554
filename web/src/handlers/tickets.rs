//! Ticket endpoints.
//!
//! - `GET    /tickets`     - list, newest first
//! - `POST   /tickets`     - create (status is always `CREATED`)
//! - `GET    /tickets/:id` - fetch one
//! - `PATCH  /tickets/:id` - partial update through the transition guard
//! - `DELETE /tickets/:id` - refused unless legacy rules are configured

use crate::error::AppError;
use crate::extractors::{ApiJson, TicketIdParam};
use crate::state::AppState;
use axum::{extract::State, http::StatusCode, Json};
use helpdesk_core::{CreateTicket, Ticket, TicketPatch};

/// List all tickets.
///
/// ```bash
/// curl http://localhost:3000/tickets
/// ```
pub async fn list_tickets(State(state): State<AppState>) -> Result<Json<Vec<Ticket>>, AppError> {
    Ok(Json(state.tickets.list_tickets().await?))
}

/// Create a ticket.
///
/// ```bash
/// curl -X POST http://localhost:3000/tickets \
///   -H "Content-Type: application/json" \
///   -d '{
///     "title": "Printer jam",
///     "description": "Paper stuck in tray 2",
///     "requester_id": 1,
///     "priority": "LOW",
///     "topic": "OTHER"
///   }'
/// ```
pub async fn create_ticket(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<CreateTicket>,
) -> Result<(StatusCode, Json<Ticket>), AppError> {
    let ticket = state.tickets.create_ticket(request).await?;
    Ok((StatusCode::CREATED, Json(ticket)))
}

/// Fetch one ticket.
pub async fn get_ticket(
    State(state): State<AppState>,
    TicketIdParam(id): TicketIdParam,
) -> Result<Json<Ticket>, AppError> {
    Ok(Json(state.tickets.get_ticket(id).await?))
}

/// Partially update a ticket.
///
/// Only keys present in the body change. `"assignee_id": null` clears the
/// assignee, which is refused while the ticket is `IN_PROGRESS`.
///
/// ```bash
/// curl -X PATCH http://localhost:3000/tickets/<id> \
///   -H "Content-Type: application/json" \
///   -d '{"assignee_id": 7, "status": "IN_PROGRESS"}'
/// ```
pub async fn update_ticket(
    State(state): State<AppState>,
    TicketIdParam(id): TicketIdParam,
    ApiJson(patch): ApiJson<TicketPatch>,
) -> Result<Json<Ticket>, AppError> {
    Ok(Json(state.tickets.update_ticket(id, patch).await?))
}

/// Delete a ticket.
///
/// Answers `405` under enforced rules; tickets are closed by moving them to
/// `COMPLETED`.
pub async fn delete_ticket(
    State(state): State<AppState>,
    TicketIdParam(id): TicketIdParam,
) -> Result<StatusCode, AppError> {
    state.tickets.delete_ticket(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
