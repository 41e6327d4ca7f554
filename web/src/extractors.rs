//! Custom Axum extractors.
//!
//! Axum's stock `Json` and `Path` rejections use their own status codes and
//! plain-text bodies. These wrappers report every malformed request as a
//! `400 BAD_REQUEST` in the same JSON shape as the domain errors.

use crate::error::AppError;
use axum::{
    async_trait,
    extract::{FromRequest, FromRequestParts, Path, Request},
    http::request::Parts,
    Json,
};
use helpdesk_core::TicketId;
use serde::de::DeserializeOwned;

/// JSON body whose rejections render as [`AppError::bad_request`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ApiJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(rejection) => Err(AppError::bad_request(rejection.body_text())),
        }
    }
}

/// Ticket id taken from the `:id` path segment.
#[derive(Debug, Clone, Copy)]
pub struct TicketIdParam(pub TicketId);

#[async_trait]
impl<S> FromRequestParts<S> for TicketIdParam
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| AppError::bad_request(rejection.body_text()))?;

        raw.parse::<TicketId>()
            .map(Self)
            .map_err(|_| AppError::bad_request(format!("'{raw}' is not a valid ticket id")))
    }
}
