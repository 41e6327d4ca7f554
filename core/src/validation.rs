//! Shape checks for creation and update payloads.
//!
//! Type and enum membership are enforced by deserialization; what remains
//! here are the value checks. Failures short-circuit before the guard.

use crate::error::{Result, TicketError};
use crate::patch::TicketPatch;
use crate::types::{ActorId, NewTicket, TicketPriority, TicketStatus, TicketTopic};
use serde::{Deserialize, Serialize};

/// Creation payload as submitted by a caller
///
/// `status` is accepted for compatibility with existing clients and then
/// discarded; new tickets always start in `CREATED`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateTicket {
    /// Short summary
    pub title: String,
    /// Free-form details
    pub description: String,
    /// Who files the ticket
    pub requester_id: ActorId,
    /// Optional initial assignee
    #[serde(default)]
    pub assignee_id: Option<ActorId>,
    /// Priority
    pub priority: TicketPriority,
    /// Topic
    pub topic: TicketTopic,
    /// Ignored
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<TicketStatus>,
}

/// Trims `value`, rejecting it if nothing is left
fn require_text(field: &str, value: String) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(TicketError::bad_request(format!("{field} must not be empty")));
    }
    if trimmed.len() == value.len() {
        Ok(value)
    } else {
        Ok(trimmed.to_string())
    }
}

/// Validates a creation payload and strips anything the caller may not set
///
/// # Errors
///
/// Returns [`TicketError::BadRequest`] if `title` or `description` is blank.
pub fn validate_create(request: CreateTicket) -> Result<NewTicket> {
    let title = require_text("title", request.title)?;
    let description = require_text("description", request.description)?;

    if let Some(status) = request.status {
        tracing::debug!(%status, "Ignoring caller-supplied status on create");
    }

    Ok(NewTicket {
        title,
        description,
        requester_id: request.requester_id,
        assignee_id: request.assignee_id,
        priority: request.priority,
        topic: request.topic,
    })
}

/// Validates an update payload, trimming any text it carries
///
/// # Errors
///
/// Returns [`TicketError::BadRequest`] if a present `title` or `description`
/// is blank.
pub fn validate_patch(mut patch: TicketPatch) -> Result<TicketPatch> {
    patch.title = patch
        .title
        .map(|title| require_text("title", title))
        .transpose()?;
    patch.description = patch
        .description
        .map(|description| require_text("description", description))
        .transpose()?;
    Ok(patch)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    fn request() -> CreateTicket {
        CreateTicket {
            title: "Printer jam".to_string(),
            description: "Tray 2 is stuck".to_string(),
            requester_id: ActorId::new(1),
            assignee_id: None,
            priority: TicketPriority::Low,
            topic: TicketTopic::Other,
            status: None,
        }
    }

    #[test]
    fn test_blank_title_rejected() {
        let mut req = request();
        req.title = "   ".to_string();
        assert_eq!(
            validate_create(req),
            Err(TicketError::BadRequest("title must not be empty".to_string()))
        );
    }

    #[test]
    fn test_blank_description_rejected() {
        let mut req = request();
        req.description = String::new();
        assert!(matches!(
            validate_create(req),
            Err(TicketError::BadRequest(_))
        ));
    }

    #[test]
    fn test_status_is_dropped() {
        let mut req = request();
        req.status = Some(TicketStatus::Completed);
        let fields = validate_create(req).unwrap();
        assert_eq!(fields.title, "Printer jam");
    }

    #[test]
    fn test_missing_required_field_fails_to_deserialize() {
        let result = serde_json::from_value::<CreateTicket>(json!({
            "title": "Printer jam",
            "description": "...",
            "priority": "LOW",
            "topic": "OTHER"
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_unknown_enum_value_fails_to_deserialize() {
        let result = serde_json::from_value::<CreateTicket>(json!({
            "title": "Printer jam",
            "description": "...",
            "requester_id": 1,
            "priority": "URGENT",
            "topic": "OTHER"
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_create_trims_text() {
        let mut req = request();
        req.title = "  Printer jam ".to_string();
        req.description = "\tTray 2 is stuck\n".to_string();
        let fields = validate_create(req).unwrap();
        assert_eq!(fields.title, "Printer jam");
        assert_eq!(fields.description, "Tray 2 is stuck");
    }

    #[test]
    fn test_patch_with_blank_title_rejected() {
        let patch = TicketPatch::new().with_title("");
        assert!(validate_patch(patch).is_err());
        assert_eq!(validate_patch(TicketPatch::new()), Ok(TicketPatch::new()));
    }

    #[test]
    fn test_patch_trims_text() {
        let patch = validate_patch(TicketPatch::new().with_title(" Printer on fire  ")).unwrap();
        assert_eq!(patch.title.as_deref(), Some("Printer on fire"));
        assert_eq!(patch.description, None);
    }
}
