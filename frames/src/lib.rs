//! Shared message model for the notification push channel.
//!
//! This crate owns the wire representation used by both the browser `client`
//! and the terminal `cli`. Messages are JSON objects tagged by a `type` field;
//! payloads stay close to what the server serializes so unknown extra fields
//! are tolerated.
//!
//! The connection lifecycle every consumer runs lives in [`lifecycle`].

pub mod lifecycle;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Inbound `type` tags this crate understands.
const INBOUND_TYPES: &[&str] = &["notification", "kanban_update", "pong"];

/// Error returned by [`decode_inbound`].
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    /// The text was not valid JSON or did not match the tagged shape.
    #[error("failed to decode push message: {0}")]
    Json(#[from] serde_json::Error),
    /// The message carried no string `type` field.
    #[error("push message has no type tag")]
    MissingType,
    /// The `type` tag is not one this client handles.
    #[error("unknown push message type: {0}")]
    UnknownType(String),
}

/// Review status of an application card.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplicationStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
}

impl ApplicationStatus {
    /// All statuses in board column order.
    pub const ALL: [Self; 3] = [Self::Pending, Self::Approved, Self::Rejected];

    /// Wire/form value, e.g. `"approved"`.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }

    /// Parse a wire/form value.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "pending" => Some(Self::Pending),
            "approved" => Some(Self::Approved),
            "rejected" => Some(Self::Rejected),
            _ => None,
        }
    }
}

/// Board-change action carried by a `kanban_update` message.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoardAction {
    NewApplication,
    ApplicationApproved,
    ApplicationRejected,
}

impl BoardAction {
    /// Column the affected card belongs in after this action.
    #[must_use]
    pub fn target_status(self) -> ApplicationStatus {
        match self {
            Self::NewApplication => ApplicationStatus::Pending,
            Self::ApplicationApproved => ApplicationStatus::Approved,
            Self::ApplicationRejected => ApplicationStatus::Rejected,
        }
    }
}

/// A notification as serialized by the server.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NotificationPayload {
    pub id: u64,
    pub title: String,
    pub message: String,
    /// Server-rendered relative age label ("5 minutes ago").
    #[serde(default)]
    pub time_ago: String,
    #[serde(default)]
    pub is_read: bool,
    #[serde(default)]
    pub notification_type: Option<String>,
    #[serde(default)]
    pub application_id: Option<u64>,
}

/// The application record attached to a board update.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ApplicationPayload {
    pub id: u64,
    #[serde(default)]
    pub original_filename: String,
    #[serde(default)]
    pub status: ApplicationStatus,
    #[serde(default)]
    pub status_display: Option<String>,
}

/// Server -> client push message.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Inbound {
    Notification { data: NotificationPayload },
    KanbanUpdate { action: BoardAction, application: ApplicationPayload },
    Pong,
}

/// Client -> server push message.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Outbound {
    /// Keep-alive; the server answers with [`Inbound::Pong`].
    Ping,
    /// Best-effort read echo. The HTTP endpoint stays authoritative.
    MarkRead { notification_id: u64 },
}

/// Decode one text message from the push channel.
///
/// # Errors
///
/// Returns [`CodecError::Json`] for malformed text or payloads,
/// [`CodecError::MissingType`] when no `type` tag is present and
/// [`CodecError::UnknownType`] for tags outside the handled set.
pub fn decode_inbound(text: &str) -> Result<Inbound, CodecError> {
    let value: Value = serde_json::from_str(text)?;
    let kind = value
        .get("type")
        .and_then(Value::as_str)
        .ok_or(CodecError::MissingType)?;
    if !INBOUND_TYPES.contains(&kind) {
        return Err(CodecError::UnknownType(kind.to_owned()));
    }
    Ok(serde_json::from_value(value)?)
}

/// Encode an outbound message as JSON text.
#[must_use]
pub fn encode_outbound(message: &Outbound) -> String {
    // Serializing a unit or integer-only variant cannot fail.
    serde_json::to_string(message).unwrap_or_default()
}

#[cfg(test)]
#[path = "lib_test.rs"]
mod tests;
