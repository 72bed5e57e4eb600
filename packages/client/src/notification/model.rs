//! Notification entity.

use hostel_notify_shared::time::timestamp_to_rfc3339;
use serde_json::Value;

/// Locally generated, strictly increasing identifier.
///
/// Time-based (Unix millis) but bumped past the previous id so two
/// notifications arriving in the same millisecond never collide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NotificationId(i64);

impl NotificationId {
    pub(crate) fn next(previous: Option<NotificationId>, now_millis: i64) -> Self {
        match previous {
            Some(NotificationId(last)) if now_millis <= last => Self(last + 1),
            _ => Self(now_millis),
        }
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

/// One received notification.
///
/// The server payload is kept verbatim; only `read` ever changes.
#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    id: NotificationId,
    payload: Value,
    received_at: i64,
    read: bool,
}

impl Notification {
    pub(crate) fn new(id: NotificationId, payload: Value, received_at: i64) -> Self {
        Self {
            id,
            payload,
            received_at,
            read: false,
        }
    }

    pub fn id(&self) -> NotificationId {
        self.id
    }

    /// The payload exactly as the server sent it
    pub fn payload(&self) -> &Value {
        &self.payload
    }

    /// A top-level payload field
    pub fn field(&self, key: &str) -> Option<&Value> {
        self.payload.get(key)
    }

    /// `payload.message`, or the payload itself when the server sent a bare string
    pub fn message(&self) -> Option<&str> {
        match &self.payload {
            Value::String(message) => Some(message),
            other => other.get("message").and_then(Value::as_str),
        }
    }

    /// Text to show for this notification, falling back to the raw payload
    pub fn display_text(&self) -> String {
        match self.message() {
            Some(message) => message.to_string(),
            None => self.payload.to_string(),
        }
    }

    /// Client-side arrival time (Unix millis)
    pub fn received_at(&self) -> i64 {
        self.received_at
    }

    pub fn received_at_rfc3339(&self) -> Option<String> {
        timestamp_to_rfc3339(self.received_at)
    }

    pub fn is_read(&self) -> bool {
        self.read
    }

    pub(crate) fn mark_read(&mut self) {
        self.read = true;
    }
}
