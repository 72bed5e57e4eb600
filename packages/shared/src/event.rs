//! Realtime wire frame shared by the client channel and the dev server.
//!
//! Every WebSocket text frame carries one JSON object:
//!
//! ```json
//! {"event": "receive_notification", "data": {"message": "Issue #42 resolved"}}
//! ```

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Server-emitted notification event
pub const RECEIVE_NOTIFICATION: &str = "receive_notification";

/// Client-local event fired after every successful (re)connection
pub const CONNECT: &str = "connect";

/// Client-local event fired when an established connection drops
pub const DISCONNECT: &str = "disconnect";

/// A named event with a free-form payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventFrame {
    pub event: String,
    #[serde(default)]
    pub data: Value,
}

impl EventFrame {
    pub fn new(event: impl Into<String>, data: Value) -> Self {
        Self {
            event: event.into(),
            data,
        }
    }

    /// Build a `receive_notification` frame
    pub fn notification(data: Value) -> Self {
        Self::new(RECEIVE_NOTIFICATION, data)
    }
}
