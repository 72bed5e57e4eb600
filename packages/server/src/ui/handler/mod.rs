//! Request handlers.

mod http;
mod websocket;

pub use http::{health_check, publish_notification};
pub use websocket::websocket_handler;
