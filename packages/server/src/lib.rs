//! Development realtime endpoint for hostel-notify.
//!
//! Accepts WebSocket subscribers and pushes `receive_notification` frames to
//! all of them whenever a notification is published over HTTP.

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;
