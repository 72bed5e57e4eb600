//! Realtime notification client for the hostel student dashboard.
//!
//! Data flow: the server emits `receive_notification` on the
//! [`RealtimeChannel`](realtime::RealtimeChannel) → the
//! [`NotificationBroadcaster`](notification::NotificationBroadcaster) appends
//! it to the [`NotificationStore`](notification::NotificationStore) → the
//! toast presenter shows a popup → views watching the unread counter update.

pub mod api;
pub mod app;
pub mod config;
pub mod error;
pub mod notification;
pub mod realtime;
pub mod runner;
pub mod session;
pub mod toast;
pub mod view;
