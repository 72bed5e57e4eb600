//! Notification state and its wiring to the realtime channel.

mod broadcaster;
mod model;
mod store;

pub use broadcaster::{NOTIFICATION_ICON, NotificationBroadcaster};
pub use model::{Notification, NotificationId};
pub use store::{NotificationFeed, NotificationStore};
