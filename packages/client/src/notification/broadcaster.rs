//! Bridges `receive_notification` events into the store and the toast presenter.

use std::sync::Arc;

use async_trait::async_trait;
use hostel_notify_shared::event::RECEIVE_NOTIFICATION;
use serde_json::Value;

use crate::{
    realtime::{EventHandler, RealtimeChannel, Subscription},
    toast::{ToastHandle, ToastOptions},
};

use super::store::{NotificationFeed, NotificationStore};

/// Icon shown on toasts raised by realtime notifications
pub const NOTIFICATION_ICON: &str = "🔔";

struct ReceiveNotificationHandler {
    store: Arc<NotificationStore>,
    toasts: ToastHandle,
}

#[async_trait]
impl EventHandler for ReceiveNotificationHandler {
    async fn handle(&self, payload: &Value) {
        let notification = self.store.append(payload.clone()).await;
        self.toasts.show(
            ToastOptions::success(notification.display_text()).with_icon(NOTIFICATION_ICON),
        );
    }
}

/// A subscribed broadcaster.
///
/// Holding a value of this type is the Subscribed state; dropping it (or
/// calling [`unsubscribe`](Self::unsubscribe)) deregisters the handler.
pub struct NotificationBroadcaster {
    subscription: Subscription,
    feed: NotificationFeed,
}

impl NotificationBroadcaster {
    /// Register exactly one `receive_notification` handler on `channel`.
    pub fn subscribe(
        channel: &RealtimeChannel,
        store: Arc<NotificationStore>,
        toasts: ToastHandle,
    ) -> Self {
        let handler = Arc::new(ReceiveNotificationHandler {
            store: store.clone(),
            toasts,
        });
        let subscription = channel.on(RECEIVE_NOTIFICATION, handler);
        tracing::info!("Notification broadcaster subscribed");

        Self {
            subscription,
            feed: NotificationFeed::new(store),
        }
    }

    /// Read-only access for views
    pub fn feed(&self) -> NotificationFeed {
        self.feed.clone()
    }

    pub fn unsubscribe(self) {
        drop(self);
    }
}

impl Drop for NotificationBroadcaster {
    fn drop(&mut self) {
        tracing::info!(
            "Notification broadcaster unsubscribed from '{}'",
            self.subscription.event()
        );
    }
}
