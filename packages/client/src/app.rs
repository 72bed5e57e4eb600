//! Composition root.
//!
//! Builds the one realtime channel, the one notification store and the one
//! toast presenter, and wires them together. Views receive handles from here
//! instead of reaching for globals.

use std::sync::Arc;

use async_trait::async_trait;
use hostel_notify_shared::{
    event::{CONNECT, DISCONNECT},
    time::{Clock, SystemClock},
};
use serde_json::Value;
use tokio::task::JoinHandle;

use crate::{
    config::ChannelConfig,
    notification::{NotificationBroadcaster, NotificationFeed, NotificationStore},
    realtime::{EventHandler, RealtimeChannel, Subscription},
    toast::{ToastHandle, ToastPresenter, ToastSink},
};

/// Diagnostic logging of connection lifecycle events
struct ConnectionLogger {
    url: String,
}

#[async_trait]
impl EventHandler for ConnectionLogger {
    async fn handle(&self, _payload: &Value) {
        tracing::info!("Listening for notifications on {}", self.url);
    }
}

struct DisconnectionLogger;

#[async_trait]
impl EventHandler for DisconnectionLogger {
    async fn handle(&self, _payload: &Value) {
        tracing::warn!("Notifications paused until the connection is back");
    }
}

/// The running notification subsystem
pub struct App {
    channel: Arc<RealtimeChannel>,
    store: Arc<NotificationStore>,
    toasts: ToastHandle,
    presenter: JoinHandle<()>,
    broadcaster: Option<NotificationBroadcaster>,
    lifecycle_logs: Vec<Subscription>,
}

impl App {
    /// Start everything with the system clock. Must run inside a Tokio runtime.
    pub fn start(config: ChannelConfig, sink: Box<dyn ToastSink>) -> Self {
        Self::start_with_clock(config, sink, Arc::new(SystemClock))
    }

    pub fn start_with_clock(
        config: ChannelConfig,
        sink: Box<dyn ToastSink>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let (toasts, presenter) = ToastPresenter::spawn(sink, clock.clone());
        let store = NotificationStore::new(clock);

        let url = config.url.clone();
        let channel = RealtimeChannel::new(config);
        let lifecycle_logs = vec![
            channel.on(CONNECT, Arc::new(ConnectionLogger { url })),
            channel.on(DISCONNECT, Arc::new(DisconnectionLogger)),
        ];
        let broadcaster =
            NotificationBroadcaster::subscribe(&channel, store.clone(), toasts.clone());
        channel.start();

        Self {
            channel,
            store,
            toasts,
            presenter,
            broadcaster: Some(broadcaster),
            lifecycle_logs,
        }
    }

    /// Read-only notification state for views
    pub fn notifications(&self) -> NotificationFeed {
        NotificationFeed::new(self.store.clone())
    }

    pub fn toasts(&self) -> ToastHandle {
        self.toasts.clone()
    }

    pub fn channel(&self) -> Arc<RealtimeChannel> {
        self.channel.clone()
    }

    /// Unsubscribe, close the channel and stop the presenter.
    pub fn shutdown(self) {
        drop(self);
    }
}

impl Drop for App {
    fn drop(&mut self) {
        drop(self.broadcaster.take());
        self.lifecycle_logs.clear();
        self.channel.close();
        self.presenter.abort();
        tracing::info!("Notification subsystem stopped");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::toast::{ChannelToastSink, ToastEvent};
    use hostel_notify_shared::{event::RECEIVE_NOTIFICATION, time::FixedClock};
    use serde_json::json;
    use std::time::Duration;

    fn offline_config() -> ChannelConfig {
        ChannelConfig {
            reconnect_interval: Duration::from_secs(60),
            ..ChannelConfig::new("ws://127.0.0.1:9/ws")
        }
    }

    #[tokio::test]
    async fn test_start_wires_exactly_one_notification_handler() {
        // テスト項目: 起動時に receive_notification のハンドラがちょうど 1 つ登録される
        // given (前提条件):
        let (sink, _rx) = ChannelToastSink::new();

        // when (操作):
        let app = App::start(offline_config(), Box::new(sink));

        // then (期待する結果):
        let channel = app.channel();
        assert_eq!(channel.handler_count(RECEIVE_NOTIFICATION), 1);
        assert_eq!(channel.handler_count(CONNECT), 1);
        assert!(channel.is_running());
    }

    #[tokio::test]
    async fn test_event_reaches_feed_and_toast() {
        // テスト項目: イベントがフィードとトーストの両方に届く
        // given (前提条件):
        let (sink, mut toast_rx) = ChannelToastSink::new();
        let app = App::start_with_clock(
            offline_config(),
            Box::new(sink),
            Arc::new(FixedClock::new(1_700_000_000_000)),
        );

        // when (操作):
        app.channel()
            .dispatch(RECEIVE_NOTIFICATION, &json!({"message": "Issue #42 resolved"}))
            .await;

        // then (期待する結果):
        let feed = app.notifications();
        assert_eq!(feed.unread_count().await, 1);
        assert!(matches!(toast_rx.recv().await, Some(ToastEvent::Shown(_))));
    }

    #[tokio::test]
    async fn test_shutdown_releases_handlers_and_closes_channel() {
        // テスト項目: shutdown でハンドラが解除され、チャネルが閉じる
        // given (前提条件):
        let (sink, _rx) = ChannelToastSink::new();
        let app = App::start(offline_config(), Box::new(sink));
        let channel = app.channel();
        let feed = app.notifications();

        // when (操作):
        app.shutdown();
        channel
            .dispatch(RECEIVE_NOTIFICATION, &json!({"message": "late"}))
            .await;

        // then (期待する結果):
        assert_eq!(channel.handler_count(RECEIVE_NOTIFICATION), 0);
        assert_eq!(channel.handler_count(CONNECT), 0);
        assert!(!channel.is_running());
        assert_eq!(feed.unread_count().await, 0);
    }
}
