//! WebSocket-backed realtime channel.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use futures_util::StreamExt;
use hostel_notify_shared::event::{CONNECT, DISCONNECT, EventFrame};
use serde_json::Value;
use tokio::task::JoinHandle;
use tokio_tungstenite::{connect_async, tungstenite::protocol::Message};

use crate::{config::ChannelConfig, error::ChannelError};

use super::{
    reconnect::should_attempt_reconnect,
    registry::{EventHandler, HandlerRegistry, Subscription},
};

/// One persistent connection to the realtime endpoint.
///
/// Owned by the composition root and shared as `Arc<RealtimeChannel>`.
/// Events are dispatched one at a time, in the order the socket delivers them.
pub struct RealtimeChannel {
    config: ChannelConfig,
    registry: Arc<HandlerRegistry>,
    task: Mutex<Option<JoinHandle<()>>>,
}

impl RealtimeChannel {
    /// Create an unconnected channel. Call [`start`](Self::start) to connect.
    pub fn new(config: ChannelConfig) -> Arc<Self> {
        Arc::new(Self {
            config,
            registry: HandlerRegistry::new(),
            task: Mutex::new(None),
        })
    }

    fn task(&self) -> MutexGuard<'_, Option<JoinHandle<()>>> {
        self.task.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Spawn the connection task.
    ///
    /// Returns `false` when the task is already running; the existing
    /// connection is reused and no second socket is opened.
    /// Must be called from within a Tokio runtime.
    pub fn start(&self) -> bool {
        let mut task = self.task();
        if let Some(handle) = task.as_ref()
            && !handle.is_finished()
        {
            tracing::debug!("Realtime channel already running, reusing connection");
            return false;
        }

        *task = Some(tokio::spawn(run_connection_loop(
            self.config.clone(),
            self.registry.clone(),
        )));
        true
    }

    /// Whether the connection task is alive (connected or retrying)
    pub fn is_running(&self) -> bool {
        self.task()
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    /// Register `handler` for `event`.
    pub fn on(&self, event: &str, handler: Arc<dyn EventHandler>) -> Subscription {
        self.registry.register(event, handler)
    }

    /// Deregister the handler behind `subscription`.
    pub fn off(&self, subscription: Subscription) {
        subscription.unsubscribe();
    }

    /// Number of handlers registered for `event`
    pub fn handler_count(&self, event: &str) -> usize {
        self.registry.handler_count(event)
    }

    /// Stop the connection task. Idempotent.
    pub fn close(&self) {
        if let Some(handle) = self.task().take() {
            handle.abort();
            tracing::info!("Realtime channel closed");
        }
    }

    /// Deliver an event to local handlers as if it came from the socket.
    #[cfg(test)]
    pub(crate) async fn dispatch(&self, event: &str, payload: &Value) -> usize {
        self.registry.dispatch(event, payload).await
    }
}

impl Drop for RealtimeChannel {
    fn drop(&mut self) {
        self.close();
    }
}

async fn run_connection_loop(config: ChannelConfig, registry: Arc<HandlerRegistry>) {
    let mut failed_attempts = 0;

    loop {
        tracing::info!("Connecting to {}", config.url);

        match run_session(&config.url, &registry).await {
            Ok(()) => {
                failed_attempts = 0;
                tracing::warn!("Realtime connection lost");
            }
            Err(e) => {
                failed_attempts += 1;
                tracing::warn!("{} (failed attempt {})", e, failed_attempts);
            }
        }

        if !should_attempt_reconnect(failed_attempts, config.max_reconnect_attempts) {
            tracing::error!(
                "Giving up on {} after {} failed attempts",
                config.url,
                failed_attempts
            );
            break;
        }

        tracing::info!(
            "Reconnecting in {} seconds...",
            config.reconnect_interval.as_secs_f32()
        );
        tokio::time::sleep(config.reconnect_interval).await;
    }
}

/// Run one connection until it drops.
///
/// `Err` only when the handshake fails; a session that was established
/// always ends in `Ok`.
async fn run_session(url: &str, registry: &HandlerRegistry) -> Result<(), ChannelError> {
    let (mut ws_stream, _response) = connect_async(url)
        .await
        .map_err(|e| ChannelError::Connect(e.to_string()))?;

    tracing::info!("Realtime channel connected to {}", url);
    registry.dispatch(CONNECT, &Value::Null).await;

    while let Some(message) = ws_stream.next().await {
        match message {
            Ok(Message::Text(text)) => match serde_json::from_str::<EventFrame>(&text) {
                Ok(frame) if frame.event == CONNECT || frame.event == DISCONNECT => {
                    tracing::warn!("Ignoring reserved event '{}' from server", frame.event);
                }
                Ok(frame) => {
                    let invoked = registry.dispatch(&frame.event, &frame.data).await;
                    tracing::debug!("Event '{}' handled by {} handler(s)", frame.event, invoked);
                }
                Err(e) => {
                    tracing::warn!("Skipping malformed frame: {}", e);
                }
            },
            Ok(Message::Close(_)) => {
                tracing::info!("Server closed the connection");
                break;
            }
            Ok(_) => {}
            Err(e) => {
                tracing::warn!("WebSocket read error: {}", e);
                break;
            }
        }
    }

    registry.dispatch(DISCONNECT, &Value::Null).await;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::realtime::RecordingHandler;
    use std::time::Duration;
    use tokio::sync::Mutex as AsyncMutex;

    fn unreachable_config() -> ChannelConfig {
        ChannelConfig {
            url: "ws://127.0.0.1:9/ws".to_string(),
            reconnect_interval: Duration::from_secs(60),
            max_reconnect_attempts: None,
        }
    }

    #[tokio::test]
    async fn test_start_twice_reuses_running_task() {
        // テスト項目: 2 回目の start は既存の接続タスクを再利用する
        // given (前提条件):
        let channel = RealtimeChannel::new(unreachable_config());

        // when (操作):
        let first = channel.start();
        let second = channel.start();

        // then (期待する結果):
        assert!(first);
        assert!(!second);
        assert!(channel.is_running());
        channel.close();
    }

    #[tokio::test]
    async fn test_close_is_idempotent() {
        // テスト項目: close を 2 回呼んでも問題なく停止する
        // given (前提条件):
        let channel = RealtimeChannel::new(unreachable_config());
        channel.start();

        // when (操作):
        channel.close();
        channel.close();

        // then (期待する結果):
        assert!(!channel.is_running());
    }

    #[tokio::test]
    async fn test_gives_up_after_max_attempts() {
        // テスト項目: 失敗回数が上限に達すると接続タスクが終了する
        // given (前提条件):
        let channel = RealtimeChannel::new(ChannelConfig {
            reconnect_interval: Duration::from_millis(10),
            max_reconnect_attempts: Some(1),
            ..unreachable_config()
        });

        // when (操作):
        channel.start();
        let mut stopped = false;
        for _ in 0..200 {
            if !channel.is_running() {
                stopped = true;
                break;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }

        // then (期待する結果):
        assert!(stopped);
    }

    #[tokio::test]
    async fn test_off_stops_delivery() {
        // テスト項目: off したハンドラにはイベントが届かない
        // given (前提条件):
        let channel = RealtimeChannel::new(unreachable_config());
        let log = Arc::new(AsyncMutex::new(Vec::new()));
        let subscription = channel.on(
            "receive_notification",
            RecordingHandler::new("h", log.clone()),
        );

        // when (操作):
        channel.off(subscription);
        let invoked = channel
            .dispatch("receive_notification", &serde_json::json!({"message": "A"}))
            .await;

        // then (期待する結果):
        assert_eq!(invoked, 0);
        assert_eq!(channel.handler_count("receive_notification"), 0);
        assert!(log.lock().await.is_empty());
    }
}
