//! WebSocket を使った NotificationPusher 実装
//!
//! ## 設計ノート
//!
//! WebSocket の生成は UI 層（`ui/handler/websocket.rs`）で行われます。
//! この実装は生成された `UnboundedSender` を受け取り、送信だけを担当します。

use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{ConnectionId, NotificationPusher, PusherChannel};

/// WebSocket を使った NotificationPusher 実装
///
/// ```ignore
/// let pusher = WebSocketNotificationPusher::new();
/// pusher.register(ConnectionId::generate(), tx).await;
/// let delivered = pusher.broadcast(r#"{"event":"receive_notification","data":{}}"#).await;
/// ```
#[derive(Default)]
pub struct WebSocketNotificationPusher {
    /// 接続中の購読者
    ///
    /// Key: ConnectionId
    /// Value: PusherChannel
    connections: Arc<Mutex<HashMap<ConnectionId, PusherChannel>>>,
}

impl WebSocketNotificationPusher {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl NotificationPusher for WebSocketNotificationPusher {
    async fn register(&self, connection_id: ConnectionId, sender: PusherChannel) {
        let mut connections = self.connections.lock().await;
        tracing::debug!("Connection '{}' registered", connection_id.as_str());
        connections.insert(connection_id, sender);
    }

    async fn unregister(&self, connection_id: &ConnectionId) {
        let mut connections = self.connections.lock().await;
        connections.remove(connection_id);
        tracing::debug!("Connection '{}' unregistered", connection_id.as_str());
    }

    async fn broadcast(&self, content: &str) -> usize {
        let connections = self.connections.lock().await;

        let mut delivered = 0;
        for (connection_id, sender) in connections.iter() {
            // ブロードキャストでは一部の送信失敗を許容
            if let Err(e) = sender.send(content.to_string()) {
                tracing::warn!(
                    "Failed to push message to '{}': {}",
                    connection_id.as_str(),
                    e
                );
            } else {
                delivered += 1;
            }
        }
        tracing::debug!("Broadcasted message to {} connection(s)", delivered);

        delivered
    }

    async fn connection_count(&self) -> usize {
        self.connections.lock().await.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;

    // ========================================
    // テスト作業記録
    // ========================================
    // 【何をテストするか】
    // - broadcast: 全購読者への送信と届いた件数
    // - unregister 後は送信対象から外れること
    // ========================================

    #[tokio::test]
    async fn test_broadcast_counts_delivered_connections() {
        // テスト項目: 受信側が閉じた購読者は件数に含まれない
        // given (前提条件):
        let pusher = WebSocketNotificationPusher::new();
        let (tx1, mut rx1) = mpsc::unbounded_channel();
        let (tx2, rx2) = mpsc::unbounded_channel();
        pusher.register(ConnectionId::from("alive"), tx1).await;
        pusher.register(ConnectionId::from("closed"), tx2).await;
        drop(rx2);

        // when (操作):
        let delivered = pusher.broadcast("Broadcast message").await;

        // then (期待する結果):
        assert_eq!(delivered, 1);
        assert_eq!(rx1.recv().await, Some("Broadcast message".to_string()));
    }

    #[tokio::test]
    async fn test_unregister_removes_connection() {
        // テスト項目: 登録解除した購読者にはブロードキャストされない
        // given (前提条件):
        let pusher = WebSocketNotificationPusher::new();
        let (tx, _rx) = mpsc::unbounded_channel();
        let connection_id = ConnectionId::from("conn-1");
        pusher.register(connection_id.clone(), tx).await;

        // when (操作):
        pusher.unregister(&connection_id).await;

        // then (期待する結果):
        assert_eq!(pusher.connection_count().await, 0);
        assert_eq!(pusher.broadcast("ignored").await, 0);
    }
}
