//! UseCase: 購読者の接続・切断処理

use std::sync::Arc;

use crate::domain::{ConnectionId, NotificationPusher, PusherChannel};

/// 購読者の接続・切断のユースケース
pub struct ConnectSubscriberUseCase {
    /// NotificationPusher（通知送信の抽象化）
    pusher: Arc<dyn NotificationPusher>,
}

impl ConnectSubscriberUseCase {
    pub fn new(pusher: Arc<dyn NotificationPusher>) -> Self {
        Self { pusher }
    }

    /// 新しい接続 ID を発行し、送信チャネルを登録する
    pub async fn execute(&self, sender: PusherChannel) -> ConnectionId {
        let connection_id = ConnectionId::generate();
        self.pusher.register(connection_id.clone(), sender).await;
        connection_id
    }

    /// 接続の登録を解除する（冪等）
    pub async fn disconnect(&self, connection_id: &ConnectionId) {
        self.pusher.unregister(connection_id).await;
    }

    /// 接続中の購読者数
    pub async fn connection_count(&self) -> usize {
        self.pusher.connection_count().await
    }
}
