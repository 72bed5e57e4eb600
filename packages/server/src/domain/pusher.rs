//! NotificationPusher trait 定義
//!
//! UseCase 層はこの trait に依存し、WebSocket などの具体的な送信手段には依存しない。

use async_trait::async_trait;
use tokio::sync::mpsc;
use uuid::Uuid;

/// 購読者へ JSON テキストを届けるチャネル
pub type PusherChannel = mpsc::UnboundedSender<String>;

/// 購読者（WebSocket 接続）の識別子
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ConnectionId(String);

impl ConnectionId {
    /// 新しい接続 ID を発行
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ConnectionId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// 通知送信のインターフェース
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NotificationPusher: Send + Sync {
    /// 購読者を登録
    async fn register(&self, connection_id: ConnectionId, sender: PusherChannel);

    /// 購読者の登録を解除
    async fn unregister(&self, connection_id: &ConnectionId);

    /// 全ての購読者へ送信し、届いた件数を返す
    async fn broadcast(&self, content: &str) -> usize;

    /// 登録中の購読者数
    async fn connection_count(&self) -> usize;
}
