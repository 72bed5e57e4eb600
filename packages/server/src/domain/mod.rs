//! ドメイン層
//!
//! 購読者（WebSocket 接続）の識別子と、通知送信のインターフェースを定義します。

mod pusher;

pub use pusher::{ConnectionId, NotificationPusher, PusherChannel};

#[cfg(test)]
pub use pusher::MockNotificationPusher;
