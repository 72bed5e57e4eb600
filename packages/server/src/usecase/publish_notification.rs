//! UseCase: 通知の発行処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - PublishNotificationUseCase::execute() メソッド
//! - ペイロードを `receive_notification` フレームに包んで全購読者へ送ること
//!
//! ### どのような状況を想定しているか
//! - 正常系：オブジェクトのペイロード（追加フィールドもそのまま届く）
//! - 異常系：オブジェクト以外のペイロード

use std::sync::Arc;

use hostel_notify_shared::event::EventFrame;
use serde_json::Value;

use crate::domain::NotificationPusher;

use super::error::PublishError;

/// 通知発行のユースケース
pub struct PublishNotificationUseCase {
    /// NotificationPusher（通知送信の抽象化）
    pusher: Arc<dyn NotificationPusher>,
}

impl PublishNotificationUseCase {
    pub fn new(pusher: Arc<dyn NotificationPusher>) -> Self {
        Self { pusher }
    }

    /// 通知を発行する
    ///
    /// # Returns
    ///
    /// * `Ok(usize)` - 通知が届いた購読者数
    /// * `Err(PublishError)` - ペイロード不正、またはシリアライズ失敗
    pub async fn execute(&self, payload: Value) -> Result<usize, PublishError> {
        if !payload.is_object() {
            return Err(PublishError::InvalidPayload);
        }

        let frame = EventFrame::notification(payload);
        let json = serde_json::to_string(&frame)
            .map_err(|e| PublishError::Serialization(e.to_string()))?;

        let delivered = self.pusher.broadcast(&json).await;
        tracing::info!("Notification delivered to {} subscriber(s)", delivered);

        Ok(delivered)
    }
}
