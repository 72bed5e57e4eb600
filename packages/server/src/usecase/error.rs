//! UseCase 層のエラー定義

use thiserror::Error;

/// 通知発行のエラー
#[derive(Debug, Error)]
pub enum PublishError {
    /// ペイロードが JSON オブジェクトではない
    #[error("Notification payload must be a JSON object")]
    InvalidPayload,

    /// フレームのシリアライズに失敗
    #[error("Failed to serialize notification frame: {0}")]
    Serialization(String),
}
