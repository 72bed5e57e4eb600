//! Server state shared by handlers.

use std::sync::Arc;

use crate::usecase::{ConnectSubscriberUseCase, PublishNotificationUseCase};

/// Shared application state
pub struct AppState {
    /// ConnectSubscriberUseCase（購読者の接続・切断）
    pub connect_subscriber_usecase: Arc<ConnectSubscriberUseCase>,
    /// PublishNotificationUseCase（通知の発行）
    pub publish_notification_usecase: Arc<PublishNotificationUseCase>,
}
