//! UseCase 層

mod connect_subscriber;
mod error;
mod publish_notification;

pub use connect_subscriber::ConnectSubscriberUseCase;
pub use error::PublishError;
pub use publish_notification::PublishNotificationUseCase;
