//! Server execution logic.

use std::{future::Future, sync::Arc};

use axum::{
    Router,
    routing::{get, post},
};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::usecase::{ConnectSubscriberUseCase, PublishNotificationUseCase};

use super::{
    handler::{health_check, publish_notification, websocket_handler},
    signal::shutdown_signal,
    state::AppState,
};

/// Development realtime server
///
/// # Example
///
/// ```ignore
/// let server = Server::new(connect_subscriber_usecase, publish_notification_usecase);
/// server.run("127.0.0.1".to_string(), 5000).await?;
/// ```
pub struct Server {
    /// ConnectSubscriberUseCase（購読者の接続・切断のユースケース）
    connect_subscriber_usecase: Arc<ConnectSubscriberUseCase>,
    /// PublishNotificationUseCase（通知発行のユースケース）
    publish_notification_usecase: Arc<PublishNotificationUseCase>,
}

impl Server {
    pub fn new(
        connect_subscriber_usecase: Arc<ConnectSubscriberUseCase>,
        publish_notification_usecase: Arc<PublishNotificationUseCase>,
    ) -> Self {
        Self {
            connect_subscriber_usecase,
            publish_notification_usecase,
        }
    }

    /// Build the router with all endpoints
    pub fn router(self) -> Router {
        let app_state = Arc::new(AppState {
            connect_subscriber_usecase: self.connect_subscriber_usecase,
            publish_notification_usecase: self.publish_notification_usecase,
        });

        Router::new()
            // WebSocket エンドポイント
            .route("/ws", get(websocket_handler))
            // HTTP エンドポイント
            .route("/api/health", get(health_check))
            .route("/api/notifications", post(publish_notification))
            .layer(TraceLayer::new_for_http())
            .with_state(app_state)
    }

    /// Run the server on `host:port` until Ctrl+C
    ///
    /// # Errors
    ///
    /// Returns an error if the server fails to bind to the specified address or
    /// if there's an error during server execution.
    pub async fn run(self, host: String, port: u16) -> Result<(), Box<dyn std::error::Error>> {
        let bind_addr = format!("{}:{}", host, port);
        let listener = TcpListener::bind(&bind_addr).await?;

        tracing::info!("Notification server listening on {}", listener.local_addr()?);
        tracing::info!("Connect to: ws://{}/ws", bind_addr);
        tracing::info!("Press Ctrl+C to shutdown gracefully");

        self.serve(listener, shutdown_signal()).await?;

        tracing::info!("Server shutdown complete");

        Ok(())
    }

    /// Serve on an already-bound listener until `shutdown` resolves
    pub async fn serve<F>(self, listener: TcpListener, shutdown: F) -> std::io::Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown)
            .await
    }
}
