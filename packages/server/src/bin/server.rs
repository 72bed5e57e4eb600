//! Development notification server.
//!
//! Accepts WebSocket subscribers on `/ws` and pushes a `receive_notification`
//! frame to all of them for every `POST /api/notifications`.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin hostel-notify-server
//! cargo run --bin hostel-notify-server -- --host 0.0.0.0 --port 5000
//! curl -X POST localhost:5000/api/notifications -H 'content-type: application/json' \
//!      -d '{"message":"Issue #42 resolved"}'
//! ```

use std::sync::Arc;

use clap::Parser;
use hostel_notify_server::{
    infrastructure::message_pusher::WebSocketNotificationPusher,
    ui::Server,
    usecase::{ConnectSubscriberUseCase, PublishNotificationUseCase},
};
use hostel_notify_shared::logger::setup_logger;

#[derive(Parser, Debug)]
#[command(name = "hostel-notify-server")]
#[command(about = "Development realtime endpoint emitting receive_notification events", long_about = None)]
struct Args {
    /// Host address to bind the server to
    #[arg(short = 'H', long, default_value = "127.0.0.1")]
    host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, default_value = "5000")]
    port: u16,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "debug");

    let args = Args::parse();

    // 1. NotificationPusher (WebSocket implementation)
    let pusher = Arc::new(WebSocketNotificationPusher::new());

    // 2. UseCases
    let connect_subscriber_usecase = Arc::new(ConnectSubscriberUseCase::new(pusher.clone()));
    let publish_notification_usecase = Arc::new(PublishNotificationUseCase::new(pusher));

    // 3. Server
    let server = Server::new(connect_subscriber_usecase, publish_notification_usecase);
    if let Err(e) = server.run(args.host, args.port).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
