//! Terminal notification client for the hostel student dashboard.
//!
//! Connects to the realtime endpoint, shows every `receive_notification`
//! event as a toast and keeps an unread badge.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin hostel-notify-client
//! cargo run --bin hostel-notify-client -- --url ws://127.0.0.1:5000/ws listen
//! cargo run --bin hostel-notify-client -- get /api/announcements
//! cargo run --bin hostel-notify-client -- session
//! ```

use std::{path::PathBuf, time::Duration};

use clap::{Parser, Subcommand};
use hostel_notify_client::{
    api::ApiClient,
    config::{ChannelConfig, ClientConfig, DEFAULT_API_URL, DEFAULT_SOCKET_URL},
    runner::run_listener,
    session::SessionStorage,
};
use hostel_notify_shared::logger::setup_logger;

#[derive(Parser, Debug)]
#[command(name = "hostel-notify-client")]
#[command(about = "Realtime notification client for the hostel student dashboard", long_about = None)]
struct Args {
    /// Realtime WebSocket endpoint
    #[arg(short = 'u', long, default_value = DEFAULT_SOCKET_URL)]
    url: String,

    /// REST API base URL
    #[arg(short = 'a', long, default_value = DEFAULT_API_URL)]
    api_url: String,

    /// File holding the access token and user profile
    #[arg(short = 's', long, default_value = "session.json")]
    session_file: PathBuf,

    /// Seconds to wait between reconnection attempts
    #[arg(long, default_value_t = 5)]
    reconnect_interval_secs: u64,

    /// Give up after this many consecutive failed attempts (default: never)
    #[arg(long)]
    max_reconnect_attempts: Option<u32>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Listen for notifications until Ctrl+C (default)
    Listen,
    /// GET a REST path with the stored token and print the response
    Get { path: String },
    /// Show the stored session
    Session,
}

impl Args {
    fn client_config(&self) -> ClientConfig {
        ClientConfig {
            channel: ChannelConfig {
                url: self.url.clone(),
                reconnect_interval: Duration::from_secs(self.reconnect_interval_secs),
                max_reconnect_attempts: self.max_reconnect_attempts,
            },
            api_url: self.api_url.clone(),
            session_file: self.session_file.clone(),
        }
    }
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "info");

    let args = Args::parse();
    let config = args.client_config();

    let result = match args.command.unwrap_or(Command::Listen) {
        Command::Listen => run_listener(config).await,
        Command::Get { path } => {
            let client = ApiClient::new(config.api_url, SessionStorage::new(config.session_file));
            let response = client.fetch_data(&path).await;
            match serde_json::to_string_pretty(&response) {
                Ok(json) => println!("{}", json),
                Err(e) => tracing::error!("Failed to format response: {}", e),
            }
            if response.success {
                Ok(())
            } else {
                Err(response.message.into())
            }
        }
        Command::Session => match SessionStorage::new(config.session_file).load().await {
            Ok(session) => {
                println!(
                    "user: {}\ntoken: {}",
                    session.display_name().unwrap_or("(none)"),
                    if session.access_token.is_some() { "present" } else { "absent" }
                );
                Ok(())
            }
            Err(e) => Err(e.into()),
        },
    };

    if let Err(e) = result {
        tracing::error!("Client error: {}", e);
        std::process::exit(1);
    }
}
