//! Client configuration.

use std::{path::PathBuf, time::Duration};

/// Default realtime endpoint of the hostel backend
pub const DEFAULT_SOCKET_URL: &str = "ws://127.0.0.1:5000/ws";

/// Default REST base URL of the hostel backend
pub const DEFAULT_API_URL: &str = "http://127.0.0.1:5000";

const DEFAULT_RECONNECT_INTERVAL_SECS: u64 = 5;

/// Realtime channel settings
#[derive(Debug, Clone)]
pub struct ChannelConfig {
    /// WebSocket endpoint
    pub url: String,
    /// Wait between reconnection attempts
    pub reconnect_interval: Duration,
    /// Consecutive failed attempts before giving up; `None` retries forever
    pub max_reconnect_attempts: Option<u32>,
}

impl ChannelConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            reconnect_interval: Duration::from_secs(DEFAULT_RECONNECT_INTERVAL_SECS),
            max_reconnect_attempts: None,
        }
    }
}

impl Default for ChannelConfig {
    fn default() -> Self {
        Self::new(DEFAULT_SOCKET_URL)
    }
}

/// Settings for the whole client application
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub channel: ChannelConfig,
    /// REST base URL used by `ApiClient`
    pub api_url: String,
    /// File holding the persisted access token and user profile
    pub session_file: PathBuf,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            channel: ChannelConfig::default(),
            api_url: DEFAULT_API_URL.to_string(),
            session_file: PathBuf::from("session.json"),
        }
    }
}
