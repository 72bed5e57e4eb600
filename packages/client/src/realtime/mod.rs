//! Realtime channel: one WebSocket connection with named-event pub/sub.

mod channel;
mod reconnect;
mod registry;

pub use channel::RealtimeChannel;
pub use registry::{EventHandler, Subscription};

#[cfg(test)]
pub(crate) use registry::tests::RecordingHandler;
