//! Shared building blocks for hostel-notify packages.
//!
//! - `logger`: tracing subscriber setup for the binaries
//! - `time`: clock abstraction and timestamp formatting
//! - `event`: realtime wire frame and reserved event names

pub mod event;
pub mod logger;
pub mod time;
