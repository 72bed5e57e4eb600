//! Reconnection policy.
//!
//! Pure functions, kept apart from the socket loop so they are easy to test.

/// Check if the channel should attempt another connection.
///
/// # Arguments
///
/// * `failed_attempts` - Consecutive failed connection attempts so far
/// * `max_attempts` - Limit on consecutive failures; `None` means unlimited
pub fn should_attempt_reconnect(failed_attempts: u32, max_attempts: Option<u32>) -> bool {
    match max_attempts {
        Some(max) => failed_attempts < max,
        None => true,
    }
}
