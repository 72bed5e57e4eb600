//! View lifetimes.
//!
//! A `ViewScope` stands for one mounted view (page). Work started on behalf
//! of the view checks, on completion, whether the view is still mounted, and
//! realtime subscriptions held by the view are released when it unmounts.

use std::{
    future::Future,
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
};

use crate::realtime::Subscription;

/// One mounted view. Unmounts on drop.
pub struct ViewScope {
    name: String,
    mounted: Arc<AtomicBool>,
    subscriptions: Vec<Subscription>,
}

impl ViewScope {
    pub fn mount(name: impl Into<String>) -> Self {
        let name = name.into();
        tracing::debug!("View '{}' mounted", name);
        Self {
            name,
            mounted: Arc::new(AtomicBool::new(true)),
            subscriptions: Vec::new(),
        }
    }

    /// Cheap handle for async work started by this view
    pub fn handle(&self) -> ScopeHandle {
        ScopeHandle {
            mounted: self.mounted.clone(),
        }
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted.load(Ordering::Acquire)
    }

    /// Keep `subscription` alive exactly as long as the view is mounted.
    pub fn hold(&mut self, subscription: Subscription) {
        self.subscriptions.push(subscription);
    }

    pub fn unmount(self) {
        drop(self);
    }
}

impl Drop for ViewScope {
    fn drop(&mut self) {
        self.mounted.store(false, Ordering::Release);
        let released = self.subscriptions.len();
        self.subscriptions.clear();
        tracing::debug!(
            "View '{}' unmounted, released {} subscription(s)",
            self.name,
            released
        );
    }
}

/// Lets async work find out whether its view is still mounted.
#[derive(Clone)]
pub struct ScopeHandle {
    mounted: Arc<AtomicBool>,
}

impl ScopeHandle {
    pub fn is_mounted(&self) -> bool {
        self.mounted.load(Ordering::Acquire)
    }

    /// Await `future`; `None` if the view unmounted before it resolved.
    pub async fn guard<F>(&self, future: F) -> Option<F::Output>
    where
        F: Future,
    {
        let output = future.await;
        if self.is_mounted() {
            Some(output)
        } else {
            tracing::debug!("Discarding result for unmounted view");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::ChannelConfig, realtime::RealtimeChannel, realtime::RecordingHandler};
    use std::time::Duration;
    use tokio::sync::{Mutex, oneshot};

    #[tokio::test]
    async fn test_guard_returns_result_while_mounted() {
        // テスト項目: マウント中に完了した結果はそのまま返される
        // given (前提条件):
        let scope = ViewScope::mount("dashboard");
        let handle = scope.handle();

        // when (操作):
        let result = handle.guard(async { 42 }).await;

        // then (期待する結果):
        assert_eq!(result, Some(42));
    }

    #[tokio::test]
    async fn test_guard_discards_result_after_unmount() {
        // テスト項目: アンマウント後に完了した結果は破棄される
        // given (前提条件):
        let scope = ViewScope::mount("my-issues");
        let handle = scope.handle();
        let (tx, rx) = oneshot::channel::<&str>();
        let pending = tokio::spawn(async move { handle.guard(rx).await });

        // when (操作):
        scope.unmount();
        tokio::time::sleep(Duration::from_millis(10)).await;
        tx.send("issues").unwrap();

        // then (期待する結果):
        assert!(pending.await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_unmount_releases_held_subscriptions() {
        // テスト項目: アンマウントで保持していた購読が解除される
        // given (前提条件):
        let channel = RealtimeChannel::new(ChannelConfig::new("ws://127.0.0.1:9/ws"));
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut scope = ViewScope::mount("announcements");
        scope.hold(channel.on("receive_notification", RecordingHandler::new("view", log)));
        assert_eq!(channel.handler_count("receive_notification"), 1);

        // when (操作):
        scope.unmount();

        // then (期待する結果):
        assert_eq!(channel.handler_count("receive_notification"), 0);
    }
}
