//! Named-event handler registry with scoped subscriptions.

use std::{
    collections::HashMap,
    sync::{
        Arc, Mutex, MutexGuard, PoisonError, Weak,
        atomic::{AtomicU64, Ordering},
    },
};

use async_trait::async_trait;
use serde_json::Value;

/// Receives the payload of one named event.
#[async_trait]
pub trait EventHandler: Send + Sync {
    async fn handle(&self, payload: &Value);
}

type HandlerId = u64;

type HandlerList = Vec<(HandlerId, Arc<dyn EventHandler>)>;

/// Handlers keyed by event name, kept in registration order.
#[derive(Default)]
pub(crate) struct HandlerRegistry {
    handlers: Mutex<HashMap<String, HandlerList>>,
    next_id: AtomicU64,
}

impl HandlerRegistry {
    pub(crate) fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    // Critical sections never await, so a poisoned map is still consistent.
    fn lock(&self) -> MutexGuard<'_, HashMap<String, HandlerList>> {
        self.handlers.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub(crate) fn register(
        self: &Arc<Self>,
        event: &str,
        handler: Arc<dyn EventHandler>,
    ) -> Subscription {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        self.lock()
            .entry(event.to_string())
            .or_default()
            .push((id, handler));
        tracing::debug!("Handler {} registered for '{}'", id, event);

        Subscription {
            registry: Arc::downgrade(self),
            event: event.to_string(),
            id,
        }
    }

    fn unregister(&self, event: &str, id: HandlerId) {
        let mut handlers = self.lock();
        if let Some(list) = handlers.get_mut(event) {
            list.retain(|(handler_id, _)| *handler_id != id);
            if list.is_empty() {
                handlers.remove(event);
            }
        }
        tracing::debug!("Handler {} unregistered from '{}'", id, event);
    }

    /// Number of handlers currently registered for `event`
    pub(crate) fn handler_count(&self, event: &str) -> usize {
        self.lock().get(event).map_or(0, Vec::len)
    }

    /// Invoke every handler for `event` in registration order.
    ///
    /// Returns the number of handlers invoked.
    pub(crate) async fn dispatch(&self, event: &str, payload: &Value) -> usize {
        // Snapshot so handlers may subscribe or unsubscribe while running.
        let handlers: Vec<Arc<dyn EventHandler>> = {
            let map = self.lock();
            map.get(event)
                .map(|list| list.iter().map(|(_, handler)| handler.clone()).collect())
                .unwrap_or_default()
        };

        for handler in &handlers {
            handler.handle(payload).await;
        }

        handlers.len()
    }
}

/// A live handler registration.
///
/// Dropping the subscription unregisters the handler, so the pairing of
/// `on` and `off` holds on every exit path.
#[must_use = "dropping a Subscription unregisters its handler immediately"]
pub struct Subscription {
    registry: Weak<HandlerRegistry>,
    event: String,
    id: HandlerId,
}

impl Subscription {
    /// The event name this subscription listens to
    pub fn event(&self) -> &str {
        &self.event
    }

    /// Unregister the handler now.
    pub fn unsubscribe(self) {
        drop(self);
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("event", &self.event)
            .field("id", &self.id)
            .finish()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(registry) = self.registry.upgrade() {
            registry.unregister(&self.event, self.id);
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use tokio::sync::Mutex as AsyncMutex;

    /// Records payloads it receives, tagged with a label.
    pub(crate) struct RecordingHandler {
        label: &'static str,
        log: Arc<AsyncMutex<Vec<(String, Value)>>>,
    }

    impl RecordingHandler {
        pub(crate) fn new(
            label: &'static str,
            log: Arc<AsyncMutex<Vec<(String, Value)>>>,
        ) -> Arc<Self> {
            Arc::new(Self { label, log })
        }
    }

    #[async_trait]
    impl EventHandler for RecordingHandler {
        async fn handle(&self, payload: &Value) {
            self.log
                .lock()
                .await
                .push((self.label.to_string(), payload.clone()));
        }
    }

    #[tokio::test]
    async fn test_dispatch_runs_handlers_in_registration_order() {
        // テスト項目: 同じイベントの複数ハンドラが登録順に呼ばれる
        // given (前提条件):
        let registry = HandlerRegistry::new();
        let log = Arc::new(AsyncMutex::new(Vec::new()));
        let _first = registry.register(
            "receive_notification",
            RecordingHandler::new("first", log.clone()),
        );
        let _second = registry.register(
            "receive_notification",
            RecordingHandler::new("second", log.clone()),
        );

        // when (操作):
        let invoked = registry
            .dispatch("receive_notification", &serde_json::json!({"message": "A"}))
            .await;

        // then (期待する結果):
        assert_eq!(invoked, 2);
        let labels: Vec<String> = log.lock().await.iter().map(|(l, _)| l.clone()).collect();
        assert_eq!(labels, vec!["first", "second"]);
    }

    #[tokio::test]
    async fn test_dropping_subscription_unregisters_only_that_handler() {
        // テスト項目: Subscription を破棄すると、そのハンドラだけが解除される
        // given (前提条件):
        let registry = HandlerRegistry::new();
        let log = Arc::new(AsyncMutex::new(Vec::new()));
        let first = registry.register(
            "receive_notification",
            RecordingHandler::new("first", log.clone()),
        );
        let _second = registry.register(
            "receive_notification",
            RecordingHandler::new("second", log.clone()),
        );

        // when (操作):
        drop(first);
        registry.dispatch("receive_notification", &Value::Null).await;

        // then (期待する結果):
        assert_eq!(registry.handler_count("receive_notification"), 1);
        let entries = log.lock().await;
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].0, "second");
    }

    #[tokio::test]
    async fn test_dispatch_unknown_event_invokes_nothing() {
        // テスト項目: ハンドラのないイベントは何も呼ばない
        // given (前提条件):
        let registry = HandlerRegistry::new();

        // when (操作):
        let invoked = registry.dispatch("connect", &Value::Null).await;

        // then (期待する結果):
        assert_eq!(invoked, 0);
    }

    #[test]
    fn test_subscription_outliving_registry_drops_quietly() {
        // テスト項目: レジストリが先に破棄されても Subscription の破棄は安全
        // given (前提条件):
        let registry = HandlerRegistry::new();
        let log = Arc::new(AsyncMutex::new(Vec::new()));
        let subscription = registry.register("connect", RecordingHandler::new("late", log));

        // when (操作):
        drop(registry);

        // then (期待する結果):
        assert_eq!(subscription.event(), "connect");
        subscription.unsubscribe();
    }
}
