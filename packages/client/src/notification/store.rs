//! In-memory notification store.

use std::{collections::VecDeque, sync::Arc};

use hostel_notify_shared::time::Clock;
use serde_json::Value;
use tokio::sync::{Mutex, watch};

use super::model::{Notification, NotificationId};

#[derive(Default)]
struct StoreState {
    /// Newest first
    items: VecDeque<Notification>,
    unread_count: usize,
    last_id: Option<NotificationId>,
}

/// Process-wide notification state: items (newest first) and the unread counter.
///
/// Every mutation updates items and counter under one lock, so the counter
/// always equals the number of unread items once a call returns.
pub struct NotificationStore {
    state: Mutex<StoreState>,
    clock: Arc<dyn Clock>,
    unread_tx: watch::Sender<usize>,
}

impl NotificationStore {
    pub fn new(clock: Arc<dyn Clock>) -> Arc<Self> {
        let (unread_tx, _) = watch::channel(0);
        Arc::new(Self {
            state: Mutex::new(StoreState::default()),
            clock,
            unread_tx,
        })
    }

    /// Prepend a notification built from `payload` and bump the unread counter.
    pub(crate) async fn append(&self, payload: Value) -> Notification {
        let mut state = self.state.lock().await;

        let now = self.clock.now_millis();
        let id = NotificationId::next(state.last_id, now);
        let notification = Notification::new(id, payload, now);
        state.last_id = Some(id);
        state.items.push_front(notification.clone());
        state.unread_count += 1;
        self.unread_tx.send_replace(state.unread_count);

        tracing::debug!(
            "Notification {} stored ({} unread)",
            id.value(),
            state.unread_count
        );
        notification
    }

    /// Mark every item read and reset the counter. Idempotent.
    pub async fn mark_all_read(&self) {
        let mut state = self.state.lock().await;
        state.items.iter_mut().for_each(Notification::mark_read);
        state.unread_count = 0;
        self.unread_tx.send_replace(0);
    }

    /// Snapshot of all items, newest first
    pub async fn items(&self) -> Vec<Notification> {
        self.state.lock().await.items.iter().cloned().collect()
    }

    pub async fn unread_count(&self) -> usize {
        self.state.lock().await.unread_count
    }

    /// Receiver that changes whenever the unread counter does
    pub fn watch_unread(&self) -> watch::Receiver<usize> {
        self.unread_tx.subscribe()
    }
}

/// Read-only view of the store handed to UI code, plus `mark_all_read`.
#[derive(Clone)]
pub struct NotificationFeed {
    store: Arc<NotificationStore>,
}

impl NotificationFeed {
    pub fn new(store: Arc<NotificationStore>) -> Self {
        Self { store }
    }

    pub async fn items(&self) -> Vec<Notification> {
        self.store.items().await
    }

    pub async fn unread_count(&self) -> usize {
        self.store.unread_count().await
    }

    pub fn watch_unread(&self) -> watch::Receiver<usize> {
        self.store.watch_unread()
    }

    pub async fn mark_all_read(&self) {
        self.store.mark_all_read().await;
    }
}
