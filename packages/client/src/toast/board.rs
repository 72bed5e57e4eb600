//! Visible-toast bookkeeping, independent of any timer or renderer.

use super::types::{Severity, ToastId, ToastOptions};

/// A toast currently on screen
#[derive(Debug, Clone, PartialEq)]
pub struct ActiveToast {
    pub id: ToastId,
    pub severity: Severity,
    pub message: String,
    pub icon: Option<String>,
    /// Unix millis at which the toast is dismissed; `None` stays until dismissed
    pub expires_at: Option<i64>,
}

/// What the renderer has to do
#[derive(Debug, Clone, PartialEq)]
pub enum ToastEvent {
    Shown(ActiveToast),
    /// An in-flight toast was replaced in place (same id)
    Updated(ActiveToast),
    Dismissed(ToastId),
}

/// Ordered set of visible toasts, oldest first.
#[derive(Debug, Default)]
pub struct ToastBoard {
    active: Vec<ActiveToast>,
}

impl ToastBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active(&self) -> &[ActiveToast] {
        &self.active
    }

    /// Show a toast, or update the visible toast that already uses `id`.
    pub fn show(&mut self, id: ToastId, options: ToastOptions, now_millis: i64) -> ToastEvent {
        let expires_at = options
            .effective_duration()
            .map(|duration| {
                let millis = i64::try_from(duration.as_millis()).unwrap_or(i64::MAX);
                now_millis.saturating_add(millis)
            });
        let toast = ActiveToast {
            id,
            severity: options.severity,
            message: options.message,
            icon: options.icon,
            expires_at,
        };

        match self.active.iter_mut().find(|active| active.id == toast.id) {
            Some(existing) => {
                *existing = toast.clone();
                ToastEvent::Updated(toast)
            }
            None => {
                self.active.push(toast.clone());
                ToastEvent::Shown(toast)
            }
        }
    }

    /// Remove a toast. `None` if it was not visible.
    pub fn dismiss(&mut self, id: &ToastId) -> Option<ToastEvent> {
        let index = self.active.iter().position(|active| &active.id == id)?;
        let removed = self.active.remove(index);
        Some(ToastEvent::Dismissed(removed.id))
    }

    /// Remove every toast whose lifetime has elapsed at `now_millis`.
    pub fn expire(&mut self, now_millis: i64) -> Vec<ToastEvent> {
        let mut dismissed = Vec::new();
        self.active.retain(|toast| match toast.expires_at {
            Some(deadline) if deadline <= now_millis => {
                dismissed.push(ToastEvent::Dismissed(toast.id.clone()));
                false
            }
            _ => true,
        });
        dismissed
    }

    /// Earliest pending expiry
    pub fn next_deadline(&self) -> Option<i64> {
        self.active.iter().filter_map(|toast| toast.expires_at).min()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_show_with_new_id_stacks_toast() {
        // テスト項目: 異なる ID のトーストは積み重なる
        // given (前提条件):
        let mut board = ToastBoard::new();
        board.show("a".into(), ToastOptions::success("Profile saved"), 0);

        // when (操作):
        let event = board.show("b".into(), ToastOptions::error("Failed to submit"), 0);

        // then (期待する結果):
        assert!(matches!(event, ToastEvent::Shown(_)));
        assert_eq!(board.active().len(), 2);
    }

    #[test]
    fn test_huge_duration_does_not_expire_immediately() {
        // テスト項目: 非常に長い表示時間を指定しても表示直後に消えない
        // given (前提条件):
        let mut board = ToastBoard::new();
        let now = 1_700_000_000_000;

        // when (操作):
        board.show(
            "sticky".into(),
            ToastOptions::success("sticky").with_duration(Duration::MAX),
            now,
        );
        let expired = board.expire(now);

        // then (期待する結果):
        assert!(expired.is_empty());
        assert_eq!(board.active()[0].expires_at, Some(i64::MAX));
    }

    #[test]
    fn test_show_with_existing_id_updates_in_place() {
        // テスト項目: 同じ ID のトーストは新規表示ではなく更新される
        // given (前提条件):
        let mut board = ToastBoard::new();
        board.show("delete".into(), ToastOptions::loading("Processing deletion..."), 0);

        // when (操作):
        let event = board.show(
            "delete".into(),
            ToastOptions::success("Account deleted successfully"),
            100,
        );

        // then (期待する結果):
        let ToastEvent::Updated(toast) = event else {
            panic!("expected an update, got {:?}", event);
        };
        assert_eq!(toast.severity, Severity::Success);
        assert_eq!(toast.expires_at, Some(2100));
        assert_eq!(board.active().len(), 1);
        assert_eq!(board.active()[0].message, "Account deleted successfully");
    }

    #[test]
    fn test_loading_toast_never_expires() {
        // テスト項目: loading トーストは時間経過で消えない
        // given (前提条件):
        let mut board = ToastBoard::new();
        board.show("p".into(), ToastOptions::loading("Uploading..."), 0);

        // when (操作):
        let dismissed = board.expire(i64::MAX);

        // then (期待する結果):
        assert!(dismissed.is_empty());
        assert_eq!(board.next_deadline(), None);
    }

    #[test]
    fn test_expire_removes_only_elapsed_toasts() {
        // テスト項目: 期限を過ぎたトーストだけが消える
        // given (前提条件):
        let mut board = ToastBoard::new();
        board.show("ok".into(), ToastOptions::success("Setting updated"), 0);
        board.show("err".into(), ToastOptions::error("Server error"), 0);

        // when (操作):
        let dismissed = board.expire(2000);

        // then (期待する結果):
        assert_eq!(dismissed, vec![ToastEvent::Dismissed("ok".into())]);
        assert_eq!(board.next_deadline(), Some(4000));
    }

    #[test]
    fn test_dismiss_unknown_id_returns_none() {
        // テスト項目: 表示されていない ID の dismiss は None を返す
        // given (前提条件):
        let mut board = ToastBoard::new();

        // when (操作):
        let event = board.dismiss(&"missing".into());

        // then (期待する結果):
        assert!(event.is_none());
    }
}
