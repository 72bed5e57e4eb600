//! Toast renderers.

use std::io::Write;

use tokio::sync::mpsc;

use super::{
    board::{ActiveToast, ToastEvent},
    types::Severity,
};

/// Renders toast events
pub trait ToastSink: Send {
    fn render(&mut self, event: &ToastEvent);
}

/// Toast formatter for terminal display
pub struct ToastFormatter;

impl ToastFormatter {
    /// Format a visible toast as a single line
    pub fn format_toast(toast: &ActiveToast) -> String {
        let marker = match toast.severity {
            Severity::Success => "✔",
            Severity::Error => "✖",
            Severity::Loading => "…",
        };
        match &toast.icon {
            Some(icon) => format!("[{}] {} {}", marker, icon, toast.message),
            None => format!("[{}] {}", marker, toast.message),
        }
    }
}

/// Prints toasts to stdout
#[derive(Debug, Default)]
pub struct TerminalToastSink;

impl ToastSink for TerminalToastSink {
    fn render(&mut self, event: &ToastEvent) {
        match event {
            ToastEvent::Shown(toast) => println!("{}", ToastFormatter::format_toast(toast)),
            ToastEvent::Updated(toast) => println!("\r{}", ToastFormatter::format_toast(toast)),
            ToastEvent::Dismissed(id) => {
                tracing::debug!("Toast '{}' dismissed", id.as_str());
            }
        }
        std::io::stdout().flush().ok();
    }
}

/// Forwards toast events to a channel, for embedding UIs and tests
pub struct ChannelToastSink {
    tx: mpsc::UnboundedSender<ToastEvent>,
}

impl ChannelToastSink {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<ToastEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl ToastSink for ChannelToastSink {
    fn render(&mut self, event: &ToastEvent) {
        if self.tx.send(event.clone()).is_err() {
            tracing::debug!("Toast receiver dropped, discarding {:?}", event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::toast::ToastId;

    fn toast(severity: Severity, icon: Option<&str>) -> ActiveToast {
        ActiveToast {
            id: ToastId::new("t"),
            severity,
            message: "Issue #42 resolved".to_string(),
            icon: icon.map(str::to_string),
            expires_at: None,
        }
    }

    #[test]
    fn test_format_toast_with_icon() {
        // テスト項目: アイコン付きのトーストが正しくフォーマットされる
        // given (前提条件):
        let toast = toast(Severity::Success, Some("🔔"));

        // when (操作):
        let result = ToastFormatter::format_toast(&toast);

        // then (期待する結果):
        assert_eq!(result, "[✔] 🔔 Issue #42 resolved");
    }

    #[test]
    fn test_format_toast_error_without_icon() {
        // テスト項目: アイコンなしのエラートーストが正しくフォーマットされる
        // given (前提条件):
        let toast = toast(Severity::Error, None);

        // when (操作):
        let result = ToastFormatter::format_toast(&toast);

        // then (期待する結果):
        assert_eq!(result, "[✖] Issue #42 resolved");
    }
}
