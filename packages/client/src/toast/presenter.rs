//! The toast presenter task and its handle.

use std::{
    sync::{
        Arc,
        atomic::{AtomicU64, Ordering},
    },
    time::Duration,
};

use hostel_notify_shared::time::Clock;
use tokio::{sync::mpsc, task::JoinHandle};

use super::{
    board::ToastBoard,
    sink::ToastSink,
    types::{ToastId, ToastOptions},
};

enum ToastCommand {
    Show { id: ToastId, options: ToastOptions },
    Dismiss(ToastId),
}

/// Cloneable entry point for showing toasts from anywhere in the app.
#[derive(Clone)]
pub struct ToastHandle {
    tx: mpsc::UnboundedSender<ToastCommand>,
    next_seq: Arc<AtomicU64>,
}

impl ToastHandle {
    fn send(&self, command: ToastCommand) {
        if self.tx.send(command).is_err() {
            tracing::debug!("Toast presenter stopped, dropping toast");
        }
    }

    /// Show a toast. If `options.id` names a visible toast, it is updated in place.
    pub fn show(&self, options: ToastOptions) -> ToastId {
        let id = options.id.clone().unwrap_or_else(|| {
            ToastId::new(format!(
                "toast-{}",
                self.next_seq.fetch_add(1, Ordering::Relaxed)
            ))
        });
        self.send(ToastCommand::Show {
            id: id.clone(),
            options,
        });
        id
    }

    pub fn success(&self, message: impl Into<String>) -> ToastId {
        self.show(ToastOptions::success(message))
    }

    pub fn error(&self, message: impl Into<String>) -> ToastId {
        self.show(ToastOptions::error(message))
    }

    /// Show a progress toast; pass the returned id to a later call to resolve it.
    pub fn loading(&self, message: impl Into<String>) -> ToastId {
        self.show(ToastOptions::loading(message))
    }

    pub fn dismiss(&self, id: &ToastId) {
        self.send(ToastCommand::Dismiss(id.clone()));
    }

    /// Map a backend status string to a toast: `"success"` (any case of the
    /// first letter) is a success, everything else an error.
    pub fn alert(&self, status: &str, message: impl Into<String>) -> ToastId {
        if status == "success" || status == "Success" {
            self.success(message)
        } else {
            self.error(message)
        }
    }
}

/// Owns the visible toasts and renders them through a sink.
pub(crate) struct ToastPresenter {
    board: ToastBoard,
    sink: Box<dyn ToastSink>,
    clock: Arc<dyn Clock>,
    rx: mpsc::UnboundedReceiver<ToastCommand>,
}

impl ToastPresenter {
    /// Start the presenter task. Only the composition root calls this.
    pub(crate) fn spawn(
        sink: Box<dyn ToastSink>,
        clock: Arc<dyn Clock>,
    ) -> (ToastHandle, JoinHandle<()>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let presenter = Self {
            board: ToastBoard::new(),
            sink,
            clock,
            rx,
        };
        let handle = ToastHandle {
            tx,
            next_seq: Arc::new(AtomicU64::new(1)),
        };
        (handle, tokio::spawn(presenter.run()))
    }

    async fn run(mut self) {
        loop {
            let wait = self.board.next_deadline().map(|deadline| {
                let remaining = deadline.saturating_sub(self.clock.now_millis()).max(0);
                Duration::from_millis(remaining as u64)
            });

            tokio::select! {
                command = self.rx.recv() => match command {
                    Some(command) => self.apply(command),
                    None => break,
                },
                _ = sleep_or_forever(wait) => self.expire(),
            }
        }
        tracing::debug!("Toast presenter stopped");
    }

    fn apply(&mut self, command: ToastCommand) {
        let event = match command {
            ToastCommand::Show { id, options } => {
                Some(self.board.show(id, options, self.clock.now_millis()))
            }
            ToastCommand::Dismiss(id) => self.board.dismiss(&id),
        };
        if let Some(event) = event {
            self.sink.render(&event);
        }
    }

    fn expire(&mut self) {
        for event in self.board.expire(self.clock.now_millis()) {
            self.sink.render(&event);
        }
    }
}

async fn sleep_or_forever(wait: Option<Duration>) {
    match wait {
        Some(duration) => tokio::time::sleep(duration).await,
        None => std::future::pending::<()>().await,
    }
}
