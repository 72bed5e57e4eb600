//! Toast presenter: transient, auto-dismissing popups.
//!
//! Exactly one presenter runs per application. It is spawned by
//! [`App`](crate::app::App); everything else talks to it through a
//! cloneable [`ToastHandle`].

mod board;
mod presenter;
mod sink;
mod types;

pub use board::{ActiveToast, ToastBoard, ToastEvent};
pub use presenter::ToastHandle;
pub use sink::{ChannelToastSink, TerminalToastSink, ToastFormatter, ToastSink};
pub use types::{Severity, ToastId, ToastOptions};

pub(crate) use presenter::ToastPresenter;
