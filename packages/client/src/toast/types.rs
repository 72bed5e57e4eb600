//! Toast request types.

use std::time::Duration;

/// Stable key of a toast. Reusing a key updates the toast in place.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ToastId(String);

impl ToastId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ToastId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Error,
    /// Progress indicator; stays until replaced or dismissed
    Loading,
}

impl Severity {
    /// How long a toast of this severity stays visible by default
    pub fn default_duration(self) -> Option<Duration> {
        match self {
            Severity::Success => Some(Duration::from_millis(2000)),
            Severity::Error => Some(Duration::from_millis(4000)),
            Severity::Loading => None,
        }
    }
}

/// A request to show (or update) a toast
#[derive(Debug, Clone, PartialEq)]
pub struct ToastOptions {
    pub id: Option<ToastId>,
    pub severity: Severity,
    pub message: String,
    pub icon: Option<String>,
    /// Overrides the severity's default lifetime
    pub duration: Option<Duration>,
}

impl ToastOptions {
    pub fn new(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            id: None,
            severity,
            message: message.into(),
            icon: None,
            duration: None,
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(Severity::Success, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(Severity::Error, message)
    }

    pub fn loading(message: impl Into<String>) -> Self {
        Self::new(Severity::Loading, message)
    }

    pub fn with_id(mut self, id: ToastId) -> Self {
        self.id = Some(id);
        self
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = Some(duration);
        self
    }

    /// Lifetime after which the toast is dismissed automatically
    pub fn effective_duration(&self) -> Option<Duration> {
        self.duration.or(self.severity.default_duration())
    }
}
