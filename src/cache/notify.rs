//! User-facing notifications raised by mutations.

use std::sync::Mutex;
use std::time::Duration;

use tracing::{error, info};
use uuid::Uuid;

use super::lock::mutex_lock;

const DEFAULT_TOAST_TTL: Duration = Duration::from_millis(6000);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

impl ToastKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ToastKind::Success => "success",
            ToastKind::Error => "error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub id: Uuid,
    pub kind: ToastKind,
    pub text: String,
    pub ttl: Duration,
}

impl Toast {
    pub fn success(text: impl Into<String>) -> Self {
        Self::new(ToastKind::Success, text)
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self::new(ToastKind::Error, text)
    }

    fn new(kind: ToastKind, text: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            text: text.into(),
            ttl: DEFAULT_TOAST_TTL,
        }
    }

    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }
}

pub trait Notifier: Send + Sync {
    fn notify(&self, toast: Toast);
}

/// Emits toasts as log events.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, toast: Toast) {
        match toast.kind {
            ToastKind::Success => info!(toast_id = %toast.id, text = %toast.text, "toast"),
            ToastKind::Error => error!(toast_id = %toast.id, text = %toast.text, "toast"),
        }
    }
}

/// Keeps every toast; the CLI drains it after a command.
#[derive(Debug, Default)]
pub struct MemoryNotifier {
    toasts: Mutex<Vec<Toast>>,
}

impl MemoryNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn toasts(&self) -> Vec<Toast> {
        mutex_lock(&self.toasts, "cache::notify", "toasts").clone()
    }

    pub fn drain(&self) -> Vec<Toast> {
        std::mem::take(&mut *mutex_lock(&self.toasts, "cache::notify", "drain"))
    }
}

impl Notifier for MemoryNotifier {
    fn notify(&self, toast: Toast) {
        mutex_lock(&self.toasts, "cache::notify", "notify").push(toast);
    }
}
