use chrono::{DateTime, Duration, Utc};
use parking_lot::Mutex;

/// How long a toast stays on screen
pub const DEFAULT_TOAST_TTL_SECS: i64 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Success,
    Error,
}

/// Transient user notification
#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub level: ToastLevel,
    pub message: String,
    pub issued_at: DateTime<Utc>,
}

impl Toast {
    pub fn success(message: impl Into<String>) -> Self {
        Self::new(ToastLevel::Success, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(ToastLevel::Error, message)
    }

    fn new(level: ToastLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
            issued_at: Utc::now(),
        }
    }

    pub fn is_expired(&self, now: DateTime<Utc>, ttl: Duration) -> bool {
        now - self.issued_at >= ttl
    }
}

/// Sink for submit-outcome notifications
pub trait Notifier: Send + Sync {
    fn notify(&self, toast: Toast);
}

/// In-memory toast stack; entries disappear once their TTL passes
pub struct ToastQueue {
    toasts: Mutex<Vec<Toast>>,
    ttl: Duration,
}

impl Default for ToastQueue {
    fn default() -> Self {
        Self::with_ttl(Duration::seconds(DEFAULT_TOAST_TTL_SECS))
    }
}

impl ToastQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            toasts: Mutex::new(Vec::new()),
            ttl,
        }
    }

    /// Toasts still visible at `now`, oldest first. Expired ones are dropped.
    pub fn active_at(&self, now: DateTime<Utc>) -> Vec<Toast> {
        let mut toasts = self.toasts.lock();
        toasts.retain(|t| !t.is_expired(now, self.ttl));
        toasts.clone()
    }

    pub fn active(&self) -> Vec<Toast> {
        self.active_at(Utc::now())
    }
}

impl Notifier for ToastQueue {
    /// Pushes `toast` after dropping whatever had expired by the time it was issued.
    fn notify(&self, toast: Toast) {
        let mut toasts = self.toasts.lock();
        toasts.retain(|t| !t.is_expired(toast.issued_at, self.ttl));
        toasts.push(toast);
    }
}
