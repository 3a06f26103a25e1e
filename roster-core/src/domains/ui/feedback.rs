//! Toast notifications.

use std::time::{Duration, Instant};

pub const DEFAULT_TOAST_TTL: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Info,
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub id: u64,
    pub kind: ToastKind,
    pub message: String,
    pub ttl: Duration,
    pub created_at: Instant,
}

impl Toast {
    pub fn is_expired(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.created_at) >= self.ttl
    }
}

/// Queue of visible toasts, oldest first.
#[derive(Debug, Default)]
pub struct Toaster {
    toasts: Vec<Toast>,
    next_id: u64,
}

impl Toaster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(
        &mut self,
        kind: ToastKind,
        message: impl Into<String>,
        ttl: Duration,
    ) -> u64 {
        self.next_id += 1;
        let toast = Toast {
            id: self.next_id,
            kind,
            message: message.into(),
            ttl,
            created_at: Instant::now(),
        };
        self.toasts.push(toast);
        self.next_id
    }

    pub fn success(&mut self, message: impl Into<String>) -> u64 {
        self.push(ToastKind::Success, message, DEFAULT_TOAST_TTL)
    }

    pub fn error(&mut self, message: impl Into<String>) -> u64 {
        self.push(ToastKind::Error, message, DEFAULT_TOAST_TTL)
    }

    pub fn info(&mut self, message: impl Into<String>) -> u64 {
        self.push(ToastKind::Info, message, DEFAULT_TOAST_TTL)
    }

    pub fn dismiss(&mut self, id: u64) {
        self.toasts.retain(|t| t.id != id);
    }

    /// Drop expired toasts; returns how many were removed.
    pub fn prune(&mut self, now: Instant) -> usize {
        let before = self.toasts.len();
        self.toasts.retain(|t| !t.is_expired(now));
        before - self.toasts.len()
    }

    pub fn visible(&self) -> &[Toast] {
        &self.toasts
    }

    pub fn latest(&self) -> Option<&Toast> {
        self.toasts.last()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prune_drops_only_expired_toasts() {
        let mut toaster = Toaster::new();
        toaster.push(ToastKind::Success, "short", Duration::from_secs(2));
        toaster.error("long");

        let later = Instant::now() + Duration::from_secs(3);
        assert_eq!(toaster.prune(later), 1);
        assert_eq!(toaster.visible().len(), 1);
        assert_eq!(toaster.visible()[0].message, "long");
        assert_eq!(toaster.visible()[0].ttl, DEFAULT_TOAST_TTL);
    }

    #[test]
    fn dismiss_by_id() {
        let mut toaster = Toaster::new();
        let first = toaster.info("one");
        toaster.info("two");
        toaster.dismiss(first);
        assert_eq!(toaster.latest().map(|t| t.message.as_str()), Some("two"));
        assert_eq!(toaster.visible().len(), 1);
    }
}
