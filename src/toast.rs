// src/toast.rs
// Short-lived notifications shown in the corner of the terminal UI.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use tracing::{error, info};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToastLevel {
    Success,
    Error,
    Info,
}

#[derive(Clone, Debug)]
pub struct Toast {
    pub level: ToastLevel,
    pub message: String,
    pub created: Instant,
}

#[derive(Debug)]
pub struct ToastQueue {
    toasts: VecDeque<Toast>,
    ttl: Duration,
    max_visible: usize,
}

impl ToastQueue {
    pub fn new(ttl: Duration) -> Self {
        Self { toasts: VecDeque::new(), ttl, max_visible: 4 }
    }

    pub fn push(&mut self, level: ToastLevel, message: impl Into<String>) {
        self.push_at(level, message, Instant::now());
    }

    pub fn push_at(&mut self, level: ToastLevel, message: impl Into<String>, now: Instant) {
        let message = message.into();
        match level {
            ToastLevel::Error => error!("{}", message),
            _ => info!("{}", message),
        }
        self.toasts.push_back(Toast { level, message, created: now });
        while self.toasts.len() > self.max_visible {
            self.toasts.pop_front();
        }
    }

    pub fn success(&mut self, message: impl Into<String>) {
        self.push(ToastLevel::Success, message);
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.push(ToastLevel::Error, message);
    }

    pub fn info(&mut self, message: impl Into<String>) {
        self.push(ToastLevel::Info, message);
    }

    /// Drops every toast older than the configured lifetime.
    pub fn prune(&mut self, now: Instant) {
        let ttl = self.ttl;
        self.toasts.retain(|t| now.saturating_duration_since(t.created) < ttl);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Toast> {
        self.toasts.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.toasts.is_empty()
    }

    pub fn len(&self) -> usize {
        self.toasts.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toasts_expire_after_ttl() {
        let mut queue = ToastQueue::new(Duration::from_millis(3000));
        let start = Instant::now();
        queue.push_at(ToastLevel::Success, "Product added", start);
        queue.push_at(ToastLevel::Error, "Enter a code", start + Duration::from_millis(2000));
        queue.prune(start + Duration::from_millis(3500));
        let left: Vec<_> = queue.iter().map(|t| t.message.as_str()).collect();
        assert_eq!(left, ["Enter a code"]);
        queue.prune(start + Duration::from_millis(5000));
        assert!(queue.is_empty());
    }

    #[test]
    fn oldest_toasts_are_dropped_when_full() {
        let mut queue = ToastQueue::new(Duration::from_secs(60));
        for i in 0..6 {
            queue.info(format!("toast {}", i));
        }
        assert_eq!(queue.len(), 4);
        assert_eq!(queue.iter().next().map(|t| t.message.as_str()), Some("toast 2"));
    }
}
