//! Transient toast notifications, expired by the clock.

use super::state::{MAX_TOASTS, TOAST_TICKS};

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ToastKind {
    Success,
    Error,
    Info,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Toast {
    pub kind: ToastKind,
    pub title: String,
    pub description: Option<String>,
    pub ticks_left: u32,
}

pub struct Notifications {
    toasts: Vec<Toast>,
}

impl Notifications {
    pub fn new() -> Self {
        Self { toasts: Vec::new() }
    }

    pub fn push(&mut self, kind: ToastKind, title: &str, description: Option<&str>) {
        self.toasts.push(Toast {
            kind,
            title: title.to_string(),
            description: description.map(str::to_string),
            ticks_left: TOAST_TICKS,
        });
        if self.toasts.len() > MAX_TOASTS {
            self.toasts.remove(0);
        }
    }

    pub fn success(&mut self, title: &str, description: Option<&str>) {
        self.push(ToastKind::Success, title, description);
    }

    pub fn error(&mut self, title: &str) {
        self.push(ToastKind::Error, title, None);
    }

    pub fn info(&mut self, title: &str) {
        self.push(ToastKind::Info, title, None);
    }

    pub fn tick(&mut self, delta_ticks: u32) {
        for t in &mut self.toasts {
            t.ticks_left = t.ticks_left.saturating_sub(delta_ticks);
        }
        self.toasts.retain(|t| t.ticks_left > 0);
    }

    /// Oldest first.
    pub fn visible(&self) -> &[Toast] {
        &self.toasts
    }

    pub fn latest(&self) -> Option<&Toast> {
        self.toasts.last()
    }
}
