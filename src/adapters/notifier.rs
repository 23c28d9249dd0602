//! Toast Notifier
//!
//! Feeds the toaster and the session-expired dialog through signals.

use std::cell::Cell;

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;

use flywheel_core::http::Notifier;

const TOAST_MS: u32 = 3_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub id: u64,
    pub kind: ToastKind,
    pub message: String,
    pub description: Option<String>,
}

pub struct ToastNotifier {
    next_id: Cell<u64>,
    toasts: WriteSignal<Vec<Toast>>,
    session_expired: WriteSignal<bool>,
}

impl ToastNotifier {
    pub fn new(toasts: WriteSignal<Vec<Toast>>, session_expired: WriteSignal<bool>) -> Self {
        Self {
            next_id: Cell::new(0),
            toasts,
            session_expired,
        }
    }

    fn push(&self, kind: ToastKind, message: &str, description: Option<&str>) {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        self.toasts.update(|list| {
            list.push(Toast {
                id,
                kind,
                message: message.to_string(),
                description: description.map(str::to_string),
            })
        });
        let toasts = self.toasts;
        spawn_local(async move {
            TimeoutFuture::new(TOAST_MS).await;
            toasts.update(|list| list.retain(|t| t.id != id));
        });
    }
}

impl Notifier for ToastNotifier {
    fn success(&self, message: &str) {
        self.push(ToastKind::Success, message, None);
    }

    fn error(&self, message: &str, description: Option<&str>) {
        self.push(ToastKind::Error, message, description);
    }

    fn session_expired(&self) {
        self.session_expired.set(true);
    }
}
